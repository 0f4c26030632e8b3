pub mod app;
pub mod control_panel;
pub mod map_view;
pub mod sighting_details;
pub mod sighting_form;
pub mod status_bar;
