use egui::Ui;

use crate::core::geo::GeoPoint;

pub fn show_status_bar(
    ui: &mut Ui,
    message: &str,
    cursor: Option<GeoPoint>,
    zoom: f64,
    sighting_count: usize,
) {
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("Status: {message}"));
        ui.separator();
        match cursor {
            Some(p) => ui.label(p.to_string()),
            None => ui.label("—"),
        };
        ui.separator();
        ui.label(format!("Zoom: {zoom:.1}x"));
        ui.separator();
        ui.label(format!("Sightings: {sighting_count}"));
    });
}
