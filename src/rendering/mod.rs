pub mod heatmap;
pub mod layers;
pub mod viewport;
