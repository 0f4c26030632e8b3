pub mod geo;
pub mod sighting;
