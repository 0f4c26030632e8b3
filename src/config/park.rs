//! Park profile loading.
//!
//! A park profile bundles everything the map engine needs for one region:
//! the geographic bounds, the logical canvas, zoom limits, the heatmap grid
//! size and the static feature layers (roads, water, trails, landmarks,
//! facilities). The engine itself hard-codes none of these, so pointing the
//! app at a different park is a matter of swapping the asset.

use serde::Deserialize;

use crate::core::geo::{CanvasSize, GeoBounds, GeoPoint};

use super::ConfigError;

const YELLOWSTONE_JSON: &str = include_str!("../assets/yellowstone.json");

#[derive(Debug, Clone, Deserialize)]
pub struct ParkConfig {
    pub name: String,
    pub bounds: GeoBounds,
    pub center: GeoPoint,
    pub map: MapSettings,
    pub landmarks: Vec<Landmark>,
    pub roads: Vec<Road>,
    pub water: Vec<WaterBody>,
    pub rivers: Vec<River>,
    pub trails: Vec<Trail>,
    pub facilities: Vec<Facility>,
}

/// Viewport/engine parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MapSettings {
    pub canvas: CanvasSize,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Multiplier applied per zoom-in click (zoom-out divides by it).
    pub zoom_step: f64,
    /// Heatmap bin edge length in degrees.
    pub grid_size: f64,
    /// Extra border around the canvas inside which features still render,
    /// so markers don't pop in and out right at the edge.
    pub visibility_margin: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub icon: String,
}

impl Landmark {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Road {
    pub name: String,
    pub kind: String,
    pub coords: Vec<GeoPoint>,
}

/// A lake outline; coordinates form a closed polygon.
#[derive(Debug, Clone, Deserialize)]
pub struct WaterBody {
    pub name: String,
    pub coords: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct River {
    pub name: String,
    pub coords: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trail {
    pub name: String,
    pub coords: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Facility {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub kind: String,
}

impl Facility {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Load the embedded Yellowstone profile.
pub fn load_park_config() -> Result<ParkConfig, ConfigError> {
    let config: ParkConfig = serde_json::from_str(YELLOWSTONE_JSON)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ParkConfig) -> Result<(), ConfigError> {
    let b = config.bounds;
    if b.north <= b.south || b.east <= b.west {
        return Err(ConfigError::InvalidBounds {
            north: b.north,
            south: b.south,
            east: b.east,
            west: b.west,
        });
    }
    let m = config.map;
    if m.zoom_min <= 0.0 || m.zoom_min > m.zoom_max {
        return Err(ConfigError::InvalidZoomRange { min: m.zoom_min, max: m.zoom_max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_park_config_parses() {
        let park = load_park_config().unwrap();
        assert_eq!(park.bounds.north, 45.1);
        assert_eq!(park.bounds.west, -111.2);
        assert_eq!(park.map.canvas.width, 800.0);
        assert_eq!(park.map.zoom_max, 4.0);
        assert_eq!(park.map.grid_size, 0.02);
        assert!(!park.landmarks.is_empty());
        assert!(!park.roads.is_empty());
    }

    #[test]
    fn park_center_is_inside_bounds() {
        let park = load_park_config().unwrap();
        assert!(park.bounds.contains(park.center));
    }

    #[test]
    fn all_static_features_are_inside_bounds() {
        let park = load_park_config().unwrap();
        for l in &park.landmarks {
            assert!(park.bounds.contains(l.position()), "landmark {}", l.name);
        }
        for r in &park.roads {
            for p in &r.coords {
                assert!(park.bounds.contains(*p), "road {}", r.name);
            }
        }
        for w in &park.water {
            for p in &w.coords {
                assert!(park.bounds.contains(*p), "water {}", w.name);
            }
        }
    }
}
