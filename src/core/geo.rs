//! Geographic and screen-space primitives.
//!
//! The whole map pipeline works in two coordinate spaces: geographic degrees
//! (`GeoPoint`, bounded by a `GeoBounds`) and logical canvas pixels
//! (`PixelPoint`). Domain coordinates are compared and stored at 6 decimal
//! places; [`round6`] is the single rounding rule shared by bounds checks,
//! unprojection and the sighting store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Round to 6 decimal places (~0.1 m of latitude).
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components rounded to domain precision.
    pub fn rounded(self) -> Self {
        Self {
            lat: round6(self.lat),
            lng: round6(self.lng),
        }
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Degrees with hemisphere suffixes derived from the sign, at domain
/// precision. Used anywhere a coordinate is shown to the user.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { "N" } else { "S" };
        let ew = if self.lng >= 0.0 { "E" } else { "W" };
        write!(f, "{:.6}°{ns}, {:.6}°{ew}", self.lat.abs(), self.lng.abs())
    }
}

/// A position on the logical map canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A pan delta in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelVec {
    pub x: f64,
    pub y: f64,
}

impl PixelVec {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Logical canvas dimensions, independent of the on-screen widget size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Rectangular lat/lng region defining the valid map domain.
///
/// Invariant: `north > south` and `east > west`. Both longitudes are
/// negative in this hemisphere; the sign convention is preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    /// Inclusive containment test, evaluated on coordinates rounded to
    /// 6 decimal places. The rounding is deliberate: unprojected clicks and
    /// manually entered coordinates are compared post-rounding, so a point
    /// that stores as exactly `45.1` must pass.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let p = point.rounded();
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: GeoBounds = GeoBounds {
        north: 45.1,
        south: 44.1,
        east: -109.9,
        west: -111.2,
    };

    #[test]
    fn contains_interior_point() {
        assert!(BOUNDS.contains(GeoPoint::new(44.6, -110.5)));
    }

    #[test]
    fn boundary_is_inclusive() {
        assert!(BOUNDS.contains(GeoPoint::new(45.1, -110.5)));
        assert!(BOUNDS.contains(GeoPoint::new(44.1, -110.5)));
        assert!(BOUNDS.contains(GeoPoint::new(44.6, -109.9)));
        assert!(BOUNDS.contains(GeoPoint::new(44.6, -111.2)));
    }

    #[test]
    fn rejects_points_just_outside() {
        assert!(!BOUNDS.contains(GeoPoint::new(45.101, -110.5)));
        assert!(!BOUNDS.contains(GeoPoint::new(44.6, -109.89)));
    }

    #[test]
    fn rounding_rescues_float_noise_on_the_edge() {
        // A hair north of the boundary from accumulated float error still
        // counts as inside once rounded to 6 decimals.
        assert!(BOUNDS.contains(GeoPoint::new(45.100_000_0001, -110.5)));
    }

    #[test]
    fn display_derives_hemisphere_from_sign() {
        assert_eq!(GeoPoint::new(44.6, -110.5).to_string(), "44.600000°N, 110.500000°W");
        assert_eq!(GeoPoint::new(-33.8568, 151.2153).to_string(), "33.856800°S, 151.215300°E");
    }

    #[test]
    fn round6_matches_storage_precision() {
        assert_eq!(round6(44.123_456_789), 44.123_457);
        assert_eq!(round6(-110.999_999_9), -111.0);
    }
}
