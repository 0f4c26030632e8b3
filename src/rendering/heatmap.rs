//! Heatmap binning: aggregate sighting coordinates into a fixed grid.
//!
//! Bins are recomputed in full whenever the sighting set changes. At the
//! expected volume (hundreds of points) a total recompute is simpler than
//! incremental bookkeeping and plenty fast.

use std::collections::HashMap;

use crate::core::geo::GeoPoint;

/// A density sample. `lat`/`lng` is the bin's floor-quantized lower-left
/// corner, not its centroid; `intensity` counts the points in the bin.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatBin {
    pub lat: f64,
    pub lng: f64,
    pub intensity: u32,
}

/// Bucket every point into a `grid_size`-degree grid and count per cell.
/// Output order is unspecified.
pub fn compute_bins(points: &[GeoPoint], grid_size: f64) -> Vec<HeatBin> {
    let mut grid: HashMap<(i64, i64), u32> = HashMap::new();
    for p in points {
        let key = (
            (p.lat / grid_size).floor() as i64,
            (p.lng / grid_size).floor() as i64,
        );
        *grid.entry(key).or_insert(0) += 1;
    }

    grid.into_iter()
        .map(|((lat_cell, lng_cell), intensity)| HeatBin {
            lat: lat_cell as f64 * grid_size,
            lng: lng_cell as f64 * grid_size,
            intensity,
        })
        .collect()
}

/// Display radius for a bin, capped so dense cells don't swallow the map.
pub fn heat_radius(intensity: u32) -> f64 {
    (intensity as f64 * 15.0).min(50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_points_share_a_bin() {
        let points = [
            GeoPoint::new(44.61, -110.51),
            GeoPoint::new(44.611, -110.512),
            GeoPoint::new(44.65, -110.55),
        ];
        let mut bins = compute_bins(&points, 0.02);
        bins.sort_by(|a, b| a.intensity.cmp(&b.intensity));

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].intensity, 1);
        assert_eq!(bins[1].intensity, 2);
    }

    #[test]
    fn bin_corner_is_floor_quantized() {
        let bins = compute_bins(&[GeoPoint::new(44.61, -110.51)], 0.02);
        assert_eq!(bins.len(), 1);
        // floor(44.61/0.02) = 2230, floor(-110.51/0.02) = -5526
        assert!((bins[0].lat - 44.60).abs() < 1e-9);
        assert!((bins[0].lng - -110.52).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_no_bins() {
        assert!(compute_bins(&[], 0.02).is_empty());
    }

    #[test]
    fn radius_grows_then_caps() {
        assert_eq!(heat_radius(1), 15.0);
        assert_eq!(heat_radius(3), 45.0);
        assert_eq!(heat_radius(4), 50.0);
        assert_eq!(heat_radius(100), 50.0);
    }
}
