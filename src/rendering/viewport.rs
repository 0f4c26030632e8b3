//! Pan/zoom viewport transform between geographic and canvas coordinates.
//!
//! The mapping is a flat linear interpolation inside the park bounds, not a
//! real projection, which is fine at park scale. Projection composes in a fixed
//! order: interpolate into base pixels, scale about the canvas center by the
//! zoom factor, then translate by the pan offset. `unproject` is the exact
//! algebraic inverse, so `round6(unproject(project(p))) == round6(p)` for
//! any in-bounds point, any zoom in range and any offset.

use crate::config::park::MapSettings;
use crate::core::geo::{CanvasSize, GeoBounds, GeoPoint, PixelPoint, PixelVec};

#[derive(Debug, Clone)]
pub struct Viewport {
    bounds: GeoBounds,
    canvas: CanvasSize,
    zoom_min: f64,
    zoom_max: f64,
    zoom_step: f64,
    margin: f64,
    zoom: f64,
    offset: PixelVec,
}

impl Viewport {
    pub fn new(bounds: GeoBounds, settings: &MapSettings) -> Self {
        Self {
            bounds,
            canvas: settings.canvas,
            zoom_min: settings.zoom_min,
            zoom_max: settings.zoom_max,
            zoom_step: settings.zoom_step,
            margin: settings.visibility_margin,
            zoom: 1.0,
            offset: PixelVec::default(),
        }
    }

    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> PixelVec {
        self.offset
    }

    /// Geographic point → canvas pixels under the current zoom and pan.
    pub fn project(&self, p: GeoPoint) -> PixelPoint {
        let base_x = (p.lng - self.bounds.west) / self.bounds.lng_span() * self.canvas.width;
        // north is pixel-up, so Y inverts
        let base_y = (self.bounds.north - p.lat) / self.bounds.lat_span() * self.canvas.height;

        let cx = self.canvas.width / 2.0;
        let cy = self.canvas.height / 2.0;
        PixelPoint::new(
            (base_x - cx) * self.zoom + cx + self.offset.x,
            (base_y - cy) * self.zoom + cy + self.offset.y,
        )
    }

    /// Canvas pixels → geographic point, rounded to 6 decimal places to
    /// match the precision used for bounds checks and storage.
    pub fn unproject(&self, px: PixelPoint) -> GeoPoint {
        debug_assert!(
            self.zoom.is_finite() && self.zoom > 0.0,
            "zoom clamp must keep zoom positive and finite"
        );

        let cx = self.canvas.width / 2.0;
        let cy = self.canvas.height / 2.0;
        let base_x = (px.x - self.offset.x - cx) / self.zoom + cx;
        let base_y = (px.y - self.offset.y - cy) / self.zoom + cy;

        let lat = self.bounds.north - base_y / self.canvas.height * self.bounds.lat_span();
        let lng = self.bounds.west + base_x / self.canvas.width * self.bounds.lng_span();
        GeoPoint::new(lat, lng).rounded()
    }

    /// Accumulate a pan delta. Deliberately unclamped: panning past the park
    /// edge just shows empty canvas.
    pub fn pan(&mut self, delta: PixelVec) {
        self.offset.x += delta.x;
        self.offset.y += delta.y;
    }

    /// Multiply the zoom by `factor`, clamped to the configured range.
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(self.zoom_min, self.zoom_max);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / self.zoom_step);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = PixelVec::default();
    }

    /// Restore a persisted view, re-applying the zoom clamp.
    pub fn restore(&mut self, zoom: f64, offset: PixelVec) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        }
        if offset.x.is_finite() && offset.y.is_finite() {
            self.offset = offset;
        }
    }

    /// Margin-inclusive cull test: anything within `visibility_margin`
    /// pixels of the canvas still counts as visible.
    pub fn is_visible(&self, px: PixelPoint) -> bool {
        px.x >= -self.margin
            && px.x <= self.canvas.width + self.margin
            && px.y >= -self.margin
            && px.y <= self.canvas.height + self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::round6;

    fn test_viewport() -> Viewport {
        let bounds = GeoBounds {
            north: 45.1,
            south: 44.1,
            east: -109.9,
            west: -111.2,
        };
        let settings = MapSettings {
            canvas: CanvasSize { width: 800.0, height: 600.0 },
            zoom_min: 0.5,
            zoom_max: 4.0,
            zoom_step: 1.5,
            grid_size: 0.02,
            visibility_margin: 50.0,
        };
        Viewport::new(bounds, &settings)
    }

    #[test]
    fn projects_corners_at_identity() {
        let vp = test_viewport();
        let nw = vp.project(GeoPoint::new(45.1, -111.2));
        assert!((nw.x - 0.0).abs() < 1e-9 && (nw.y - 0.0).abs() < 1e-9);
        let se = vp.project(GeoPoint::new(44.1, -109.9));
        assert!((se.x - 800.0).abs() < 1e-9 && (se.y - 600.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_survives_zoom_and_pan() {
        let mut vp = test_viewport();
        let points = [
            GeoPoint::new(44.6, -110.5),
            GeoPoint::new(45.1, -111.2),
            GeoPoint::new(44.1, -109.9),
            GeoPoint::new(44.428, -110.5885),
        ];
        let zooms = [0.5, 1.0, 1.5, 2.25, 4.0];
        let offsets = [
            PixelVec::new(0.0, 0.0),
            PixelVec::new(123.0, -77.5),
            PixelVec::new(-4000.0, 9000.0),
        ];
        for &zoom in &zooms {
            for &offset in &offsets {
                vp.restore(zoom, offset);
                for &p in &points {
                    let back = vp.unproject(vp.project(p));
                    assert_eq!(back.lat, round6(p.lat), "zoom={zoom} offset={offset:?}");
                    assert_eq!(back.lng, round6(p.lng), "zoom={zoom} offset={offset:?}");
                }
            }
        }
    }

    #[test]
    fn zoom_stays_clamped() {
        let mut vp = test_viewport();
        for _ in 0..20 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom(), 4.0);
        for _ in 0..40 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom(), 0.5);
        vp.zoom_by(1e18);
        assert_eq!(vp.zoom(), 4.0);
        vp.zoom_by(f64::NAN);
        assert_eq!(vp.zoom(), 4.0);
    }

    #[test]
    fn zooming_keeps_canvas_center_anchored() {
        let mut vp = test_viewport();
        let center = PixelPoint::new(400.0, 300.0);
        let before = vp.unproject(center);
        vp.zoom_in();
        vp.zoom_in();
        vp.zoom_out();
        assert_eq!(vp.unproject(center), before);
    }

    #[test]
    fn visibility_margin_edges() {
        let vp = test_viewport();
        assert!(vp.is_visible(PixelPoint::new(-50.0, -50.0)));
        assert!(!vp.is_visible(PixelPoint::new(-51.0, -51.0)));
        assert!(vp.is_visible(PixelPoint::new(850.0, 650.0)));
        assert!(!vp.is_visible(PixelPoint::new(851.0, 300.0)));
    }

    #[test]
    fn pan_is_unbounded() {
        let mut vp = test_viewport();
        vp.pan(PixelVec::new(1e7, -1e7));
        assert_eq!(vp.offset(), PixelVec::new(1e7, -1e7));
    }
}
