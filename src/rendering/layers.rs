//! Render layers: ordered, independently toggleable feature sets.
//!
//! This module produces screen-space [`Drawable`]s from domain data; every
//! coordinate goes through the current [`Viewport`] on every call, and
//! off-canvas features are culled with the margin-inclusive visibility test.
//! Nothing here knows about egui; the UI paints whatever comes out.

use serde::{Deserialize, Serialize};

use crate::config::park::ParkConfig;
use crate::core::geo::{GeoPoint, PixelPoint};
use crate::core::sighting::{Sighting, ThreatLevel};
use crate::rendering::heatmap::{HeatBin, heat_radius};
use crate::rendering::viewport::Viewport;

/// The layers in paint order (first is painted underneath).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerId {
    Terrain,
    Water,
    Roads,
    Trails,
    Facilities,
    Landmarks,
    Heatmap,
    Markers,
}

impl LayerId {
    pub const ALL: [LayerId; 8] = [
        LayerId::Terrain,
        LayerId::Water,
        LayerId::Roads,
        LayerId::Trails,
        LayerId::Facilities,
        LayerId::Landmarks,
        LayerId::Heatmap,
        LayerId::Markers,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Terrain => "Terrain",
            Self::Water => "Water",
            Self::Roads => "Roads",
            Self::Trails => "Trails",
            Self::Facilities => "Facilities",
            Self::Landmarks => "Landmarks",
            Self::Heatmap => "Heatmap",
            Self::Markers => "Wildlife",
        }
    }
}

/// Per-layer visibility flags. Serialized into `ui_state.json` so the
/// selection survives restarts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayerToggles {
    pub terrain: bool,
    pub water: bool,
    pub roads: bool,
    pub trails: bool,
    pub facilities: bool,
    pub landmarks: bool,
    pub heatmap: bool,
    pub markers: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            terrain: true,
            water: true,
            roads: true,
            trails: true,
            facilities: true,
            landmarks: true,
            heatmap: true,
            markers: true,
        }
    }
}

impl LayerToggles {
    pub fn enabled(&self, id: LayerId) -> bool {
        match id {
            LayerId::Terrain => self.terrain,
            LayerId::Water => self.water,
            LayerId::Roads => self.roads,
            LayerId::Trails => self.trails,
            LayerId::Facilities => self.facilities,
            LayerId::Landmarks => self.landmarks,
            LayerId::Heatmap => self.heatmap,
            LayerId::Markers => self.markers,
        }
    }

    pub fn flag_mut(&mut self, id: LayerId) -> &mut bool {
        match id {
            LayerId::Terrain => &mut self.terrain,
            LayerId::Water => &mut self.water,
            LayerId::Roads => &mut self.roads,
            LayerId::Trails => &mut self.trails,
            LayerId::Facilities => &mut self.facilities,
            LayerId::Landmarks => &mut self.landmarks,
            LayerId::Heatmap => &mut self.heatmap,
            LayerId::Markers => &mut self.markers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    PrimaryRoad,
    SecondaryRoad,
    River,
    Trail,
}

/// A screen-space drawing command for one feature.
#[derive(Debug, Clone)]
pub enum Drawable {
    /// Open polyline (roads, rivers, trails).
    Path {
        name: String,
        kind: PathKind,
        points: Vec<PixelPoint>,
    },
    /// Closed water polygon.
    Water {
        name: String,
        points: Vec<PixelPoint>,
    },
    /// Density circle from the heatmap binner.
    Heat {
        center: PixelPoint,
        radius: f64,
        intensity: u32,
    },
    Facility {
        name: String,
        kind: String,
        at: PixelPoint,
    },
    Landmark {
        name: String,
        icon: String,
        at: PixelPoint,
    },
    /// A sighting marker; `id` keys back into the sighting list for
    /// hit-testing and selection.
    Marker {
        id: String,
        icon: &'static str,
        species: String,
        threat: ThreatLevel,
        at: PixelPoint,
    },
}

/// Project and cull everything that is currently toggled on, in paint order.
/// Heat bins are positioned at their bin corner, matching how they are
/// computed.
pub fn build_drawables(
    park: &ParkConfig,
    sightings: &[Sighting],
    bins: &[HeatBin],
    viewport: &Viewport,
    toggles: &LayerToggles,
) -> Vec<Drawable> {
    let mut out = Vec::new();

    if toggles.enabled(LayerId::Water) {
        for body in &park.water {
            if let Some(points) = project_path(viewport, &body.coords) {
                out.push(Drawable::Water { name: body.name.clone(), points });
            }
        }
        for river in &park.rivers {
            if let Some(points) = project_path(viewport, &river.coords) {
                out.push(Drawable::Path {
                    name: river.name.clone(),
                    kind: PathKind::River,
                    points,
                });
            }
        }
    }

    if toggles.enabled(LayerId::Roads) {
        for road in &park.roads {
            if let Some(points) = project_path(viewport, &road.coords) {
                let kind = if road.kind == "primary" {
                    PathKind::PrimaryRoad
                } else {
                    PathKind::SecondaryRoad
                };
                out.push(Drawable::Path { name: road.name.clone(), kind, points });
            }
        }
    }

    if toggles.enabled(LayerId::Trails) {
        for trail in &park.trails {
            if let Some(points) = project_path(viewport, &trail.coords) {
                out.push(Drawable::Path {
                    name: trail.name.clone(),
                    kind: PathKind::Trail,
                    points,
                });
            }
        }
    }

    if toggles.enabled(LayerId::Heatmap) {
        for bin in bins {
            let center = viewport.project(GeoPoint::new(bin.lat, bin.lng));
            if viewport.is_visible(center) {
                out.push(Drawable::Heat {
                    center,
                    radius: heat_radius(bin.intensity),
                    intensity: bin.intensity,
                });
            }
        }
    }

    if toggles.enabled(LayerId::Facilities) {
        for facility in &park.facilities {
            let at = viewport.project(facility.position());
            if viewport.is_visible(at) {
                out.push(Drawable::Facility {
                    name: facility.name.clone(),
                    kind: facility.kind.clone(),
                    at,
                });
            }
        }
    }

    if toggles.enabled(LayerId::Landmarks) {
        for landmark in &park.landmarks {
            let at = viewport.project(landmark.position());
            if viewport.is_visible(at) {
                out.push(Drawable::Landmark {
                    name: landmark.name.clone(),
                    icon: landmark.icon.clone(),
                    at,
                });
            }
        }
    }

    if toggles.enabled(LayerId::Markers) {
        for sighting in sightings {
            let at = viewport.project(sighting.coordinates);
            if viewport.is_visible(at) {
                out.push(Drawable::Marker {
                    id: sighting.id.clone(),
                    icon: sighting.icon(),
                    species: sighting.species.clone(),
                    threat: sighting.threat_level,
                    at,
                });
            }
        }
    }

    out
}

/// Project a polyline, dropping it entirely when no vertex is visible.
/// Partially visible paths keep all their points so segments crossing the
/// canvas edge still draw.
fn project_path(viewport: &Viewport, coords: &[GeoPoint]) -> Option<Vec<PixelPoint>> {
    let points: Vec<PixelPoint> = coords.iter().map(|&p| viewport.project(p)).collect();
    points.iter().any(|&p| viewport.is_visible(p)).then_some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::park::load_park_config;
    use crate::core::geo::PixelVec;
    use crate::rendering::heatmap::compute_bins;

    fn setup() -> (ParkConfig, Viewport) {
        let park = load_park_config().unwrap();
        let viewport = Viewport::new(park.bounds, &park.map);
        (park, viewport)
    }

    #[test]
    fn all_layers_present_at_default_view() {
        let (park, viewport) = setup();
        let sightings = vec![Sighting::new(
            "bison",
            "American Bison",
            GeoPoint::new(44.8652, -110.6808),
            "Herd grazing",
            ThreatLevel::Low,
            "user1",
        )];
        let bins = compute_bins(&[sightings[0].coordinates], park.map.grid_size);
        let toggles = LayerToggles::default();
        let drawables = build_drawables(&park, &sightings, &bins, &viewport, &toggles);

        assert!(drawables.iter().any(|d| matches!(d, Drawable::Water { .. })));
        assert!(drawables.iter().any(|d| matches!(d, Drawable::Path { kind: PathKind::PrimaryRoad, .. })));
        assert!(drawables.iter().any(|d| matches!(d, Drawable::Heat { .. })));
        assert!(drawables.iter().any(|d| matches!(d, Drawable::Landmark { .. })));
        assert!(drawables.iter().any(|d| matches!(d, Drawable::Marker { .. })));
    }

    #[test]
    fn toggled_off_layers_produce_nothing() {
        let (park, viewport) = setup();
        let mut toggles = LayerToggles::default();
        for id in LayerId::ALL {
            *toggles.flag_mut(id) = false;
        }
        let drawables = build_drawables(&park, &[], &[], &viewport, &toggles);
        assert!(drawables.is_empty());
    }

    #[test]
    fn far_pan_culls_everything() {
        let (park, mut viewport) = setup();
        viewport.pan(PixelVec::new(100_000.0, 100_000.0));
        let toggles = LayerToggles::default();
        let drawables = build_drawables(&park, &[], &[], &viewport, &toggles);
        assert!(drawables.is_empty());
    }
}
