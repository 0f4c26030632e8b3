//! The map canvas: paints drawables and feeds pointer events to the
//! interaction controller.
//!
//! All geometry comes out of [`build_drawables`] already projected and
//! culled; this module only converts between widget-space and the logical
//! canvas and turns drawables into painter calls.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

use crate::config::park::ParkConfig;
use crate::core::geo::{GeoPoint, PixelPoint};
use crate::core::sighting::{Sighting, ThreatLevel};
use crate::interaction::InteractionController;
use crate::rendering::heatmap::HeatBin;
use crate::rendering::layers::{Drawable, LayerToggles, PathKind, build_drawables};
use crate::rendering::viewport::Viewport;

/// Pixels around a marker center that still count as a hit.
const MARKER_HIT_RADIUS: f32 = 14.0;

pub struct MapResponse {
    /// In-bounds location pick (selection mode only).
    pub picked: Option<GeoPoint>,
    /// Id of a clicked sighting marker (browse mode only).
    pub marker_clicked: Option<String>,
    /// Geographic coordinate under the cursor.
    pub hover: Option<GeoPoint>,
}

pub fn show_map(
    ui: &mut Ui,
    park: &ParkConfig,
    sightings: &[Sighting],
    bins: &[HeatBin],
    viewport: &mut Viewport,
    controller: &mut InteractionController,
    toggles: &LayerToggles,
    heat_intensity: f32,
    selected: Option<&str>,
) -> MapResponse {
    let canvas = viewport.canvas();
    let desired = Vec2::new(canvas.width as f32, canvas.height as f32);
    let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

    let to_local = |pos: Pos2| -> PixelPoint {
        PixelPoint::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64)
    };
    let to_screen = |p: PixelPoint| -> Pos2 {
        Pos2::new(rect.left() + p.x as f32, rect.top() + p.y as f32)
    };

    // ── pointer events → controller ─────────────────────────
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            controller.pointer_down(to_local(pos));
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            if rect.contains(pos) {
                controller.pointer_move(to_local(pos), viewport);
            } else {
                // dragging off the canvas ends the gesture
                controller.pointer_left();
            }
        }
    }
    if response.drag_stopped() {
        controller.pointer_up();
    }

    let mut out = MapResponse {
        picked: None,
        marker_clicked: None,
        hover: None,
    };

    // ── painting ─────────────────────────────────────────────
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, Color32::from_rgb(26, 34, 24));

    if toggles.terrain {
        draw_terrain_grid(&painter, rect);
        draw_park_outline(&painter, viewport, to_screen);
    }

    // name labels clutter at low zoom, so they fade in as the user zooms
    let zoom = viewport.zoom();
    let drawables = build_drawables(park, sightings, bins, viewport, toggles);
    for drawable in &drawables {
        match drawable {
            Drawable::Water { name, points } => {
                let screen: Vec<Pos2> = points.iter().map(|&p| to_screen(p)).collect();
                let centroid = polygon_centroid(&screen);
                painter.add(Shape::convex_polygon(
                    screen,
                    Color32::from_rgba_unmultiplied(60, 120, 200, 160),
                    Stroke::new(1.0, Color32::from_rgb(80, 150, 230)),
                ));
                painter.text(
                    centroid,
                    Align2::CENTER_CENTER,
                    name,
                    FontId::proportional(10.0),
                    Color32::from_rgb(170, 210, 250),
                );
            }
            Drawable::Path { name, kind, points } => {
                draw_path(&painter, *kind, points, to_screen);
                if zoom >= 1.5 {
                    let mid = to_screen(points[points.len() / 2]);
                    painter.text(
                        mid + Vec2::new(0.0, -6.0),
                        Align2::CENTER_BOTTOM,
                        name,
                        FontId::proportional(9.0),
                        Color32::from_gray(170),
                    );
                }
            }
            Drawable::Heat { center, radius, intensity } => {
                // denser bins paint hotter, scaled by the user intensity slider
                let alpha = (heat_intensity * (40.0 + *intensity as f32 * 30.0)).min(180.0) as u8;
                painter.circle_filled(
                    to_screen(*center),
                    *radius as f32,
                    Color32::from_rgba_unmultiplied(255, 60, 0, alpha),
                );
            }
            Drawable::Facility { name, kind, at } => {
                let pos = to_screen(*at);
                let icon = match kind.as_str() {
                    "visitor_center" => "ℹ",
                    "lodging" => "🏨",
                    "camping" => "🏕",
                    _ => "•",
                };
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    icon,
                    FontId::proportional(12.0),
                    Color32::from_gray(220),
                );
                if zoom >= 2.0 {
                    painter.text(
                        pos + Vec2::new(0.0, 10.0),
                        Align2::CENTER_TOP,
                        name,
                        FontId::proportional(9.0),
                        Color32::from_gray(170),
                    );
                }
            }
            Drawable::Landmark { name, icon, at } => {
                let pos = to_screen(*at);
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    icon,
                    FontId::proportional(16.0),
                    Color32::WHITE,
                );
                painter.text(
                    pos + Vec2::new(0.0, 14.0),
                    Align2::CENTER_TOP,
                    name,
                    FontId::proportional(10.0),
                    Color32::from_gray(200),
                );
            }
            Drawable::Marker { id, icon, threat, at, .. } => {
                let pos = to_screen(*at);
                painter.circle_filled(pos, 12.0, marker_color(*threat));
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    icon,
                    FontId::proportional(14.0),
                    Color32::WHITE,
                );
                if selected == Some(id.as_str()) {
                    painter.circle_stroke(pos, 16.0, Stroke::new(2.0, Color32::from_rgb(80, 220, 220)));
                }
            }
        }
    }

    // ── hover ─────────────────────────────────────────────────
    if let Some(pos) = response.hover_pos() {
        let local = to_local(pos);
        if local.is_finite() {
            out.hover = Some(viewport.unproject(local));
        }
        if let Some((species, marker_pos)) = hovered_marker(&drawables, pos, to_screen) {
            draw_marker_tooltip(&painter, marker_pos, species);
        }
    }

    // ── clicks ────────────────────────────────────────────────
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if controller.is_selecting() {
                out.picked = controller.click(to_local(pos), viewport);
            } else {
                out.marker_clicked = hit_test_marker(&drawables, pos, to_screen);
            }
        }
    }

    // ── overlays ──────────────────────────────────────────────
    if controller.is_selecting() {
        painter.text(
            rect.center_top() + Vec2::new(0.0, 10.0),
            Align2::CENTER_TOP,
            "Click to select a location",
            FontId::proportional(13.0),
            Color32::from_rgb(120, 220, 120),
        );
    }
    painter.text(
        rect.left_bottom() + Vec2::new(8.0, -8.0),
        Align2::LEFT_BOTTOM,
        format!("Zoom: {:.1}x", viewport.zoom()),
        FontId::monospace(11.0),
        Color32::from_gray(180),
    );

    out
}

fn polygon_centroid(points: &[Pos2]) -> Pos2 {
    let n = points.len().max(1) as f32;
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Pos2::new(sum.x / n, sum.y / n)
}

fn marker_color(threat: ThreatLevel) -> Color32 {
    match threat {
        ThreatLevel::Low => Color32::from_rgb(70, 160, 70),
        ThreatLevel::Medium => Color32::from_rgb(230, 150, 40),
        ThreatLevel::High => Color32::from_rgb(220, 60, 60),
    }
}

fn draw_path(
    painter: &egui::Painter,
    kind: PathKind,
    points: &[PixelPoint],
    to_screen: impl Fn(PixelPoint) -> Pos2,
) {
    let screen: Vec<Pos2> = points.iter().map(|&p| to_screen(p)).collect();
    match kind {
        PathKind::PrimaryRoad => {
            painter.add(Shape::line(screen, Stroke::new(3.0, Color32::from_rgb(170, 150, 110))));
        }
        PathKind::SecondaryRoad => {
            painter.add(Shape::line(screen, Stroke::new(2.0, Color32::from_rgb(130, 115, 90))));
        }
        PathKind::River => {
            painter.add(Shape::line(screen, Stroke::new(2.0, Color32::from_rgb(80, 150, 230))));
        }
        PathKind::Trail => {
            painter.extend(Shape::dashed_line(
                &screen,
                Stroke::new(1.0, Color32::from_rgb(180, 180, 140)),
                6.0,
                4.0,
            ));
        }
    }
}

/// Faint coordinate grid, purely decorative.
fn draw_terrain_grid(painter: &egui::Painter, rect: Rect) {
    let step = 40.0;
    let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(200, 180, 80, 30));
    let mut x = rect.left();
    while x <= rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }
    let mut y = rect.top();
    while y <= rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

/// Outline of the park bounds under the current transform, so the user can
/// see where the valid domain ends when panned away.
fn draw_park_outline(
    painter: &egui::Painter,
    viewport: &Viewport,
    to_screen: impl Fn(PixelPoint) -> Pos2,
) {
    let b = viewport.bounds();
    let corners = [
        GeoPoint::new(b.north, b.west),
        GeoPoint::new(b.north, b.east),
        GeoPoint::new(b.south, b.east),
        GeoPoint::new(b.south, b.west),
    ];
    let screen: Vec<Pos2> = corners.iter().map(|&c| to_screen(viewport.project(c))).collect();
    painter.add(Shape::closed_line(
        screen,
        Stroke::new(1.5, Color32::from_rgba_unmultiplied(220, 200, 120, 120)),
    ));
}

fn hit_test_marker(
    drawables: &[Drawable],
    pointer: Pos2,
    to_screen: impl Fn(PixelPoint) -> Pos2,
) -> Option<String> {
    nearest_marker(drawables, pointer, &to_screen).map(|(id, _, _)| id.to_string())
}

fn hovered_marker<'a>(
    drawables: &'a [Drawable],
    pointer: Pos2,
    to_screen: impl Fn(PixelPoint) -> Pos2,
) -> Option<(&'a str, Pos2)> {
    nearest_marker(drawables, pointer, &to_screen).map(|(_, species, pos)| (species, pos))
}

fn nearest_marker<'a>(
    drawables: &'a [Drawable],
    pointer: Pos2,
    to_screen: &impl Fn(PixelPoint) -> Pos2,
) -> Option<(&'a str, &'a str, Pos2)> {
    let mut best: Option<(&str, &str, Pos2, f32)> = None;
    for drawable in drawables {
        if let Drawable::Marker { id, species, at, .. } = drawable {
            let pos = to_screen(*at);
            let dist = pos.distance(pointer);
            if dist <= MARKER_HIT_RADIUS && best.map(|(_, _, _, d)| dist < d).unwrap_or(true) {
                best = Some((id, species, pos, dist));
            }
        }
    }
    best.map(|(id, species, pos, _)| (id, species, pos))
}

fn draw_marker_tooltip(painter: &egui::Painter, marker_pos: Pos2, species: &str) {
    let anchor = marker_pos + Vec2::new(0.0, -18.0);
    let galley_rect = painter
        .text(
            anchor,
            Align2::CENTER_BOTTOM,
            species,
            FontId::proportional(11.0),
            Color32::WHITE,
        )
        .expand(4.0);
    // backdrop drawn after the text measures itself; repaint text on top
    painter.rect_filled(galley_rect, 3.0, Color32::from_black_alpha(190));
    painter.text(
        anchor,
        Align2::CENTER_BOTTOM,
        species,
        FontId::proportional(11.0),
        Color32::WHITE,
    );
}
