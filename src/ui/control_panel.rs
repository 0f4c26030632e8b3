use egui::Ui;

use crate::core::sighting::{Sighting, SightingFilter, ThreatLevel, WILDLIFE_KINDS};
use crate::rendering::layers::{LayerId, LayerToggles};

/// How many of the newest visible sightings the panel lists.
const RECENT_COUNT: usize = 5;

// ── action returned to the app ──────────────────────────────

#[derive(Debug, Clone)]
pub struct ControlAction {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub zoom_reset: bool,
    pub layers_changed: bool,
    pub filters_changed: bool,
    pub select_sighting: Option<String>,
    pub open_report: bool,
    pub refresh_now: bool,
}

impl ControlAction {
    pub fn none() -> Self {
        Self {
            zoom_in: false,
            zoom_out: false,
            zoom_reset: false,
            layers_changed: false,
            filters_changed: false,
            select_sighting: None,
            open_report: false,
            refresh_now: false,
        }
    }
}

// ── panel rendering ─────────────────────────────────────────

pub fn show_control_panel(
    ui: &mut Ui,
    toggles: &mut LayerToggles,
    filter: &mut SightingFilter,
    selecting: &mut bool,
    heat_intensity: &mut f32,
    zoom: f64,
    visible: &[Sighting],
    total: usize,
) -> ControlAction {
    let mut action = ControlAction::none();

    ui.heading("Map Controls");
    ui.separator();

    // ── reporting ──
    if ui.button("📍 Report a sighting").clicked() {
        action.open_report = true;
    }
    ui.checkbox(selecting, "Select location on map");
    if *selecting {
        ui.small("Click the map to pick coordinates; panning is off.");
    }

    ui.separator();

    // ── layers ──
    ui.label("Layers");
    for id in LayerId::ALL {
        if ui.checkbox(toggles.flag_mut(id), id.label()).changed() {
            action.layers_changed = true;
        }
    }
    ui.add_enabled_ui(toggles.heatmap, |ui| {
        ui.add(egui::Slider::new(heat_intensity, 0.1..=1.0).text("Heat intensity"));
    });

    ui.separator();

    // ── filters ──
    ui.label("Filters");
    let before = filter.clone();
    egui::ComboBox::from_label("Type")
        .selected_text(filter.kind.as_deref().unwrap_or("All"))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut filter.kind, None, "All");
            for kind in WILDLIFE_KINDS {
                ui.selectable_value(&mut filter.kind, Some(kind.to_string()), kind);
            }
        });
    egui::ComboBox::from_label("Threat")
        .selected_text(filter.threat.map(ThreatLevel::label).unwrap_or("Any"))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut filter.threat, None, "Any");
            for level in [ThreatLevel::Low, ThreatLevel::Medium, ThreatLevel::High] {
                ui.selectable_value(&mut filter.threat, Some(level), level.label());
            }
        });
    if *filter != before {
        action.filters_changed = true;
    }

    ui.separator();

    // ── zoom ──
    ui.label("Zoom");
    ui.horizontal(|ui| {
        if ui.button("+").clicked() {
            action.zoom_in = true;
        }
        if ui.button("-").clicked() {
            action.zoom_out = true;
        }
        if ui.button("Reset").clicked() {
            action.zoom_reset = true;
        }
        ui.label(format!("{zoom:.1}x"));
    });

    ui.separator();

    // ── recent sightings (newest first, post-filter) ──
    ui.label(format!("Sightings: {} of {}", visible.len(), total));
    for sighting in visible.iter().take(RECENT_COUNT) {
        if ui
            .button(format!("{} {}", sighting.icon(), sighting.species))
            .clicked()
        {
            action.select_sighting = Some(sighting.id.clone());
        }
    }
    if ui.button("🔄 Refresh now").clicked() {
        action.refresh_now = true;
    }

    action
}
