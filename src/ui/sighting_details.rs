use egui::{Color32, Context, RichText, Window};

use crate::core::sighting::{Sighting, ThreatLevel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsAction {
    None,
    Close,
    Verify,
    Delete,
}

fn threat_color(level: ThreatLevel) -> Color32 {
    match level {
        ThreatLevel::Low => Color32::from_rgb(100, 200, 100),
        ThreatLevel::Medium => Color32::from_rgb(240, 160, 60),
        ThreatLevel::High => Color32::from_rgb(230, 70, 70),
    }
}

/// Read-only view of the selected sighting, with verify/delete controls.
pub fn show_sighting_details(ctx: &Context, sighting: &Sighting) -> DetailsAction {
    let mut action = DetailsAction::None;
    let mut keep_open = true;

    Window::new(format!("{} {}", sighting.icon(), sighting.species))
        .open(&mut keep_open)
        .resizable(false)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Threat:");
                ui.colored_label(
                    threat_color(sighting.threat_level),
                    sighting.threat_level.label(),
                );
                if sighting.verified {
                    ui.label(RichText::new("✔ verified").color(Color32::from_rgb(100, 180, 255)));
                }
            });

            ui.label(format!("Location: {}", sighting.coordinates));
            ui.label(format!("Reported: {}", sighting.timestamp));
            ui.label(format!("Reporter: {}", sighting.reporter_id));

            if !sighting.description.is_empty() {
                ui.separator();
                ui.label(&sighting.description);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if !sighting.verified && ui.button("Mark verified").clicked() {
                    action = DetailsAction::Verify;
                }
                if ui.button("🗑 Delete").clicked() {
                    action = DetailsAction::Delete;
                }
            });
        });

    if !keep_open && action == DetailsAction::None {
        action = DetailsAction::Close;
    }
    action
}
