//! Report-a-sighting form.
//!
//! Coordinates arrive either from a map pick (selection mode) or from the
//! manual lat/lng fields. Manual input is parsed locally; a bad number or an
//! out-of-bounds location shows a validation message and never reaches the
//! store.

use egui::{ComboBox, Context, Window};

use crate::core::geo::{GeoBounds, GeoPoint};
use crate::core::sighting::{Sighting, ThreatLevel, WILDLIFE_KINDS};

/// Reporter id attached to locally created sightings (no accounts).
const LOCAL_REPORTER: &str = "user1";

pub struct SightingForm {
    pub open: bool,
    kind: String,
    species: String,
    description: String,
    threat: ThreatLevel,
    lat_text: String,
    lng_text: String,
    error: Option<String>,
}

impl Default for SightingForm {
    fn default() -> Self {
        Self {
            open: false,
            kind: "bear".to_string(),
            species: String::new(),
            description: String::new(),
            threat: ThreatLevel::Low,
            lat_text: String::new(),
            lng_text: String::new(),
            error: None,
        }
    }
}

impl SightingForm {
    /// Open with empty fields.
    pub fn open_blank(&mut self) {
        *self = Self { open: true, ..Self::default() };
    }

    /// Fill the coordinate fields from a map pick (already in-bounds).
    pub fn set_location(&mut self, p: GeoPoint) {
        self.lat_text = format!("{:.6}", p.lat);
        self.lng_text = format!("{:.6}", p.lng);
        self.error = None;
    }

    /// Show the window. Returns a sighting on a valid submit.
    pub fn show(&mut self, ctx: &Context, bounds: GeoBounds) -> Option<Sighting> {
        if !self.open {
            return None;
        }

        let mut submitted = None;
        let mut keep_open = true;

        Window::new("📍 Report a Sighting")
            .open(&mut keep_open)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ComboBox::from_label("Type")
                    .selected_text(self.kind.clone())
                    .show_ui(ui, |ui| {
                        for kind in WILDLIFE_KINDS {
                            ui.selectable_value(&mut self.kind, kind.to_string(), kind);
                        }
                    });

                ui.horizontal(|ui| {
                    ui.label("Species:");
                    ui.text_edit_singleline(&mut self.species);
                });

                ui.label("Description:");
                ui.text_edit_multiline(&mut self.description);

                ui.label("Threat level:");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut self.threat, ThreatLevel::Low, "Low");
                    ui.radio_value(&mut self.threat, ThreatLevel::Medium, "Medium");
                    ui.radio_value(&mut self.threat, ThreatLevel::High, "High");
                });

                ui.separator();
                ui.label("Location (decimal degrees):");
                ui.horizontal(|ui| {
                    ui.label("Lat:");
                    ui.text_edit_singleline(&mut self.lat_text);
                });
                ui.horizontal(|ui| {
                    ui.label("Lng:");
                    ui.text_edit_singleline(&mut self.lng_text);
                });
                ui.small("Tip: enable \"Select location on map\" and click the map.");

                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
                }

                ui.separator();
                if ui.button("Submit report").clicked() {
                    match self.validate(bounds) {
                        Ok(sighting) => submitted = Some(sighting),
                        Err(message) => self.error = Some(message),
                    }
                }
            });

        self.open = keep_open && submitted.is_none();
        submitted
    }

    /// Build a sighting from the current fields, or explain what's wrong.
    fn validate(&self, bounds: GeoBounds) -> Result<Sighting, String> {
        let species = self.species.trim();
        if species.is_empty() {
            return Err("Species is required".to_string());
        }

        let lat = parse_coordinate(&self.lat_text, "Latitude")?;
        let lng = parse_coordinate(&self.lng_text, "Longitude")?;
        let point = GeoPoint::new(lat, lng);
        if !bounds.contains(point) {
            return Err(format!(
                "({lat:.4}, {lng:.4}) is outside the park boundary"
            ));
        }

        Ok(Sighting::new(
            &self.kind,
            species,
            point,
            self.description.trim(),
            self.threat,
            LOCAL_REPORTER,
        ))
    }
}

fn parse_coordinate(text: &str, which: &str) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("{which} is not a valid number"))?;
    // f64 parsing accepts "NaN" and "inf"; neither is a coordinate
    if !value.is_finite() {
        return Err(format!("{which} is not a valid number"));
    }
    Ok(value)
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

    fn filled_form() -> SightingForm {
        SightingForm {
            open: true,
            kind: "elk".to_string(),
            species: "Rocky Mountain Elk".to_string(),
            description: "Bull elk near the road".to_string(),
            threat: ThreatLevel::Low,
            lat_text: "44.65".to_string(),
            lng_text: "-110.4833".to_string(),
            error: None,
        }
    }

    #[test]
    fn valid_input_builds_a_sighting() {
        let s = filled_form().validate(BOUNDS).unwrap();
        assert_eq!(s.kind, "elk");
        assert_eq!(s.coordinates, GeoPoint::new(44.65, -110.4833));
        assert!(!s.verified);
    }

    #[test]
    fn unparseable_latitude_fails_locally() {
        let mut form = filled_form();
        form.lat_text = "forty-four".to_string();
        let err = form.validate(BOUNDS).unwrap_err();
        assert!(err.contains("Latitude"));
    }

    #[test]
    fn nan_input_is_rejected() {
        let mut form = filled_form();
        form.lng_text = "NaN".to_string();
        assert!(form.validate(BOUNDS).is_err());
    }

    #[test]
    fn out_of_bounds_location_is_rejected() {
        let mut form = filled_form();
        form.lat_text = "46.0".to_string();
        let err = form.validate(BOUNDS).unwrap_err();
        assert!(err.contains("outside the park"));
    }

    #[test]
    fn missing_species_is_rejected() {
        let mut form = filled_form();
        form.species = "   ".to_string();
        assert!(form.validate(BOUNDS).is_err());
    }
}
