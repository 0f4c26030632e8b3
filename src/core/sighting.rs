//! Sighting records as stored in `sightings.json`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// How dangerous an encounter with the reported animal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Wildlife categories used for marker icons and the report form.
pub const WILDLIFE_KINDS: [&str; 7] = ["bear", "wolf", "bison", "elk", "eagle", "rare", "other"];

/// One reported sighting. Field names follow the persisted JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub species: String,
    pub coordinates: GeoPoint,
    /// ISO-8601 timestamp string.
    pub timestamp: String,
    pub reporter_id: String,
    pub description: String,
    pub threat_level: ThreatLevel,
    pub verified: bool,
    pub images: Vec<String>,
}

impl Sighting {
    /// Build a new, unverified sighting timestamped now. Coordinates are
    /// stored at domain precision (6 decimal places).
    pub fn new(
        kind: &str,
        species: &str,
        coordinates: GeoPoint,
        description: &str,
        threat_level: ThreatLevel,
        reporter_id: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            kind: kind.to_string(),
            species: species.to_string(),
            coordinates: coordinates.rounded(),
            timestamp: now.to_rfc3339(),
            reporter_id: reporter_id.to_string(),
            description: description.to_string(),
            threat_level,
            verified: false,
            images: Vec::new(),
        }
    }

    /// Marker emoji for this sighting's wildlife kind.
    pub fn icon(&self) -> &'static str {
        match self.kind.as_str() {
            "bear" => "🐻",
            "wolf" => "🐺",
            "bison" => "🦬",
            "elk" => "🦌",
            "eagle" => "🦅",
            "rare" => "🦁",
            _ => "🐾",
        }
    }
}

/// Narrows which sightings are shown on the map and in the recent list.
/// `None` on a field means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SightingFilter {
    pub kind: Option<String>,
    pub threat: Option<ThreatLevel>,
}

impl SightingFilter {
    pub fn matches(&self, sighting: &Sighting) -> bool {
        if let Some(kind) = &self.kind {
            if sighting.kind != *kind {
                return false;
            }
        }
        if let Some(threat) = self.threat {
            if sighting.threat_level != threat {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_original_field_names() {
        let s = Sighting {
            id: "1".into(),
            kind: "bear".into(),
            species: "Grizzly Bear".into(),
            coordinates: GeoPoint::new(44.428, -110.5885),
            timestamp: "2024-01-01T00:00:00+00:00".into(),
            reporter_id: "user1".into(),
            description: "Large grizzly near trail".into(),
            threat_level: ThreatLevel::High,
            verified: true,
            images: vec![],
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "bear");
        assert_eq!(json["reporterId"], "user1");
        assert_eq!(json["threatLevel"], "high");
        assert_eq!(json["coordinates"]["lng"], -110.5885);
    }

    #[test]
    fn round_trips_through_json() {
        let s = Sighting::new(
            "wolf",
            "Gray Wolf",
            GeoPoint::new(44.599_400_004, -110.5472),
            "Pack of three",
            ThreatLevel::Medium,
            "user2",
        );
        let back: Sighting = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(back.kind, "wolf");
        assert_eq!(back.threat_level, ThreatLevel::Medium);
        // stored at 6-decimal precision
        assert_eq!(back.coordinates.lat, 44.5994);
    }

    fn sample(kind: &str, threat: ThreatLevel) -> Sighting {
        Sighting::new(
            kind,
            "Something",
            GeoPoint::new(44.6, -110.5),
            "",
            threat,
            "user1",
        )
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = SightingFilter::default();
        assert!(filter.matches(&sample("bear", ThreatLevel::High)));
        assert!(filter.matches(&sample("other", ThreatLevel::Low)));
    }

    #[test]
    fn kind_filter_narrows_by_wildlife_type() {
        let filter = SightingFilter { kind: Some("wolf".to_string()), threat: None };
        assert!(filter.matches(&sample("wolf", ThreatLevel::Low)));
        assert!(!filter.matches(&sample("bear", ThreatLevel::Low)));
    }

    #[test]
    fn threat_filter_narrows_by_level() {
        let filter = SightingFilter { kind: None, threat: Some(ThreatLevel::High) };
        assert!(filter.matches(&sample("bear", ThreatLevel::High)));
        assert!(!filter.matches(&sample("bear", ThreatLevel::Medium)));
    }

    #[test]
    fn combined_filter_requires_both() {
        let filter = SightingFilter {
            kind: Some("bear".to_string()),
            threat: Some(ThreatLevel::High),
        };
        assert!(filter.matches(&sample("bear", ThreatLevel::High)));
        assert!(!filter.matches(&sample("bear", ThreatLevel::Low)));
        assert!(!filter.matches(&sample("wolf", ThreatLevel::High)));
    }
}
