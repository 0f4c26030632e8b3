//! Whole-file JSON persistence for sightings.
//!
//! The store is a flat `sightings.json` read and written in full per
//! operation, newest sighting first. No locking, no durability guarantees;
//! single-process desktop use.

use std::fs;
use std::path::PathBuf;

use chrono::{Duration, Utc};

use crate::core::geo::GeoPoint;
use crate::core::sighting::{Sighting, ThreatLevel};

use super::{StorageError, paths};

pub struct SightingStore {
    path: PathBuf,
}

impl SightingStore {
    /// Store at the standard application data path.
    pub fn open_default() -> Self {
        Self { path: paths::sightings_json_path() }
    }

    /// Store at an explicit path (tests, alternate data dirs).
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read all sightings, newest first. A missing file is seeded with the
    /// default data set and is not an error.
    pub fn load(&self) -> Result<Vec<Sighting>, StorageError> {
        if !self.path.exists() {
            eprintln!("[storage] no sighting file yet, seeding {}", self.path.display());
            let seeded = default_sightings();
            self.save(&seeded)?;
            return Ok(seeded);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the full list back, pretty-printed like the original store.
    pub fn save(&self, sightings: &[Sighting]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(sightings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Insert at the front (newest-first ordering) and persist.
    /// Returns the updated list.
    pub fn add(&self, sighting: Sighting) -> Result<Vec<Sighting>, StorageError> {
        let mut all = self.load()?;
        all.insert(0, sighting);
        self.save(&all)?;
        Ok(all)
    }

    /// Replace the sighting with a matching id. Returns the updated list,
    /// or `None` when the id is unknown.
    pub fn update(&self, sighting: &Sighting) -> Result<Option<Vec<Sighting>>, StorageError> {
        let mut all = self.load()?;
        match all.iter_mut().find(|s| s.id == sighting.id) {
            Some(slot) => {
                *slot = sighting.clone();
                self.save(&all)?;
                Ok(Some(all))
            }
            None => Ok(None),
        }
    }

    /// Delete by id. Returns the updated list, or `None` when the id is
    /// unknown.
    pub fn remove(&self, id: &str) -> Result<Option<Vec<Sighting>>, StorageError> {
        let mut all = self.load()?;
        let before = all.len();
        all.retain(|s| s.id != id);
        if all.len() == before {
            return Ok(None);
        }
        self.save(&all)?;
        Ok(Some(all))
    }
}

/// The seed data written when no sighting file exists yet.
fn default_sightings() -> Vec<Sighting> {
    let now = Utc::now();
    let entry = |id: &str,
                 kind: &str,
                 species: &str,
                 lat: f64,
                 lng: f64,
                 hours_ago: i64,
                 reporter: &str,
                 description: &str,
                 threat: ThreatLevel,
                 verified: bool| Sighting {
        id: id.to_string(),
        kind: kind.to_string(),
        species: species.to_string(),
        coordinates: GeoPoint::new(lat, lng),
        timestamp: (now - Duration::hours(hours_ago)).to_rfc3339(),
        reporter_id: reporter.to_string(),
        description: description.to_string(),
        threat_level: threat,
        verified,
        images: Vec::new(),
    };

    vec![
        entry(
            "1", "bear", "Grizzly Bear", 44.428, -110.5885, 0, "user1",
            "Large grizzly bear spotted near hiking trail",
            ThreatLevel::High, true,
        ),
        entry(
            "2", "wolf", "Gray Wolf", 44.5994, -110.5472, 1, "user2",
            "Pack of 3 wolves observed hunting",
            ThreatLevel::Medium, true,
        ),
        entry(
            "3", "rare", "Canada Lynx", 44.7291, -110.0584, 2, "user3",
            "Rare Canada Lynx sighting in daylight",
            ThreatLevel::High, false,
        ),
        entry(
            "4", "bison", "American Bison", 44.8652, -110.6808, 3, "user1",
            "Large herd of bison grazing in Lamar Valley",
            ThreatLevel::Low, true,
        ),
        entry(
            "5", "bison", "American Bison", 44.628, -110.2885, 4, "user2",
            "Bison spotted near the river.",
            ThreatLevel::Low, true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SightingStore) {
        let dir = TempDir::new().unwrap();
        let store = SightingStore::new(dir.path().join("sightings.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_seeded_with_defaults() {
        let (_dir, store) = temp_store();
        let all = store.load().unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].species, "Grizzly Bear");
        // seeding persisted the file
        let again = store.load().unwrap();
        assert_eq!(again.len(), 5);
    }

    #[test]
    fn add_inserts_newest_first() {
        let (_dir, store) = temp_store();
        store.load().unwrap();

        let new = Sighting::new(
            "eagle",
            "Bald Eagle",
            GeoPoint::new(44.9167, -110.2167),
            "Soaring over Lamar Valley",
            ThreatLevel::Low,
            "user4",
        );
        let id = new.id.clone();
        let all = store.add(new).unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, id);
    }

    #[test]
    fn update_replaces_matching_id_only() {
        let (_dir, store) = temp_store();
        let mut all = store.load().unwrap();

        all[2].verified = true;
        let updated = store.update(&all[2]).unwrap().unwrap();
        assert!(updated[2].verified);

        let mut ghost = all[0].clone();
        ghost.id = "no-such-id".into();
        assert!(store.update(&ghost).unwrap().is_none());
    }

    #[test]
    fn remove_deletes_by_id() {
        let (_dir, store) = temp_store();
        store.load().unwrap();

        let left = store.remove("3").unwrap().unwrap();
        assert_eq!(left.len(), 4);
        assert!(left.iter().all(|s| s.id != "3"));
        assert!(store.remove("3").unwrap().is_none());
    }

    #[test]
    fn corrupt_file_reports_parse_error() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path.clone(),
            "{ this is not json",
        )
        .unwrap();
        assert!(matches!(store.load(), Err(StorageError::Parse(_))));
    }
}
