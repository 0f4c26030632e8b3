//! Persisted UI state (`ui_state.json`).
//!
//! Layer toggles and the last viewport are one typed document written whole,
//! in the same read/write style as the sighting store. A missing file is not
//! an error; first launch starts from the defaults.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::rendering::layers::LayerToggles;

use super::{StorageError, paths};

/// The viewport position restored on startup. `zoom` is re-clamped by
/// [`Viewport::restore`](crate::rendering::viewport::Viewport::restore), so a
/// hand-edited file cannot push the view out of range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub zoom: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { zoom: 1.0, x: 0.0, y: 0.0 }
    }
}

/// Everything the app remembers between runs. Fields missing from the file
/// fall back to their defaults individually.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiState {
    pub layers: LayerToggles,
    pub view: ViewState,
}

pub struct UiStateStore {
    path: PathBuf,
}

impl UiStateStore {
    /// Store at the standard application data path.
    pub fn open_default() -> Self {
        Self { path: paths::ui_state_json_path() }
    }

    /// Store at an explicit path (tests, alternate data dirs).
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the saved state. A missing file yields the defaults.
    pub fn load(&self) -> Result<UiState, StorageError> {
        if !self.path.exists() {
            return Ok(UiState::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, state: &UiState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, UiStateStore) {
        let dir = TempDir::new().unwrap();
        let store = UiStateStore::new(dir.path().join("ui_state.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_dir, store) = temp_store();
        let state = store.load().unwrap();
        assert!(state.layers.heatmap);
        assert_eq!(state.view.zoom, 1.0);
        assert_eq!(state.view.x, 0.0);
    }

    #[test]
    fn saved_state_round_trips() {
        let (_dir, store) = temp_store();
        let mut state = UiState::default();
        state.layers.trails = false;
        state.view = ViewState { zoom: 2.25, x: 120.0, y: -33.5 };
        store.save(&state).unwrap();

        let back = store.load().unwrap();
        assert!(!back.layers.trails);
        assert!(back.layers.roads);
        assert_eq!(back.view.zoom, 2.25);
        assert_eq!(back.view.y, -33.5);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let (_dir, store) = temp_store();
        fs::write(store.path.clone(), r#"{ "view": { "zoom": 3.0 } }"#).unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.view.zoom, 3.0);
        assert_eq!(state.view.x, 0.0);
        assert!(state.layers.markers);
    }

    #[test]
    fn corrupt_file_reports_parse_error() {
        let (_dir, store) = temp_store();
        fs::write(store.path.clone(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(StorageError::Parse(_))));
    }
}
