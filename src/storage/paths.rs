//! Application data paths.
//!
//! All persisted files live in one data directory, resolved once:
//! `$XDG_DATA_HOME/wildwatch`, falling back to `~/.local/share/wildwatch`,
//! and as a last resort the directory next to the executable.

use std::path::PathBuf;
use std::sync::OnceLock;

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Application data root, created on first use.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        let dir = resolve_data_dir();
        let _ = std::fs::create_dir_all(&dir);
        dir
    })
}

/// Full path of the sighting store.
pub fn sightings_json_path() -> PathBuf {
    data_dir().join("sightings.json")
}

/// Full path of the persisted UI state.
pub fn ui_state_json_path() -> PathBuf {
    data_dir().join("ui_state.json")
}

fn resolve_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        let p = PathBuf::from(xdg).join("wildwatch");
        if p.parent().map(|d| d.exists()).unwrap_or(false) {
            return p;
        }
    }
    if let Some(home) = std::env::var("HOME").ok().map(PathBuf::from) {
        return home.join(".local").join("share").join("wildwatch");
    }
    exe_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}
