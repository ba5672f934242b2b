use super::keymap::KeyConfig;
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_RECENT_FILES: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub theme: PaletteType,
    pub focus_mode: bool,
    pub keys: KeyConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecentFiles {
    pub files: Vec<PathBuf>,
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("medwrite");
        path
    })
}

pub fn load_preferences() -> Preferences {
    config_dir()
        .map(|dir| load_preferences_from(&dir.join("config.toml")))
        .unwrap_or_default()
}

/// Missing or malformed files fall back to defaults.
pub fn load_preferences_from(path: &Path) -> Preferences {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Preferences::default();
    };
    match toml::from_str(&content) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
            Preferences::default()
        }
    }
}

pub fn load_recent_files_from(path: &Path) -> Vec<PathBuf> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str::<RecentFiles>(&content).ok())
        .map(|recent| recent.files)
        .unwrap_or_default()
}

pub fn save_recent_files_to(path: &Path, files: &[PathBuf]) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let recent = RecentFiles {
        files: files.to_vec(),
    };

    if let Ok(content) = toml::to_string(&recent) {
        if let Err(e) = std::fs::write(path, content) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save recent files");
        }
    }
}

/// Moves `path` to the front, dropping duplicates and anything past the cap.
pub fn push_recent(files: &mut Vec<PathBuf>, path: &Path) {
    files.retain(|p| p != path);
    files.insert(0, path.to_path_buf());
    files.truncate(MAX_RECENT_FILES);
}
