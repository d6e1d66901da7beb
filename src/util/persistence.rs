use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::app_state::PersistedState;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "QuoteEstimator";
const APP_NAME: &str = "QuoteEstimator";

const PREFERENCES_FILE: &str = "preferences.json";

/// Per-user config directory shared by preferences and the pricing override.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

fn data_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(PREFERENCES_FILE))
}

pub fn load_persisted_state() -> Option<PersistedState> {
    let path = data_file()?;
    let data = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => Some(state),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable preferences");
            None
        }
    }
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistSaveError> {
    let path = data_file().ok_or(PersistSaveError::StorageUnavailable)?;
    write_json(&path, state)?;
    tracing::debug!(path = %path.display(), "saved preferences");
    Ok(())
}

/// Pretty-prints `value` to `path`, creating parent directories.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;
    use crate::i18n::Locale;

    #[test]
    fn write_json_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("quote-estimator-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join(PREFERENCES_FILE);
        let state = PersistedState {
            locale: Locale::En,
            theme: Theme::Light,
        };

        write_json(&path, &state).unwrap();
        let data = fs::read_to_string(&path).unwrap();
        let parsed: PersistedState = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed, state);

        fs::remove_dir_all(dir).unwrap();
    }
}
