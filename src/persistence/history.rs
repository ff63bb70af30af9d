use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::PersistError;
use crate::session::history::HistoryEntry;

/// Everything a session carries between runs besides its config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedState {
    pub last_result: f64,
    pub memory: f64,
    /// Oldest first.
    pub history: Vec<HistoryEntry>,
}

/// Path to the history file.
pub fn history_path() -> Result<PathBuf, PersistError> {
    Ok(super::data_dir()?.join("history.json"))
}

/// Load saved state from disk. A missing file is an empty state.
pub fn load_history_from(path: &Path) -> Result<SavedState, PersistError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SavedState::default()),
        Err(e) => return Err(PersistError::io(path, e)),
    };
    let state: SavedState =
        serde_json::from_str(&content).map_err(|e| PersistError::HistoryFormat {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!(
        "loaded {} history entries from {}",
        state.history.len(),
        path.display()
    );
    Ok(state)
}

/// Save state to disk, replacing the previous file.
pub fn save_history_to(path: &Path, state: &SavedState) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(state).map_err(|e| PersistError::HistoryFormat {
        path: path.to_path_buf(),
        source: e,
    })?;
    // Write beside the target and rename so a crash never leaves half a file.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| PersistError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| PersistError::io(path, e))?;
    debug!("saved {} history entries", state.history.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_history_from(&dir.path().join("history.json")).unwrap();
        assert_eq!(state, SavedState::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let state = SavedState {
            last_result: 9.0,
            memory: -2.5,
            history: vec![
                HistoryEntry::new("4 + 4", 8.0),
                HistoryEntry::new("ans + 1", 9.0),
            ],
        };
        save_history_to(&path, &state).unwrap();
        let loaded = load_history_from(&path).unwrap();
        assert_eq!(loaded.last_result, 9.0);
        assert_eq!(loaded.memory, -2.5);
        assert_eq!(loaded.history.len(), 2);
        assert_eq!(loaded.history[1].expression, "ans + 1");
        assert_eq!(loaded.history[0].timestamp, state.history[0].timestamp);
        assert!(!dir.path().join("history.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_history_from(&path),
            Err(PersistError::HistoryFormat { .. })
        ));
    }
}
