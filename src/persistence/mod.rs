pub mod config;
pub mod history;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot determine the {0} directory")]
    NoDirectory(&'static str),
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("invalid history file {}: {source}", path.display())]
    HistoryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Get or create the scical data directory (~/.local/share/scical/).
pub fn data_dir() -> Result<PathBuf, PersistError> {
    let dir = dirs::data_dir()
        .ok_or(PersistError::NoDirectory("data"))?
        .join("scical");
    std::fs::create_dir_all(&dir).map_err(|e| PersistError::io(&dir, e))?;
    Ok(dir)
}

/// Get or create the scical config directory (~/.config/scical/).
pub fn config_dir() -> Result<PathBuf, PersistError> {
    let dir = dirs::config_dir()
        .ok_or(PersistError::NoDirectory("config"))?
        .join("scical");
    std::fs::create_dir_all(&dir).map_err(|e| PersistError::io(&dir, e))?;
    Ok(dir)
}
