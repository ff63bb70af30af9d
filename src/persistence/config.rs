use std::path::{Path, PathBuf};

use log::debug;

use super::PersistError;
use crate::config::Config;

/// Path to the config file.
pub fn config_path() -> Result<PathBuf, PersistError> {
    Ok(super::config_dir()?.join("config.toml"))
}

/// Load config from `path`. A missing file yields the defaults and is
/// created with comments so it can be edited by hand.
pub fn load_config_from(path: &Path) -> Result<Config, PersistError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let config: Config = toml::from_str(&content).map_err(|e| {
                PersistError::ConfigFormat {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
            debug!("loaded config from {}", path.display());
            Ok(config.sanitized())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Create default config file on first run
            let config = Config::default();
            write_default_config(path, &config)?;
            Ok(config)
        }
        Err(e) => Err(PersistError::io(path, e)),
    }
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<(), PersistError> {
    let body = toml::to_string_pretty(config)?;
    let content = format!("# scical configuration\n\n{}", body);
    std::fs::write(path, content.as_bytes()).map_err(|e| PersistError::io(path, e))?;
    debug!("saved config to {}", path.display());
    Ok(())
}

/// Write a default config file with comments.
fn write_default_config(path: &Path, config: &Config) -> Result<(), PersistError> {
    let content = format!(
        "# scical configuration\n\
         \n\
         # Digits after the decimal point (0-{})\n\
         decimal_places = {}\n\
         \n\
         # Angle unit for trigonometry: \"degrees\" or \"radians\"\n\
         angle_mode = \"{}\"\n\
         \n\
         # Result notation: \"fixed\" or \"scientific\"\n\
         notation = \"{}\"\n\
         \n\
         # Maximum number of history entries to keep\n\
         max_history = {}\n\
         \n\
         # Show timestamps when listing history\n\
         show_timestamps = {}\n",
        crate::config::MAX_DECIMAL_PLACES,
        config.decimal_places,
        config.angle_mode,
        config.notation,
        config.max_history,
        config.show_timestamps,
    );
    std::fs::write(path, content.as_bytes()).map_err(|e| PersistError::io(path, e))
}
