//! User-facing display and evaluation settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::Notation;
use crate::math::AngleMode;

/// Largest accepted `decimal_places`; f64 carries no more than this.
pub const MAX_DECIMAL_PLACES: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown angle mode \"{0}\": expected \"degrees\" or \"radians\"")]
    UnknownAngleMode(String),
    #[error("unknown notation \"{0}\": expected \"fixed\" or \"scientific\"")]
    UnknownNotation(String),
    #[error("decimal places must be between 0 and {max}, got {0}", max = MAX_DECIMAL_PLACES)]
    DecimalPlacesOutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digits after the decimal point when formatting results.
    pub decimal_places: usize,
    pub angle_mode: AngleMode,
    pub notation: Notation,
    /// Maximum number of history entries to keep.
    pub max_history: usize,
    /// Show timestamps when listing history.
    pub show_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decimal_places: 10,
            angle_mode: AngleMode::Degrees,
            notation: Notation::Fixed,
            max_history: 100,
            show_timestamps: true,
        }
    }
}

impl Config {
    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn sanitized(mut self) -> Self {
        self.decimal_places = self.decimal_places.min(MAX_DECIMAL_PLACES);
        self
    }
}

pub fn check_decimal_places(places: usize) -> Result<usize, ConfigError> {
    if places > MAX_DECIMAL_PLACES {
        Err(ConfigError::DecimalPlacesOutOfRange(places))
    } else {
        Ok(places)
    }
}
