//! Calculator state: last result, memory register, history and config.

pub mod history;
pub mod memory;

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::config::{self, Config, ConfigError};
use crate::format::{self, Notation};
use crate::lang::{self, error::CalcResult};
use crate::math::AngleMode;
use crate::persistence::history::SavedState;
use history::{History, HistoryEntry};
use memory::Memory;

/// One user's calculator state.
///
/// Nothing here is touched by a failed evaluation: [`Session::evaluate`]
/// commits `last_result` and history only after the whole pipeline succeeds.
#[derive(Debug, Clone)]
pub struct Session {
    last_result: f64,
    memory: Memory,
    history: History,
    config: Config,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            last_result: 0.0,
            memory: Memory::default(),
            history: History::new(config.max_history),
            config,
        }
    }

    /// Rebuild a session from persisted state, trimming history to the
    /// configured bound.
    pub fn restore(config: Config, state: SavedState) -> Self {
        Self {
            last_result: state.last_result,
            memory: Memory::new(state.memory),
            history: History::from_entries(state.history, config.max_history),
            config,
        }
    }

    pub fn snapshot(&self) -> SavedState {
        SavedState {
            last_result: self.last_result,
            memory: self.memory.recall(),
            history: self.history.recent(None),
        }
    }

    /// Evaluate one input line and commit the result.
    pub fn evaluate(&mut self, input: &str) -> CalcResult<f64> {
        let value = lang::evaluate(input, self.last_result, self.config.angle_mode)?;
        self.last_result = value;
        self.history.push(input.trim(), value);
        debug!("committed {} (history {})", value, self.history.len());
        Ok(value)
    }

    /// Render a value with the configured precision and notation.
    pub fn format(&self, value: f64) -> String {
        format::format_number(value, self.config.decimal_places, self.config.notation)
    }

    // --- Last result ---

    pub fn last_result(&self) -> f64 {
        self.last_result
    }

    pub fn set_last_result(&mut self, value: f64) {
        self.last_result = value;
    }

    // --- Memory ---

    /// Add to memory. Fails with `Overflow`, leaving memory as it was, when
    /// the sum is not finite.
    pub fn memory_add(&mut self, value: f64) -> CalcResult<()> {
        self.memory.add(value)
    }

    pub fn memory_subtract(&mut self, value: f64) -> CalcResult<()> {
        self.memory.subtract(value)
    }

    pub fn memory_clear(&mut self) {
        self.memory.clear();
    }

    pub fn memory_recall(&self) -> f64 {
        self.memory.recall()
    }

    pub fn memory_set(&mut self, value: f64) {
        self.memory.set(value);
    }

    // --- History ---

    pub fn append_history(&mut self, expression: &str, result: f64) {
        self.history.push(expression, result);
    }

    /// The last `limit` entries, most recent last.
    pub fn history(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        self.history.recent(limit)
    }

    pub fn search_history(&self, needle: &str) -> Vec<HistoryEntry> {
        self.history.search(needle)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // --- Config ---

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.config.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.config.angle_mode = mode;
    }

    pub fn decimal_places(&self) -> usize {
        self.config.decimal_places
    }

    pub fn set_decimal_places(&mut self, places: usize) -> Result<(), ConfigError> {
        self.config.decimal_places = config::check_decimal_places(places)?;
        Ok(())
    }

    pub fn notation(&self) -> Notation {
        self.config.notation
    }

    pub fn set_notation(&mut self, notation: Notation) {
        self.config.notation = notation;
    }

    pub fn max_history(&self) -> usize {
        self.config.max_history
    }

    /// Change the history bound. Shrinking drops the oldest entries.
    pub fn set_max_history(&mut self, max: usize) {
        self.config.max_history = max;
        self.history.set_capacity(max);
    }

    pub fn show_timestamps(&self) -> bool {
        self.config.show_timestamps
    }

    pub fn set_show_timestamps(&mut self, show: bool) {
        self.config.show_timestamps = show;
    }
}

/// A [`Session`] behind a lock, for sharing between threads.
///
/// Every call holds the lock for its whole duration, so the `ans` read and
/// the commit in [`SharedSession::evaluate`] cannot interleave with another
/// caller.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        // A panic in another holder cannot leave the session half-committed.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn evaluate(&self, input: &str) -> CalcResult<f64> {
        self.with(|session| session.evaluate(input))
    }

    pub fn snapshot(&self) -> SavedState {
        self.with(|session| session.snapshot())
    }
}
