use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: f64,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
            timestamp: Local::now(),
        }
    }

    pub fn timestamp_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Bounded calculation log. Once full, every push evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Build from saved entries (oldest first), keeping the newest `capacity`.
    pub fn from_entries(entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            history.push_entry(entry);
        }
        history
    }

    pub fn push(&mut self, expression: impl Into<String>, result: f64) {
        self.push_entry(HistoryEntry::new(expression, result));
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The last `limit` entries (all when `None`), most recent last.
    pub fn recent(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        let skip = match limit {
            Some(n) => self.entries.len().saturating_sub(n),
            None => 0,
        };
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Entries whose expression contains `needle`, oldest first.
    pub fn search(&self, needle: &str) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.expression.contains(needle))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Change the bound; shrinking drops the oldest entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
    }
}
