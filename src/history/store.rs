//! In-memory history store.

use crate::types::{HistoryEntry, EMPTY_HISTORY_LINE};
use std::sync::Arc;

/// Immutable copy of the history at a point in time.
///
/// Snapshots share nothing with the live store: restoring one copies its
/// rows back in, so a retained snapshot can be restored any number of times.
#[derive(Clone, Debug, PartialEq)]
pub struct HistorySnapshot {
    entries: Arc<[HistoryEntry]>,
}

impl HistorySnapshot {
    /// Rows captured by this snapshot.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered list of history rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from rows, keeping their order.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Append a row.
    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Owned copy of every row in insertion order.
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// Borrowed view of the rows.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
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

    /// One formatted line per row, or a single `(no history)` line.
    pub fn format_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_HISTORY_LINE.to_string()];
        }
        self.entries.iter().map(HistoryEntry::format).collect()
    }

    /// Capture the current rows.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.as_slice().into(),
        }
    }

    /// Replace the current rows with a copy of the snapshot.
    pub fn restore(&mut self, snapshot: &HistorySnapshot) {
        self.entries = snapshot.entries.to_vec();
    }

    /// Replace the current rows wholesale.
    pub(crate) fn replace(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
    }
}
