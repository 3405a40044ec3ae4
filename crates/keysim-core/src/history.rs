// Keysim History
// Stack of dispatched presses, consumed most-recent-first by undo

use crate::{Key, StateKind};

/// A single dispatched press and the state that handled it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub key: Key,
    pub state: StateKind,
}

impl HistoryEntry {
    pub fn new(key: Key, state: StateKind) -> Self {
        Self { key, state }
    }
}

/// Ordered record of past dispatches.
///
/// Modifier presses never land here, since they switch states rather than
/// dispatch anything.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the most recent entry
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
