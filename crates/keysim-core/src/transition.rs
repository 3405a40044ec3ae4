// Keysim State Transitions
// Maps modifier trigger keys to the state they switch to

use std::collections::HashMap;

use crate::{Key, StateKind};

/// Trigger key → target state.
///
/// Consulted before any dispatch: a press whose name is a trigger only
/// switches the active state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    triggers: HashMap<Key, StateKind>,
}

impl TransitionTable {
    /// A table with no triggers; every press dispatches
    pub fn empty() -> Self {
        Self {
            triggers: HashMap::new(),
        }
    }

    /// `shift` selects Shift, `alt` selects Alt
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.insert(Key::new("shift"), StateKind::Shift);
        table.insert(Key::new("alt"), StateKind::Alt);
        table
    }

    /// Register a trigger, returning the state it previously selected
    pub fn insert(&mut self, trigger: Key, target: StateKind) -> Option<StateKind> {
        self.triggers.insert(trigger, target)
    }

    pub fn remove(&mut self, trigger: &str) -> Option<StateKind> {
        self.triggers.remove(trigger)
    }

    /// The state a press of `name` switches to, if it is a trigger
    pub fn target(&self, name: &str) -> Option<StateKind> {
        self.triggers.get(name).copied()
    }

    pub fn is_trigger(&self, name: &str) -> bool {
        self.triggers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, StateKind)> {
        self.triggers.iter().map(|(k, s)| (k, *s))
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}
