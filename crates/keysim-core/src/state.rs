// Keysim States
// The three interpreters a key press can be routed through

use indexmap::IndexMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::output::TraceLine;
use crate::{CommandBinding, Key};

/// Identifies one of the three keyboard states.
///
/// History entries hold a `StateKind` rather than the state itself, so undo
/// always goes back through the state that handled the original press.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum StateKind {
    Default,
    Shift,
    Alt,
}

impl StateKind {
    /// Position of this state in the keyboard's state table
    pub const fn index(self) -> usize {
        match self {
            StateKind::Default => 0,
            StateKind::Shift => 1,
            StateKind::Alt => 2,
        }
    }

    /// Whether states of this kind keep a command registry
    pub const fn supports_bindings(self) -> bool {
        matches!(self, StateKind::Alt)
    }
}

/// Command registry held by the Alt state
pub type CommandRegistry = IndexMap<Key, CommandBinding>;

/// A keyboard state and whatever it needs to interpret presses.
///
/// Default and Shift format the key name and never hold bindings.
/// Alt looks the key up in its registry and runs the bound command.
#[derive(Debug, Clone)]
pub enum State {
    Default,
    Shift,
    Alt(CommandRegistry),
}

impl State {
    /// Create an empty state of the given kind
    pub fn new(kind: StateKind) -> Self {
        match kind {
            StateKind::Default => State::Default,
            StateKind::Shift => State::Shift,
            StateKind::Alt => State::Alt(CommandRegistry::new()),
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            State::Default => StateKind::Default,
            State::Shift => StateKind::Shift,
            State::Alt(_) => StateKind::Alt,
        }
    }

    /// Interpret a press of `key`.
    ///
    /// Returns the trace line to emit, or `None` when the press has no
    /// visible effect (an unbound key under Alt).
    pub fn handle(&self, key: &Key) -> Option<TraceLine> {
        match self {
            State::Default => Some(TraceLine::new(key.name(), key.name())),
            State::Shift => Some(TraceLine::new(key.shifted(), key.name())),
            State::Alt(commands) => {
                let Some(binding) = commands.get(key.name()) else {
                    log::trace!("alt+{} has no binding", key);
                    return None;
                };
                Some(TraceLine::new(binding.perform(), alt_chord(key)))
            }
        }
    }

    /// Undo a press of `key` that this state handled earlier.
    ///
    /// Only Alt has anything to undo, and only if the key is still bound.
    pub fn revert(&self, key: &Key) -> Option<TraceLine> {
        match self {
            State::Default | State::Shift => None,
            State::Alt(commands) => {
                let binding = commands.get(key.name())?;
                Some(TraceLine::new(binding.revert(), alt_chord(key)))
            }
        }
    }

    /// Bind `binding` to `key`, replacing any previous binding.
    ///
    /// Returns the replaced binding. Default and Shift ignore the request.
    pub fn rebind(&mut self, key: Key, binding: CommandBinding) -> Option<CommandBinding> {
        match self {
            State::Default | State::Shift => {
                log::trace!("{} state ignores rebind of {}", self.kind(), key);
                None
            }
            State::Alt(commands) => commands.insert(key, binding),
        }
    }

    /// Look up the binding for a key name
    pub fn binding(&self, name: &str) -> Option<&CommandBinding> {
        match self {
            State::Alt(commands) => commands.get(name),
            _ => None,
        }
    }

    /// Iterate over all bindings, in the order they were first bound
    pub fn bindings(&self) -> impl Iterator<Item = (&Key, &CommandBinding)> {
        let commands = match self {
            State::Alt(commands) => Some(commands),
            _ => None,
        };
        commands.into_iter().flat_map(|c| c.iter())
    }
}

fn alt_chord(key: &Key) -> String {
    format!("alt+{}", key)
}
