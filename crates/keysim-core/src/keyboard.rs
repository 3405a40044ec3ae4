// Keysim Keyboard Controller
// Routes presses to the active state, records history and drives undo

use crate::history::{History, HistoryEntry};
use crate::output::{ConsoleSink, OutputSink};
use crate::state::{State, StateKind};
use crate::transition::TransitionTable;
use crate::{CommandBinding, Key};

/// What a single press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The key was a trigger and the active state changed to this one
    Switched(StateKind),
    /// The key was recorded and handled by this state
    Dispatched(StateKind),
}

/// The simulated keyboard.
///
/// Owns the three states, the trigger table, the history and the sink
/// that receives trace lines. All operations are synchronous and total:
/// unbound keys and empty history are silently ignored.
pub struct Keyboard<S: OutputSink = ConsoleSink> {
    states: [State; 3],
    current: StateKind,
    transitions: TransitionTable,
    history: History,
    sink: S,
}

impl Keyboard<ConsoleSink> {
    /// Create a keyboard printing to stdout, with standard triggers and no
    /// Alt bindings
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink)
    }
}

impl Default for Keyboard<ConsoleSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: OutputSink> Keyboard<S> {
    /// Create a keyboard with standard triggers writing to `sink`
    pub fn with_sink(sink: S) -> Self {
        Self::with_transitions(TransitionTable::standard(), sink)
    }

    /// Create a keyboard with a custom trigger table
    pub fn with_transitions(transitions: TransitionTable, sink: S) -> Self {
        Self {
            states: [
                State::new(StateKind::Default),
                State::new(StateKind::Shift),
                State::new(StateKind::Alt),
            ],
            current: StateKind::Default,
            transitions,
            history: History::new(),
            sink,
        }
    }

    /// Press a key.
    ///
    /// Trigger keys switch the active state and are not recorded. Any
    /// other key is pushed onto the history tagged with the active state,
    /// then handed to that state. The active state stays selected until
    /// the next trigger press.
    pub fn press(&mut self, key: impl Into<Key>) -> PressOutcome {
        let key = key.into();

        if let Some(target) = self.transitions.target(key.name()) {
            log::debug!("{} pressed: {} -> {}", key, self.current, target);
            self.current = target;
            return PressOutcome::Switched(target);
        }

        let kind = self.current;
        log::debug!("dispatching {} to {} state", key, kind);
        self.history.push(HistoryEntry::new(key.clone(), kind));

        if let Some(line) = self.states[kind.index()].handle(&key) {
            self.sink.emit(line);
        }
        PressOutcome::Dispatched(kind)
    }

    /// Undo the most recent dispatched press.
    ///
    /// The revert goes through the state that handled the original press,
    /// not the currently active one. Returns the consumed entry, or `None`
    /// if there was nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let Some(entry) = self.history.pop() else {
            log::trace!("undo with empty history");
            return None;
        };

        log::debug!("undoing {} from {} state", entry.key, entry.state);
        if let Some(line) = self.states[entry.state.index()].revert(&entry.key) {
            self.sink.emit(line);
        }
        Some(entry)
    }

    /// Bind a command to `key` under the Alt state.
    ///
    /// Replaces (and returns) any existing binding for the key.
    pub fn rebind_alt(
        &mut self,
        key: impl Into<Key>,
        binding: CommandBinding,
    ) -> Option<CommandBinding> {
        let key = key.into();
        log::debug!("rebinding alt+{}", key);
        self.states[StateKind::Alt.index()].rebind(key, binding)
    }

    /// The state currently interpreting presses
    pub fn current_state(&self) -> StateKind {
        self.current
    }

    pub fn state(&self, kind: StateKind) -> &State {
        &self.states[kind.index()]
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
