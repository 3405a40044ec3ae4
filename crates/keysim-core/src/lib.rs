// Keysim Core Library
// State-dependent key dispatch with rebindable commands and undo

pub mod binding;
pub mod history;
pub mod key;
pub mod keyboard;
pub mod output;
pub mod script;
pub mod state;
pub mod transition;

#[cfg(feature = "toml-config")]
pub mod config;

pub use binding::CommandBinding;
pub use history::{History, HistoryEntry};
pub use key::{default_keys, Key, DEFAULT_KEY_NAMES};
pub use keyboard::{Keyboard, PressOutcome};
pub use output::{ConsoleSink, NullSink, OutputSink, RecordingSink, TraceLine};
pub use script::{demo_script, Script, ScriptError, Step, StepError};
pub use state::{CommandRegistry, State, StateKind};
pub use transition::TransitionTable;

#[cfg(feature = "toml-config")]
pub use config::{BindingSpec, Config, ConfigError};
