// Keysim Config Parser - TOML with Serde
// Loads the key set, trigger table and initial Alt bindings

#![cfg(feature = "toml-config")]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::key::default_keys;
use crate::output::OutputSink;
use crate::{CommandBinding, Key, Keyboard, StateKind, TransitionTable};

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid binding: {0}")]
    InvalidBinding(String),

    #[error("Invalid trigger: {0}")]
    InvalidTrigger(String),
}

/// Root TOML table
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    keys: Option<KeysToml>,

    /// Trigger key name -> state name
    #[serde(default)]
    triggers: Option<HashMap<String, String>>,

    #[serde(default)]
    alt: Option<AltToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysToml {
    names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AltToml {
    #[serde(default)]
    bindings: Vec<BindingToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingToml {
    key: String,
    perform: Option<String>,
    revert: Option<String>,
}

/// A text binding as it appears in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSpec {
    pub key: Key,
    pub perform: String,
    pub revert: String,
}

impl BindingSpec {
    pub fn new(key: impl Into<Key>, perform: impl Into<String>, revert: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            perform: perform.into(),
            revert: revert.into(),
        }
    }

    pub fn to_binding(&self) -> CommandBinding {
        CommandBinding::from_text(self.perform.clone(), self.revert.clone())
    }
}

/// Keyboard configuration.
///
/// Sections missing from a file keep their built-in values; sections that
/// are present replace them entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Keys known to the demo driver, in order
    pub keys: Vec<Key>,
    pub transitions: TransitionTable,
    /// Initial Alt bindings
    pub alt_bindings: Vec<BindingSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: default_keys(),
            transitions: TransitionTable::standard(),
            alt_bindings: builtin_alt_bindings(),
        }
    }
}

/// Alt bindings a stock keyboard ships with
pub fn builtin_alt_bindings() -> Vec<BindingSpec> {
    vec![
        BindingSpec::new("q", "Open Browser", "Close Browser"),
        BindingSpec::new("w", "Open Console", "Close Console"),
    ]
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        let mut config = Self::default();

        if let Some(keys) = raw.keys {
            config.keys = keys.names.into_iter().map(Key::from).collect();
        }

        if let Some(triggers) = raw.triggers {
            let mut table = TransitionTable::empty();
            for (trigger, state) in triggers {
                if trigger.is_empty() {
                    return Err(ConfigError::InvalidTrigger(
                        "trigger key name is empty".to_string(),
                    ));
                }
                let target = StateKind::from_str(&state).map_err(|_| {
                    ConfigError::InvalidTrigger(format!(
                        "'{}' names unknown state '{}'",
                        trigger, state
                    ))
                })?;
                table.insert(Key::from(trigger), target);
            }
            config.transitions = table;
        }

        if let Some(alt) = raw.alt {
            config.alt_bindings = alt
                .bindings
                .into_iter()
                .map(parse_binding)
                .collect::<Result<_, _>>()?;
        }

        log::debug!(
            "loaded config: {} keys, {} triggers, {} alt bindings",
            config.keys.len(),
            config.transitions.len(),
            config.alt_bindings.len()
        );
        Ok(config)
    }

    /// Get the default config path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keysim").join("config.toml"))
    }

    /// Load from the default location, falling back to built-in values
    /// when no file exists
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::default())
    }

    /// Build a keyboard with this configuration's triggers and bindings
    pub fn build_keyboard<S: OutputSink>(&self, sink: S) -> Keyboard<S> {
        let mut keyboard = Keyboard::with_transitions(self.transitions.clone(), sink);
        for spec in &self.alt_bindings {
            keyboard.rebind_alt(spec.key.clone(), spec.to_binding());
        }
        keyboard
    }
}

fn parse_binding(raw: BindingToml) -> Result<BindingSpec, ConfigError> {
    if raw.key.is_empty() {
        return Err(ConfigError::InvalidBinding(
            "binding key name is empty".to_string(),
        ));
    }
    let perform = raw.perform.ok_or_else(|| {
        ConfigError::InvalidBinding(format!("alt+{} is missing 'perform'", raw.key))
    })?;
    let revert = raw.revert.ok_or_else(|| {
        ConfigError::InvalidBinding(format!("alt+{} is missing 'revert'", raw.key))
    })?;
    Ok(BindingSpec::new(raw.key, perform, revert))
}

/// Create default config content for a new installation
pub fn default_config_content() -> &'static str {
    r#"# Keysim Configuration
# Place this file at: ~/.config/keysim/config.toml

[keys]
# Keys pressed by the demo sequence, in order
names = ["q", "w", "e", "r", "shift", "alt"]

[triggers]
# Pressing a trigger switches the active state: default, shift or alt
shift = "shift"
alt = "alt"

[[alt.bindings]]
key = "q"
perform = "Open Browser"
revert = "Close Browser"

[[alt.bindings]]
key = "w"
perform = "Open Console"
revert = "Close Console"
"#
}
