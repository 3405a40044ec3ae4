// Keysim Key Type
// Represents a single named key on the simulated keyboard

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Names of the keys a freshly built keyboard knows about.
///
/// Only used to seed demos and configuration defaults; presses are never
/// validated against this list.
pub const DEFAULT_KEY_NAMES: &[&str] = &["q", "w", "e", "r", "shift", "alt"];

/// Represents a single keyboard key by name.
///
/// The name is immutable once created. Cloning is cheap since the
/// underlying string is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Arc<str>);

impl Key {
    /// Create a key from any string-like name
    pub fn new(name: impl AsRef<str>) -> Self {
        Key(Arc::from(name.as_ref()))
    }

    /// Get the name of this key
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The name rendered the way the Shift state shows it
    pub fn shifted(&self) -> String {
        self.0.to_uppercase()
    }
}

/// The built-in key set, in declaration order
pub fn default_keys() -> Vec<Key> {
    DEFAULT_KEY_NAMES.iter().map(Key::new).collect()
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::new(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key(Arc::from(name))
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets name-keyed maps be queried with a plain `&str`
impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::new(s))
    }
}
