// Keysim Command Binding
// A forward action paired with its undo action

use std::fmt;
use std::rc::Rc;

type CommandFn = Rc<dyn Fn() -> String>;

/// A command bound to a key under the Alt state.
///
/// `perform` runs when the key is pressed, `revert` runs when that press is
/// undone. Both return a short description of what happened.
#[derive(Clone)]
pub struct CommandBinding {
    perform: CommandFn,
    revert: CommandFn,
}

impl CommandBinding {
    /// Create a binding from two closures
    pub fn new<P, R>(perform: P, revert: R) -> Self
    where
        P: Fn() -> String + 'static,
        R: Fn() -> String + 'static,
    {
        Self {
            perform: Rc::new(perform),
            revert: Rc::new(revert),
        }
    }

    /// Create a binding whose actions just report fixed text
    pub fn from_text(perform: impl Into<String>, revert: impl Into<String>) -> Self {
        let perform = perform.into();
        let revert = revert.into();
        Self::new(move || perform.clone(), move || revert.clone())
    }

    /// Run the forward action
    pub fn perform(&self) -> String {
        (self.perform)()
    }

    /// Run the undo action
    pub fn revert(&self) -> String {
        (self.revert)()
    }
}

impl fmt::Debug for CommandBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBinding").finish_non_exhaustive()
    }
}
