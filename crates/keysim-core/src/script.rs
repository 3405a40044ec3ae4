// Keysim Step Scripts
// Text scripts of presses, undos and rebinds, plus the stock demo sequence

use std::fmt;
use std::str::FromStr;

use crate::output::OutputSink;
use crate::{CommandBinding, Key, Keyboard};

/// Separates the perform text from the revert text in a `rebind` step
const REBIND_SEPARATOR: &str = "=>";

/// A single scripted operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Press(Key),
    Undo,
    Rebind {
        key: Key,
        perform: String,
        revert: String,
    },
}

impl Step {
    /// Apply this step to a keyboard
    pub fn apply<S: OutputSink>(&self, keyboard: &mut Keyboard<S>) {
        match self {
            Step::Press(key) => {
                keyboard.press(key.clone());
            }
            Step::Undo => {
                keyboard.undo();
            }
            Step::Rebind {
                key,
                perform,
                revert,
            } => {
                keyboard.rebind_alt(
                    key.clone(),
                    CommandBinding::from_text(perform.clone(), revert.clone()),
                );
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Press(key) => write!(f, "press {}", key),
            Step::Undo => write!(f, "undo"),
            Step::Rebind {
                key,
                perform,
                revert,
            } => write!(f, "rebind {} {} {} {}", key, perform, REBIND_SEPARATOR, revert),
        }
    }
}

/// Errors from parsing a single step
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("'{command}' is missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

impl FromStr for Step {
    type Err = StepError;

    /// Accepted forms:
    ///   `undo`
    ///   `press <key>` or just `<key>`
    ///   `rebind <key> <perform text> => <revert text>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (command, rest) = match s.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (s, ""),
        };

        match command {
            "" => Err(StepError::UnknownCommand(String::new())),
            "undo" if rest.is_empty() => Ok(Step::Undo),
            "press" => {
                if rest.is_empty() {
                    return Err(StepError::MissingArgument {
                        command: "press",
                        argument: "a key name",
                    });
                }
                Ok(Step::Press(Key::new(rest)))
            }
            "rebind" => parse_rebind(rest),
            key if rest.is_empty() => Ok(Step::Press(Key::new(key))),
            _ => Err(StepError::UnknownCommand(s.to_string())),
        }
    }
}

fn parse_rebind(rest: &str) -> Result<Step, StepError> {
    let (key, texts) = match rest.split_once(char::is_whitespace) {
        Some((key, texts)) => (key, texts.trim()),
        None => (rest, ""),
    };
    if key.is_empty() {
        return Err(StepError::MissingArgument {
            command: "rebind",
            argument: "a key name",
        });
    }
    let Some((perform, revert)) = texts.split_once(REBIND_SEPARATOR) else {
        return Err(StepError::MissingArgument {
            command: "rebind",
            argument: "'<perform> => <revert>'",
        });
    };
    Ok(Step::Rebind {
        key: Key::new(key),
        perform: perform.trim().to_string(),
        revert: revert.trim().to_string(),
    })
}

/// A step that failed to parse, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    pub source: StepError,
}

/// An ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parse one step per line. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let step = line.parse::<Step>().map_err(|source| ScriptError {
                line: idx + 1,
                source,
            })?;
            steps.push(step);
        }
        Ok(Self { steps })
    }

    /// Parse each argument as one step, e.g. from a command line
    pub fn from_args<I, A>(args: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let steps = args
            .into_iter()
            .enumerate()
            .map(|(idx, arg)| {
                arg.as_ref().parse::<Step>().map_err(|source| ScriptError {
                    line: idx + 1,
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `keyboard`, in order
    pub fn run<S: OutputSink>(&self, keyboard: &mut Keyboard<S>) {
        for step in &self.steps {
            log::trace!("step: {}", step);
            step.apply(keyboard);
        }
    }
}

/// The stock demonstration sequence.
///
/// Expects the key set laid out as the first four letter keys followed by
/// the shift and alt triggers. Returns `None` if fewer than six keys are
/// given.
pub fn demo_script(keys: &[Key]) -> Option<Script> {
    if keys.len() < 6 {
        return None;
    }
    let press = |key: &Key| Step::Press(key.clone());

    let mut steps: Vec<Step> = keys[..4].iter().map(press).collect();
    steps.push(press(&keys[4]));
    steps.extend(keys.iter().map(press));
    steps.push(press(&keys[5]));
    steps.extend(keys[..2].iter().map(press));
    steps.push(Step::Undo);
    steps.push(Step::Rebind {
        key: keys[0].clone(),
        perform: "Open Notepad".to_string(),
        revert: "Close Notepad".to_string(),
    });
    steps.push(press(&keys[0]));

    Some(Script::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::default_keys;
    use crate::output::RecordingSink;

    #[test]
    fn test_parse_step_forms() {
        assert_eq!("undo".parse::<Step>().unwrap(), Step::Undo);
        assert_eq!("q".parse::<Step>().unwrap(), Step::Press(Key::new("q")));
        assert_eq!(
            "press shift".parse::<Step>().unwrap(),
            Step::Press(Key::new("shift"))
        );
        // A key literally named "undo" needs the explicit form
        assert_eq!(
            "press undo".parse::<Step>().unwrap(),
            Step::Press(Key::new("undo"))
        );
        assert_eq!(
            "rebind q Open Browser => Close Browser"
                .parse::<Step>()
                .unwrap(),
            Step::Rebind {
                key: Key::new("q"),
                perform: "Open Browser".to_string(),
                revert: "Close Browser".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_step_errors() {
        assert!(matches!(
            "press".parse::<Step>(),
            Err(StepError::MissingArgument { command: "press", .. })
        ));
        assert!(matches!(
            "rebind q Open Browser".parse::<Step>(),
            Err(StepError::MissingArgument { command: "rebind", .. })
        ));
        assert!(matches!(
            "jump over there".parse::<Step>(),
            Err(StepError::UnknownCommand(_))
        ));
        assert!(matches!(
            "undo twice".parse::<Step>(),
            Err(StepError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_step_display_parses_back() {
        let step = Step::Rebind {
            key: Key::new("w"),
            perform: "Open Console".to_string(),
            revert: "Close Console".to_string(),
        };
        assert_eq!(step.to_string().parse::<Step>().unwrap(), step);
    }

    #[test]
    fn test_script_parse_skips_comments() {
        let text = "# warm up\nq\n\nshift\n  q  \nundo\n";
        let script = Script::parse(text).unwrap();
        assert_eq!(script.len(), 4);
        assert_eq!(script.steps()[3], Step::Undo);
    }

    #[test]
    fn test_script_parse_reports_line() {
        let err = Script::parse("q\n\nrebind\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn test_script_from_args() {
        let script = Script::from_args(["q", "shift", "q", "undo"]).unwrap();
        assert_eq!(script.len(), 4);

        let err = Script::from_args(["q", "press"]).unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_script_run() {
        let script = Script::parse(
            "q\nshift\nq\nalt\nq\nrebind q Open Browser => Close Browser\nq\nundo\n",
        )
        .unwrap();
        let mut kb = Keyboard::with_sink(RecordingSink::new());
        script.run(&mut kb);

        assert_eq!(
            kb.sink().rendered(),
            vec![
                "q | press(q)",
                "Q | press(q)",
                "Open Browser | press(alt+q)",
                "Close Browser | press(alt+q)",
            ]
        );
    }

    #[test]
    fn test_demo_script_needs_six_keys() {
        assert!(demo_script(&default_keys()[..5]).is_none());
        let script = demo_script(&default_keys()).unwrap();
        // 4 + 1 + 6 + 1 + 2 presses, then undo, rebind, press
        assert_eq!(script.len(), 17);
    }

    #[test]
    fn test_demo_script_on_empty_alt() {
        let mut kb = Keyboard::with_sink(RecordingSink::new());
        demo_script(&default_keys()).unwrap().run(&mut kb);

        assert_eq!(
            kb.sink().rendered(),
            vec![
                "q | press(q)",
                "w | press(w)",
                "e | press(e)",
                "r | press(r)",
                "Q | press(q)",
                "W | press(w)",
                "E | press(e)",
                "R | press(r)",
                "Open Notepad | press(alt+q)",
            ]
        );
        assert_eq!(kb.history().len(), 10);
    }
}
