// Keysim Output Layer
// Trace lines emitted by dispatch and undo, and the sinks that receive them

use std::fmt;

/// One line of human-readable trace output.
///
/// `output` is what the press produced (the key itself, its uppercase form,
/// or a command's result) and `chord` is the press that produced it, e.g.
/// `q` or `alt+q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub output: String,
    pub chord: String,
}

impl TraceLine {
    pub fn new(output: impl Into<String>, chord: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            chord: chord.into(),
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | press({})", self.output, self.chord)
    }
}

/// Destination for trace lines
pub trait OutputSink {
    fn emit(&mut self, line: TraceLine);
}

/// Prints every line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn emit(&mut self, line: TraceLine) {
        println!("{}", line);
    }
}

/// Keeps every line in memory, in emission order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    lines: Vec<TraceLine>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines
    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    /// Recorded lines rendered as text
    pub fn rendered(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }

    /// The most recent line, if any
    pub fn last(&self) -> Option<&TraceLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drain all recorded lines
    pub fn take(&mut self) -> Vec<TraceLine> {
        std::mem::take(&mut self.lines)
    }
}

impl OutputSink for RecordingSink {
    fn emit(&mut self, line: TraceLine) {
        self.lines.push(line);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _line: TraceLine) {}
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, line: TraceLine) {
        (**self).emit(line);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn emit(&mut self, line: TraceLine) {
        (**self).emit(line);
    }
}
