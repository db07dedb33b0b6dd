//! Line-oriented diagnostic output

use core::fmt::{self, Write};
use heapless::{Deque, String};
use crate::hal::HalError;
use crate::types::{DisplayMode, Snapshot};

/// Longest rendered diagnostic line
pub const LINE_CAPACITY: usize = 48;

/// Events the panel reports
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Diagnostic {
    /// Emitted once before the first cycle
    Started,
    /// A latched mode change was applied
    ModeChanged(DisplayMode),
    /// Per-cycle state line
    Status(Snapshot),
    /// Writing the indicators failed this cycle
    OutputFault(HalError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Started => write!(f, "Counter panel started"),
            Diagnostic::ModeChanged(mode) => write!(f, "Mode changed to: {}", mode.name()),
            Diagnostic::Status(snapshot) => {
                write!(f, "Mode: {}, Value: {}", snapshot.mode.name(), snapshot.value)
            }
            Diagnostic::OutputFault(err) => write!(f, "Indicator write failed: {}", err),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Diagnostic {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Diagnostic::Started => defmt::write!(f, "Counter panel started"),
            Diagnostic::ModeChanged(mode) => defmt::write!(f, "Mode changed to: {=str}", mode.name()),
            Diagnostic::Status(snapshot) => defmt::write!(
                f,
                "Mode: {=str}, Value: {=u8}",
                snapshot.mode.name(),
                snapshot.value
            ),
            Diagnostic::OutputFault(err) => defmt::write!(f, "Indicator write failed: {}", err),
        }
    }
}

impl Diagnostic {
    /// Render into a fixed-capacity line
    pub fn to_line(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        // Every variant fits in LINE_CAPACITY
        let _ = write!(line, "{}", self);
        line
    }

    /// True for faults that should be logged above info level
    pub const fn is_fault(&self) -> bool {
        matches!(self, Diagnostic::OutputFault(_))
    }
}

/// Destination for diagnostic lines
pub trait DiagnosticSink {
    fn record(&mut self, event: &Diagnostic);
}

/// Discards everything
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _event: &Diagnostic) {}
}

/// Keeps the `N` most recent lines, dropping the oldest
pub struct LineRecorder<const N: usize> {
    lines: Deque<String<LINE_CAPACITY>, N>,
    total: usize,
}

impl<const N: usize> LineRecorder<N> {
    pub const fn new() -> Self {
        Self {
            lines: Deque::new(),
            total: 0,
        }
    }

    /// Lines currently held, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    /// Most recent line
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(|line| line.as_str())
    }

    /// Lines recorded since creation, including dropped ones
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl<const N: usize> Default for LineRecorder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DiagnosticSink for LineRecorder<N> {
    fn record(&mut self, event: &Diagnostic) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let _ = self.lines.push_back(event.to_line());
        self.total += 1;
    }
}
