//! Shared panel state and interrupt entry points

use crate::counter::CounterState;
use crate::debounce::DebounceGate;
use crate::latch::ModeLatch;
use crate::types::{ButtonId, DisplayMode, Snapshot, DEBOUNCE_INTERVAL_MS};

/// Result of feeding one edge to the controller
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Counter changed
    Applied,
    /// Accepted, but the counter was already at its bound
    Clamped,
    /// Mode change latched for the main loop
    Latched,
    /// Rejected by the debounce gate
    Suppressed,
    /// Not an active edge for this channel
    Ignored,
}

impl EdgeOutcome {
    /// True if the edge passed the debounce gate
    pub const fn was_accepted(&self) -> bool {
        matches!(self, EdgeOutcome::Applied | EdgeOutcome::Clamped | EdgeOutcome::Latched)
    }
}

/// Counter panel state shared between interrupt handlers and the main loop
///
/// Interrupt-side methods only touch single-word atomics and never block.
pub struct CounterController {
    gate: DebounceGate,
    counter: CounterState,
    latch: ModeLatch,
    debounce_ms: u32,
}

impl CounterController {
    /// Create a controller with the default debounce interval
    pub const fn new() -> Self {
        Self::with_debounce(DEBOUNCE_INTERVAL_MS)
    }

    pub const fn with_debounce(debounce_ms: u32) -> Self {
        Self {
            gate: DebounceGate::new(),
            counter: CounterState::new(),
            latch: ModeLatch::new(),
            debounce_ms,
        }
    }

    /// Increase button pressed (called from interrupt handler)
    pub fn on_increase_edge(&self, now: u32) -> EdgeOutcome {
        if !self.gate.try_accept(now, self.debounce_ms) {
            return EdgeOutcome::Suppressed;
        }
        if self.counter.increment() {
            EdgeOutcome::Applied
        } else {
            EdgeOutcome::Clamped
        }
    }

    /// Decrease button pressed (called from interrupt handler)
    pub fn on_decrease_edge(&self, now: u32) -> EdgeOutcome {
        if !self.gate.try_accept(now, self.debounce_ms) {
            return EdgeOutcome::Suppressed;
        }
        if self.counter.decrement() {
            EdgeOutcome::Applied
        } else {
            EdgeOutcome::Clamped
        }
    }

    /// Mode button changed level (called from interrupt handler)
    pub fn on_mode_level(&self, level: bool, now: u32) -> EdgeOutcome {
        let previous = self.latch.last_level();
        if self.latch.on_level_change(level, now, &self.gate, self.debounce_ms) {
            EdgeOutcome::Latched
        } else if level && level != previous {
            // Rising edge that lost against the debounce gate
            EdgeOutcome::Suppressed
        } else {
            EdgeOutcome::Ignored
        }
    }

    /// Dispatch an interrupt with the level read right after it
    ///
    /// Increase and Decrease count every edge that reaches them, whatever
    /// the line reads by then; only Mode looks at the level.
    pub fn on_edge(&self, button: ButtonId, level: bool, now: u32) -> EdgeOutcome {
        match button {
            ButtonId::Increase => self.on_increase_edge(now),
            ButtonId::Decrease => self.on_decrease_edge(now),
            ButtonId::Mode => self.on_mode_level(level, now),
        }
    }

    /// Apply a latched mode change (main loop only).
    /// Returns the new mode if one was pending.
    pub fn take_mode_change(&self) -> Option<DisplayMode> {
        if self.latch.take_pending() {
            Some(self.counter.apply_mode_toggle())
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.counter.snapshot()
    }

    pub fn mode(&self) -> DisplayMode {
        self.counter.mode()
    }

    pub fn value(&self) -> u8 {
        self.counter.value()
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// True while a mode change waits for the main loop
    pub fn mode_change_pending(&self) -> bool {
        self.latch.is_pending()
    }

    /// Timestamp of the last accepted button event on any channel
    pub fn debounce_watermark(&self) -> u32 {
        self.gate.watermark()
    }
}

#[cfg(feature = "test-utils")]
impl CounterController {
    /// Return counter and latch to power-on state (for testing).
    /// The debounce watermark is left in place.
    pub fn reset(&self) {
        self.counter.reset();
        self.latch.reset();
    }
}

impl Default for CounterController {
    fn default() -> Self {
        Self::new()
    }
}
