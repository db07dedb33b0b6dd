//! Mode button edge latch
//!
//! The mode button interrupt fires on every level change. Only a rising
//! transition (the button is pulled down) that passes the debounce gate
//! raises the pending flag; the main loop clears it exactly once.

use portable_atomic::{AtomicBool, Ordering};
use crate::debounce::DebounceGate;

pub struct ModeLatch {
    last_level: AtomicBool,
    pending: AtomicBool,
}

impl ModeLatch {
    pub const fn new() -> Self {
        Self {
            last_level: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    /// Feed a level-change notification (called from interrupt handler).
    /// Returns true if this event raised the pending flag.
    pub fn on_level_change(&self, level: bool, now: u32, gate: &DebounceGate, interval: u32) -> bool {
        if level == self.last_level.load(Ordering::Acquire) {
            return false;
        }
        self.last_level.store(level, Ordering::Release);

        if level && gate.try_accept(now, interval) {
            self.pending.store(true, Ordering::Release);
            return true;
        }
        false
    }

    /// Consume the pending flag
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Last level observed on the mode button
    pub fn last_level(&self) -> bool {
        self.last_level.load(Ordering::Acquire)
    }

    /// Reset latch state (for testing)
    #[cfg(feature = "test-utils")]
    pub fn reset(&self) {
        self.last_level.store(false, Ordering::Release);
        self.pending.store(false, Ordering::Release);
    }
}

impl Default for ModeLatch {
    fn default() -> Self {
        Self::new()
    }
}
