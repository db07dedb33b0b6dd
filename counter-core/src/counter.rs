//! Bounded counter and display mode shared between interrupt and main loop

use portable_atomic::{AtomicU8, Ordering};
use crate::types::{DisplayMode, Snapshot};

/// Counter value and active mode
///
/// Each field is accessed with single-word atomics. `increment` reads the
/// mode, then updates the counter; a mode switch landing between the two
/// may let one step use the previous ceiling until the reset that follows.
pub struct CounterState {
    value: AtomicU8,
    mode: AtomicU8,
}

impl CounterState {
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(0),
            mode: AtomicU8::new(DisplayMode::Binary.to_raw()),
        }
    }

    /// Raise the counter unless it sits at the mode ceiling.
    /// Returns true if the value changed.
    pub fn increment(&self) -> bool {
        let ceiling = self.mode().max_value();
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |value| {
                if value < ceiling {
                    Some(value + 1)
                } else {
                    None
                }
            })
            .is_ok()
    }

    /// Lower the counter unless it is already zero.
    /// Returns true if the value changed.
    pub fn decrement(&self) -> bool {
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |value| value.checked_sub(1))
            .is_ok()
    }

    /// Flip the display mode and reset the counter.
    ///
    /// Main loop only; interrupt handlers raise the latch instead.
    pub fn apply_mode_toggle(&self) -> DisplayMode {
        let next = self.mode().toggled();
        self.mode.store(next.to_raw(), Ordering::Release);
        self.value.store(0, Ordering::Release);
        next
    }

    pub fn value(&self) -> u8 {
        self.value.load(Ordering::Acquire)
    }

    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_raw(self.mode.load(Ordering::Acquire))
    }

    /// Read mode and value for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode(),
            value: self.value(),
        }
    }

    /// Reset to power-on state (for testing)
    #[cfg(feature = "test-utils")]
    pub fn reset(&self) {
        self.mode.store(DisplayMode::Binary.to_raw(), Ordering::Release);
        self.value.store(0, Ordering::Release);
    }
}

impl Default for CounterState {
    fn default() -> Self {
        Self::new()
    }
}
