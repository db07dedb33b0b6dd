//! Global debounce filter
//!
//! All three buttons share one watermark: an accepted event on any channel
//! suppresses events on every channel for the following interval.

use portable_atomic::{AtomicU32, Ordering};

/// Returns true if an event at `now` lies more than `interval` after the
/// last accepted event. Timestamps wrap at `u32::MAX`.
pub const fn accept(now: u32, last_accepted: u32, interval: u32) -> bool {
    now.wrapping_sub(last_accepted) > interval
}

/// Shared last-accepted-time watermark
/// Safe for use in interrupt contexts
pub struct DebounceGate {
    last_accepted: AtomicU32,
}

impl DebounceGate {
    pub const fn new() -> Self {
        Self {
            last_accepted: AtomicU32::new(0),
        }
    }

    /// Check `now` against the watermark and advance it when accepted
    pub fn try_accept(&self, now: u32, interval: u32) -> bool {
        let last = self.last_accepted.load(Ordering::Acquire);
        if accept(now, last, interval) {
            self.last_accepted.store(now, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Timestamp of the last accepted event
    pub fn watermark(&self) -> u32 {
        self.last_accepted.load(Ordering::Acquire)
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}
