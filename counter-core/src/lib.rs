#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Counter Core
//!
//! Debounced, interrupt-driven counter logic for a three-button,
//! four-indicator panel. Button interrupts update shared atomic state;
//! a fixed-period main loop applies mode changes, renders and logs.

pub mod types;
pub mod debounce;
pub mod counter;
pub mod latch;
pub mod render;
pub mod controller;
pub mod cycle;
pub mod diagnostics;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use debounce::{accept, DebounceGate};
pub use counter::CounterState;
pub use latch::ModeLatch;
pub use render::{render, LedPattern};
pub use controller::*;
pub use cycle::*;
pub use diagnostics::*;
pub use hal::{ButtonInput, Duration, HalError, IndicatorBank, TickSource};
#[cfg(feature = "embassy-time")]
pub use hal::EmbassyClock;

/// Counter core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 50 ms global debounce, 100 ms render period
pub fn default_config() -> PanelConfig {
    PanelConfig {
        debounce_ms: DEBOUNCE_INTERVAL_MS,
        poll_period: Duration::from_millis(POLL_PERIOD_MS),
    }
}
