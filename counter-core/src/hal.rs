//! Hardware Abstraction Layer for the counter panel

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::Duration;

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock duration type for compilation without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }
}

use embedded_hal::digital::{InputPin, OutputPin};
use crate::types::{Polarity, INDICATOR_COUNT};

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// The four indicator outputs
pub trait IndicatorBank {
    type Error: From<HalError>;

    /// Drive all outputs to `pattern` (index 0 = output 1)
    fn show(&mut self, pattern: [bool; INDICATOR_COUNT]) -> Result<(), Self::Error>;
}

/// A single button line
pub trait ButtonInput {
    type Error: From<HalError>;

    /// Raw electrical level (true = high)
    fn level(&mut self) -> Result<bool, Self::Error>;

    /// Wiring convention of this line
    fn polarity(&self) -> Polarity;

    /// Check if the button is currently pressed
    fn is_active(&mut self) -> Result<bool, Self::Error> {
        let polarity = self.polarity();
        Ok(polarity.is_active(self.level()?))
    }
}

/// Millisecond clock used for debouncing. Wraps at `u32::MAX`.
pub trait TickSource {
    fn now_ms(&self) -> u32;
}

/// Clock backed by the embassy time driver
#[cfg(feature = "embassy-time")]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl TickSource for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping behaviour the debounce filter expects
        Instant::now().as_millis() as u32
    }
}

/// Generic implementation for embedded-hal compatible output pins
pub struct EmbeddedHalIndicators<P> {
    pins: [P; INDICATOR_COUNT],
    inverted: bool,
}

impl<P> EmbeddedHalIndicators<P>
where
    P: OutputPin,
{
    pub fn new(pins: [P; INDICATOR_COUNT], inverted: bool) -> Self {
        Self { pins, inverted }
    }

    /// Give the pins back
    pub fn release(self) -> [P; INDICATOR_COUNT] {
        self.pins
    }
}

impl<P> IndicatorBank for EmbeddedHalIndicators<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn show(&mut self, pattern: [bool; INDICATOR_COUNT]) -> Result<(), Self::Error> {
        for (pin, on) in self.pins.iter_mut().zip(pattern) {
            let drive_high = on != self.inverted;
            if drive_high {
                pin.set_high().map_err(|_| HalError::GpioError)?;
            } else {
                pin.set_low().map_err(|_| HalError::GpioError)?;
            }
        }
        Ok(())
    }
}

/// Generic implementation for embedded-hal compatible input pins
pub struct EmbeddedHalButton<P> {
    pin: P,
    polarity: Polarity,
}

impl<P> EmbeddedHalButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> ButtonInput for EmbeddedHalButton<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn level(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high().map_err(|_| HalError::GpioError)
    }

    fn polarity(&self) -> Polarity {
        self.polarity
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::Cell;

    /// Records every pattern written to it
    #[derive(Default)]
    pub struct MockIndicators {
        current: [bool; INDICATOR_COUNT],
        writes: usize,
        fail_next: bool,
    }

    impl MockIndicators {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn current(&self) -> [bool; INDICATOR_COUNT] {
            self.current
        }

        pub fn writes(&self) -> usize {
            self.writes
        }

        /// Make the next `show` fail with a GPIO error
        pub fn fail_next(&mut self) {
            self.fail_next = true;
        }
    }

    impl IndicatorBank for MockIndicators {
        type Error = HalError;

        fn show(&mut self, pattern: [bool; INDICATOR_COUNT]) -> Result<(), Self::Error> {
            if self.fail_next {
                self.fail_next = false;
                return Err(HalError::GpioError);
            }
            self.current = pattern;
            self.writes += 1;
            Ok(())
        }
    }

    pub struct MockButton {
        level: Cell<bool>,
        polarity: Polarity,
    }

    impl MockButton {
        /// Create a released button for the given wiring
        pub fn new(polarity: Polarity) -> Self {
            let idle = matches!(polarity, Polarity::ActiveLow);
            Self {
                level: Cell::new(idle),
                polarity,
            }
        }

        pub fn set_pressed(&self, pressed: bool) {
            let level = match self.polarity {
                Polarity::ActiveLow => !pressed,
                Polarity::ActiveHigh => pressed,
            };
            self.level.set(level);
        }
    }

    impl ButtonInput for MockButton {
        type Error = HalError;

        fn level(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level.get())
        }

        fn polarity(&self) -> Polarity {
            self.polarity
        }
    }

    /// Manually advanced millisecond clock
    #[derive(Default)]
    pub struct MockClock {
        now: Cell<u32>,
    }

    impl MockClock {
        pub fn new(start_ms: u32) -> Self {
            Self { now: Cell::new(start_ms) }
        }

        /// Advance by `ms`, wrapping like the hardware counter
        pub fn advance(&self, ms: u32) -> u32 {
            let next = self.now.get().wrapping_add(ms);
            self.now.set(next);
            next
        }
    }

    impl TickSource for MockClock {
        fn now_ms(&self) -> u32 {
            self.now.get()
        }
    }
}
