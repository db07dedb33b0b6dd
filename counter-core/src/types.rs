//! Core data types for the counter panel

use crate::hal::Duration;

/// Debounce interval shared by all three buttons (milliseconds)
pub const DEBOUNCE_INTERVAL_MS: u32 = 50;

/// Main loop render period (milliseconds)
pub const POLL_PERIOD_MS: u64 = 100;

/// Highest counter value in binary mode
pub const BINARY_MAX: u8 = 15;

/// Highest counter value in decimal mode
pub const DECIMAL_MAX: u8 = 4;

/// Number of indicator outputs
pub const INDICATOR_COUNT: usize = 4;

/// Display modes
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Counter shown as a 4-bit binary number
    Binary,
    /// Counter shown as a bar of lit indicators
    Decimal,
}

impl DisplayMode {
    /// Returns the ceiling the counter is clamped to in this mode
    pub const fn max_value(&self) -> u8 {
        match self {
            DisplayMode::Binary => BINARY_MAX,
            DisplayMode::Decimal => DECIMAL_MAX,
        }
    }

    /// Returns the other mode
    pub const fn toggled(&self) -> DisplayMode {
        match self {
            DisplayMode::Binary => DisplayMode::Decimal,
            DisplayMode::Decimal => DisplayMode::Binary,
        }
    }

    /// Human readable name used in log lines
    pub const fn name(&self) -> &'static str {
        match self {
            DisplayMode::Binary => "Binary",
            DisplayMode::Decimal => "Decimal",
        }
    }

    pub(crate) const fn to_raw(self) -> u8 {
        match self {
            DisplayMode::Binary => 0,
            DisplayMode::Decimal => 1,
        }
    }

    pub(crate) const fn from_raw(raw: u8) -> DisplayMode {
        match raw {
            1 => DisplayMode::Decimal,
            _ => DisplayMode::Binary,
        }
    }
}

/// Electrical convention of a button input
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pulled up, reads low while pressed
    ActiveLow,
    /// Pulled down, reads high while pressed
    ActiveHigh,
}

impl Polarity {
    /// Returns true if `level` (true = high) denotes a press
    pub const fn is_active(&self, level: bool) -> bool {
        match self {
            Polarity::ActiveLow => !level,
            Polarity::ActiveHigh => level,
        }
    }
}

/// Interrupt trigger a channel is configured with
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    FallingEdge,
    AnyEdge,
}

impl Trigger {
    /// True if a transition ending at `level` raises the interrupt
    pub const fn fires_on(&self, level: bool) -> bool {
        match self {
            Trigger::FallingEdge => !level,
            Trigger::AnyEdge => true,
        }
    }

    /// Rising-edge enable for the EXTI line
    pub const fn rising(&self) -> bool {
        matches!(self, Trigger::AnyEdge)
    }

    /// Falling-edge enable for the EXTI line
    pub const fn falling(&self) -> bool {
        true
    }
}

/// Button channel identification
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Raises the counter
    Increase,
    /// Lowers the counter
    Decrease,
    /// Switches between binary and decimal display
    Mode,
}

impl ButtonId {
    /// Wiring convention of this channel
    pub const fn polarity(&self) -> Polarity {
        match self {
            ButtonId::Increase | ButtonId::Decrease => Polarity::ActiveLow,
            ButtonId::Mode => Polarity::ActiveHigh,
        }
    }

    /// Edge the interrupt for this channel fires on
    pub const fn trigger(&self) -> Trigger {
        match self {
            ButtonId::Increase | ButtonId::Decrease => Trigger::FallingEdge,
            ButtonId::Mode => Trigger::AnyEdge,
        }
    }
}

/// Counter value together with the mode it was read under
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub mode: DisplayMode,
    pub value: u8,
}

impl Snapshot {
    /// Power-on state
    pub const fn initial() -> Self {
        Self {
            mode: DisplayMode::Binary,
            value: 0,
        }
    }
}

/// Panel configuration parameters
#[derive(Copy, Clone, Debug)]
pub struct PanelConfig {
    /// Minimum spacing between accepted button events
    pub debounce_ms: u32,
    /// Render and log period of the main loop
    pub poll_period: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_INTERVAL_MS,
            poll_period: Duration::from_millis(POLL_PERIOD_MS),
        }
    }
}

impl PanelConfig {
    /// Create a new configuration with validation
    pub fn new(debounce_ms: u32, poll_period_ms: u64) -> Result<Self, &'static str> {
        if debounce_ms == 0 || debounce_ms > 1000 {
            return Err("Debounce must be between 1 and 1000ms");
        }
        if poll_period_ms < 10 || poll_period_ms > 10_000 {
            return Err("Poll period must be between 10 and 10000ms");
        }

        Ok(Self {
            debounce_ms,
            poll_period: Duration::from_millis(poll_period_ms),
        })
    }
}
