//! Mode-dependent indicator patterns

use crate::types::{DisplayMode, INDICATOR_COUNT};

/// Map a counter value to the four indicator states.
///
/// Binary: output `i` carries bit `i` of the value.
/// Decimal: output `k` (1-based) is lit when the value is at least `k`.
pub fn render(mode: DisplayMode, value: u8) -> [bool; INDICATOR_COUNT] {
    let mut outputs = [false; INDICATOR_COUNT];
    for (i, output) in outputs.iter_mut().enumerate() {
        *output = match mode {
            DisplayMode::Binary => value & (1 << i) != 0,
            DisplayMode::Decimal => value as usize > i,
        };
    }
    outputs
}

/// Rendered indicator pattern
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedPattern(pub [bool; INDICATOR_COUNT]);

impl LedPattern {
    pub fn new(mode: DisplayMode, value: u8) -> Self {
        Self(render(mode, value))
    }

    /// Pattern packed LSB-first (output 1 = bit 0)
    pub fn bits(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |acc, (i, on)| if *on { acc | (1 << i) } else { acc })
    }

    /// Number of lit outputs
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|on| **on).count()
    }
}
