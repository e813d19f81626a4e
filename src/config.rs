//! Board-level settings.

use crate::pins::Pin;

/// Frequency of the external crystal fitted to the board.
pub const HSE_HZ: u32 = 8_000_000;

/// SysTick interrupt rate; one tick per millisecond.
pub const TICK_HZ: u32 = 1_000;

/// Push button, active low, needs the internal pull-up.
pub const BUTTON: Pin = Pin::Pa6;

/// Indicator light, active low.
pub const LIGHT: Pin = Pin::Pa4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub hse_hz: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            hse_hz: HSE_HZ,
        }
    }
}
