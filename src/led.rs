//! Status LED blink mode, set from the console with `led off|slow|fast`.
//!
//! The console task writes the mode, the driver loop reads it and asks
//! [`LedBlinker`] what level the pin should have right now.

use core::sync::atomic::{AtomicU8, Ordering};

/// Blink mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LedMode {
    Off = 0,
    Slow = 1,
    Fast = 2,
}

impl LedMode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LedMode::Slow,
            2 => LedMode::Fast,
            _ => LedMode::Off,
        }
    }

    /// Parse a console argument.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off" => Some(LedMode::Off),
            "slow" => Some(LedMode::Slow),
            "fast" => Some(LedMode::Fast),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LedMode::Off => "off",
            LedMode::Slow => "slow",
            LedMode::Fast => "fast",
        }
    }

    /// Time between toggles, `None` when the LED stays off.
    pub fn half_period_us(self) -> Option<i64> {
        match self {
            LedMode::Off => None,
            LedMode::Slow => Some(500_000),
            LedMode::Fast => Some(100_000),
        }
    }
}

/// Shared LED mode (console writes, driver loop reads).
pub struct LedState {
    mode: AtomicU8,
}

impl LedState {
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(LedMode::Off as u8),
        }
    }

    #[inline]
    pub fn set(&self, mode: LedMode) {
        self.mode.store(mode as u8, Ordering::Release);
    }

    #[inline]
    pub fn get(&self) -> LedMode {
        LedMode::from_u8(self.mode.load(Ordering::Acquire))
    }
}

impl Default for LedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the pin level from the mode and the clock.
pub struct LedBlinker;

impl LedBlinker {
    /// Level at `now_us`: on during even half periods, off during odd.
    pub fn level(mode: LedMode, now_us: i64) -> bool {
        match mode.half_period_us() {
            None => false,
            Some(half) => (now_us.max(0) / half) % 2 == 0,
        }
    }
}
