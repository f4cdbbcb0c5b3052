//! GPIO HAL for the status LED.

use esp_idf_svc::hal::gpio::{Output, OutputPin, PinDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::sys::EspError;

use crate::led::{LedBlinker, LedState};

/// Status LED driven from the shared [`LedState`].
pub struct StatusLed<'d, T: OutputPin> {
    pin: PinDriver<'d, T, Output>,
    active_high: bool,
    lit: bool,
}

impl<'d, T: OutputPin> StatusLed<'d, T> {
    pub fn new(pin: impl Peripheral<P = T> + 'd, active_high: bool) -> Result<Self, EspError> {
        let mut led = Self {
            pin: PinDriver::output(pin)?,
            active_high,
            lit: true,
        };
        led.set(false)?;
        Ok(led)
    }

    /// Apply the level the current mode wants at `now_us`.
    pub fn update(&mut self, state: &LedState, now_us: i64) -> Result<(), EspError> {
        let want = LedBlinker::level(state.get(), now_us);
        if want != self.lit {
            self.set(want)?;
        }
        Ok(())
    }

    fn set(&mut self, lit: bool) -> Result<(), EspError> {
        self.pin.set_level((lit == self.active_high).into())?;
        self.lit = lit;
        Ok(())
    }
}
