//! Hardware adapter: bridges the two output pins to [`ActuatorPort`].
//!
//! Owns the trigger and indicator pins and hides the indicator's wiring
//! polarity from the domain, which only ever speaks in "lit" / "dark".
//! Generic over `embedded_hal` output pins so host tests can plug in
//! recording fakes; on target both pins are [`GpioOutput`]s.
//!
//! [`GpioOutput`]: crate::drivers::gpio::GpioOutput

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::ActuatorPort;

/// Concrete adapter that combines both outputs behind [`ActuatorPort`].
pub struct HardwareAdapter<T, I> {
    trigger: T,
    indicator: I,
    indicator_active_low: bool,
}

impl<T: OutputPin, I: OutputPin> HardwareAdapter<T, I> {
    pub fn new(trigger: T, indicator: I, indicator_active_low: bool) -> Self {
        Self {
            trigger,
            indicator,
            indicator_active_low,
        }
    }

    /// Electrical level that lights (or darkens) the indicator.
    pub fn indicator_level(&self, lit: bool) -> PinState {
        PinState::from(lit != self.indicator_active_low)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<T: OutputPin, I: OutputPin> ActuatorPort for HardwareAdapter<T, I> {
    fn set_trigger(&mut self, active: bool) {
        if let Err(e) = self.trigger.set_state(PinState::from(active)) {
            warn!("hw: trigger write failed: {:?}", e);
        }
    }

    fn set_indicator(&mut self, lit: bool) {
        let level = self.indicator_level(lit);
        if let Err(e) = self.indicator.set_state(level) {
            warn!("hw: indicator write failed: {:?}", e);
        }
    }
}
