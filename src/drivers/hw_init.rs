//! One-shot GPIO initialisation.
//!
//! Configures the trigger and indicator pins as push-pull outputs using
//! raw ESP-IDF sys calls and parks them at their idle levels.  Called once
//! from `main()` before any network activity.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::info;

use crate::error::Error;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    InvalidPin(i32),
    GpioConfigFailed(i32),
    GpioWriteFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPin(pin)      => write!(f, "GPIO{} is not a valid output", pin),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::GpioWriteFailed(rc)  => write!(f, "GPIO write failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::InvalidPin(pin) => Error::Gpio(pin),
            HwInitError::GpioConfigFailed(rc) | HwInitError::GpioWriteFailed(rc) => Error::Gpio(rc),
        }
    }
}

fn check_pin(pin: i32) -> Result<(), HwInitError> {
    if (0..=pins::MAX_GPIO).contains(&pin) {
        Ok(())
    } else {
        Err(HwInitError::InvalidPin(pin))
    }
}

// ── GPIO Outputs ──────────────────────────────────────────────

/// Configure `trigger` and `indicator` as outputs.  The trigger is driven
/// LOW; the indicator is driven to `indicator_idle_high`.
pub fn init_outputs(trigger: i32, indicator: i32, indicator_idle_high: bool) -> Result<(), HwInitError> {
    check_pin(trigger)?;
    check_pin(indicator)?;

    // SAFETY: called once from main() before the I/O thread exists.
    unsafe {
        configure_output(trigger, false)?;
        configure_output(indicator, indicator_idle_high)?;
    }

    info!(
        "hw_init: outputs configured (trigger=GPIO{} LOW, indicator=GPIO{} {})",
        trigger,
        indicator,
        if indicator_idle_high { "HIGH" } else { "LOW" }
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn configure_output(pin: i32, level: bool) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    gpio_write(pin, level)
}

#[cfg(not(target_os = "espidf"))]
unsafe fn configure_output(pin: i32, level: bool) -> Result<(), HwInitError> {
    log::debug!("hw_init(sim): GPIO{} -> {}", pin, level);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), HwInitError> {
    // SAFETY: gpio_set_level writes to an output pin configured by
    // init_outputs(); only the I/O thread drives it afterwards.
    let ret = unsafe { gpio_set_level(pin, if high { 1 } else { 0 }) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioWriteFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<(), HwInitError> {
    Ok(())
}
