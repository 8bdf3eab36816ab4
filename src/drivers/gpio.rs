//! Digital output pin driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the pin through `hw_init::gpio_write`.
//! On host/test: `gpio_write` is a no-op.

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::drivers::hw_init::{self, HwInitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub HwInitError);

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin addressed by raw GPIO number.  The pin must already be
/// configured by [`hw_init::init_outputs`].
#[derive(Debug)]
pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }

    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, high).map_err(GpioError)
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}
