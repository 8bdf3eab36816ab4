//! Output drivers, hardware initialisation, and thread helpers.

pub mod gpio;
pub mod hw_init;
pub mod task_pin;
