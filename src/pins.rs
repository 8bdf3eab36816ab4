//! Default GPIO assignments for the controller board.
//!
//! Single source of truth for the factory pin map.  The running firmware
//! takes its pin numbers from [`ControllerConfig`](crate::config::ControllerConfig);
//! these constants only seed its defaults.

// ---------------------------------------------------------------------------
// Trigger actuator (MOSFET / relay driver)
// ---------------------------------------------------------------------------

/// Digital output: HIGH energises the trigger mechanism.
pub const TRIGGER_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Indicator light
// ---------------------------------------------------------------------------

/// Built-in LED.  Wired active-low: LOW = lit, HIGH = dark.
pub const INDICATOR_GPIO: i32 = 2;
/// Electrical polarity of [`INDICATOR_GPIO`].
pub const INDICATOR_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Highest GPIO number present on any supported ESP32 variant (S3).
pub const MAX_GPIO: i32 = 48;
