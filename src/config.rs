//! Controller configuration parameters
//!
//! Every tunable consumed by the actuation core and the network listener.
//! Values are injected at boot; nothing in the core reads compiled-in
//! constants directly.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Upper bound on a single trigger pulse.  Anything longer is almost
/// certainly a unit mistake (seconds entered as milliseconds).
pub const MAX_PULSE_DURATION_MS: u32 = 10_000;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Pins ---
    /// GPIO driving the trigger actuator (active high)
    pub trigger_pin: i32,
    /// GPIO driving the indicator light
    pub indicator_pin: i32,
    /// Indicator is lit when its pin is LOW
    pub indicator_active_low: bool,

    // --- Actuation timing ---
    /// Full pulse duration (milliseconds); half fire uses the integer half
    pub pulse_duration_ms: u32,
    /// Indicator toggles per animation
    pub blink_steps: u8,
    /// Indicator tick period (milliseconds)
    pub blink_tick_ms: u32,
    /// Idle heartbeat period (milliseconds), 0 = disabled
    pub heartbeat_interval_ms: u32,

    // --- Network ---
    /// TCP port of the command listener
    pub http_port: u16,
    /// Per-connection request read deadline (milliseconds)
    pub request_timeout_ms: u32,
    /// Station SSID
    pub wifi_ssid: heapless::String<32>,
    /// Station password (empty for open networks)
    pub wifi_password: heapless::String<64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Pins
            trigger_pin: pins::TRIGGER_GPIO,
            indicator_pin: pins::INDICATOR_GPIO,
            indicator_active_low: pins::INDICATOR_ACTIVE_LOW,

            // Actuation timing
            pulse_duration_ms: 65,
            blink_steps: 10,  // 5 visible blinks
            blink_tick_ms: 50,
            heartbeat_interval_ms: 0,

            // Network
            http_port: 80,
            request_timeout_ms: 2_000,
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
        }
    }
}

impl ControllerConfig {
    /// Parse a JSON document (missing fields take their defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON document"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the actuation core cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.pulse_duration_ms == 0 || self.pulse_duration_ms > MAX_PULSE_DURATION_MS {
            return Err(Error::Config("pulse_duration_ms must be 1..=10000"));
        }
        if self.blink_tick_ms == 0 {
            return Err(Error::Config("blink_tick_ms must be non-zero"));
        }
        if !(0..=pins::MAX_GPIO).contains(&self.trigger_pin) {
            return Err(Error::Config("trigger_pin out of range"));
        }
        if !(0..=pins::MAX_GPIO).contains(&self.indicator_pin) {
            return Err(Error::Config("indicator_pin out of range"));
        }
        if self.trigger_pin == self.indicator_pin {
            return Err(Error::Config("trigger_pin and indicator_pin must differ"));
        }
        if self.http_port == 0 {
            return Err(Error::Config("http_port must be non-zero"));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::Config("request_timeout_ms must be non-zero"));
        }
        Ok(())
    }

    /// Pulse length of a half-duration fire (integer half, rounds down).
    pub fn half_duration_ms(&self) -> u32 {
        self.pulse_duration_ms / 2
    }

    /// Build-time configuration: defaults, then `TRIGGER_CONFIG_JSON`,
    /// then the `TRIGGER_WIFI_*` credentials on top.
    pub fn load() -> Result<Self> {
        let mut config = match option_env!("TRIGGER_CONFIG_JSON") {
            Some(json) => Self::from_json(json)?,
            None => Self::default(),
        };
        if let Some(ssid) = option_env!("TRIGGER_WIFI_SSID") {
            config.wifi_ssid = heapless::String::try_from(ssid)
                .map_err(|_| Error::Config("TRIGGER_WIFI_SSID longer than 32 bytes"))?;
        }
        if let Some(password) = option_env!("TRIGGER_WIFI_PASSWORD") {
            config.wifi_password = heapless::String::try_from(password)
                .map_err(|_| Error::Config("TRIGGER_WIFI_PASSWORD longer than 64 bytes"))?;
        }
        config.validate()?;
        Ok(config)
    }
}
