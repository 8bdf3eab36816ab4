//! Trigger Controller Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink    WifiAdapter   MonotonicClock│
//! │  (ActuatorPort)     (EventSink)     (Connectivity)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Sequencer · Dispatcher                                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TimerQueue (generation-stamped one-shots) · HTTP I/O task     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

mod esp_link_shims;

use std::net::TcpListener;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use triggerctl::adapters::hardware::HardwareAdapter;
use triggerctl::adapters::wifi::{ConnectivityPort, WifiAdapter};
use triggerctl::config::ControllerConfig;
use triggerctl::drivers::gpio::GpioOutput;
use triggerctl::drivers::hw_init;
use triggerctl::error::{Error, NetError};
use triggerctl::http::io_task;

/// Link supervision interval while connected.
const LINK_POLL_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Trigger Controller v{}           ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::load()?;
    info!(
        "Config: trigger=GPIO{} indicator=GPIO{} pulse={}ms half={}ms",
        config.trigger_pin,
        config.indicator_pin,
        config.pulse_duration_ms,
        config.half_duration_ms()
    );

    // ── 3. Outputs to idle before anything can fire ───────────
    let indicator_idle_high = config.indicator_active_low;
    hw_init::init_outputs(config.trigger_pin, config.indicator_pin, indicator_idle_high)
        .map_err(Error::from)?;
    let hw = HardwareAdapter::new(
        GpioOutput::new(config.trigger_pin),
        GpioOutput::new(config.indicator_pin),
        config.indicator_active_low,
    );

    // ── 4. WiFi station ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let driver = BlockingWifi::wrap(EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?, sysloop)?;

    let mut wifi = WifiAdapter::new(driver);
    wifi.set_credentials(&config.wifi_ssid, &config.wifi_password)?;
    if let Err(e) = wifi.connect() {
        warn!("WiFi: initial connect failed ({}), retrying", e);
    }
    while !wifi.is_connected() {
        std::thread::sleep(wifi.retry_delay());
        wifi.poll();
    }

    // ── 5. Listener + I/O thread ──────────────────────────────
    let listener =
        TcpListener::bind(("0.0.0.0", config.http_port)).map_err(|_| Error::Net(NetError::Bind))?;
    info!("HTTP server started on port {}", config.http_port);

    let _io = io_task::spawn(listener, config, hw)?;

    // ── 6. Link supervision ───────────────────────────────────
    loop {
        let delay = if wifi.is_connected() {
            LINK_POLL_INTERVAL
        } else {
            wifi.retry_delay()
        };
        std::thread::sleep(delay);
        wifi.poll();
    }
}
