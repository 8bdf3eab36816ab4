//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the
//! ESP-IDF logger (UART / USB-CDC in production, stderr on host).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | outputs idle"),
            AppEvent::CommandHandled(cmd) => info!("CMD   | {:?}", cmd),
            AppEvent::Fired {
                variant,
                duration_ms,
                superseded,
            } => {
                if *superseded {
                    info!("FIRE  | {:?} {}ms (restarted in-flight pulse)", variant, duration_ms);
                } else {
                    info!("FIRE  | {:?} {}ms", variant, duration_ms);
                }
            }
            AppEvent::TriggerReleased => info!("FIRE  | trigger released"),
            AppEvent::AnimationFinished => debug!("LED   | animation finished"),
            AppEvent::StaleTimerDropped(id) => debug!("TIMER | stale {:?} dropped", id),
        }
    }
}
