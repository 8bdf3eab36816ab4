//! Hand-off between the serve and actuate futures.
//!
//! Both futures run on the same executor thread, so a `NoopRawMutex`
//! signal is enough: no critical section, no statics.  The slot holds one
//! request; a newer request overwrites one the actuator has not picked up
//! yet, so the last command of a burst is the one that sets the deadline.
//!
//! ```text
//! ┌──────────────┐ ActuationRequest ┌───────────────┐
//! │    serve     │─────────────────▶│    actuate    │
//! │  (dispatch)  │  (latest wins)   │  (sequencer)  │
//! └──────────────┘                  └───────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use log::debug;

use crate::app::commands::ActuationRequest;
use crate::app::ports::ActuationPort;

pub type ActuationSignal = Signal<NoopRawMutex, ActuationRequest>;

/// [`ActuationPort`] that posts into the actuator task's slot.
pub struct SignalActuation<'a> {
    signal: &'a ActuationSignal,
}

impl<'a> SignalActuation<'a> {
    pub fn new(signal: &'a ActuationSignal) -> Self {
        Self { signal }
    }
}

impl ActuationPort for SignalActuation<'_> {
    fn request(&mut self, request: ActuationRequest) {
        if self.signal.signaled() {
            debug!("actuation {:?} supersedes a pending request", request);
        }
        self.signal.signal(request);
    }
}
