//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder, etc.).

use super::commands::{ActuationRequest, Command};
use super::ports::TimerId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has driven both outputs to idle and is accepting requests.
    Started,

    /// The dispatcher classified an inbound request.
    CommandHandled(Command),

    /// A pulse started.  `superseded` is set when it replaced one in flight.
    Fired {
        variant: ActuationRequest,
        duration_ms: u32,
        superseded: bool,
    },

    /// The trigger-off timer fired and the trigger was released.
    TriggerReleased,

    /// The indicator animation ran its last step and went idle.
    AnimationFinished,

    /// An expiry arrived for a timer that had since been re-armed.
    StaleTimerDropped(TimerId),
}
