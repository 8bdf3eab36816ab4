//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / Sequencer (domain)
//! ```
//!
//! Driven adapters (GPIO outputs, timers, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! ## Ownership
//!
//! - **ActuatorPort** has exactly one writer: the sequencer.
//! - **TimerPort** implementations own their timer slots; re-arming a slot
//!   always invalidates the previous firing of that slot.

use super::commands::ActuationRequest;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the sequencer calls this to drive the two outputs.
///
/// Levels are logical.  Electrical polarity (e.g. an active-low LED) is
/// the adapter's concern.
pub trait ActuatorPort {
    /// Energise (`true`) or release (`false`) the trigger mechanism.
    fn set_trigger(&mut self, active: bool);

    /// Light (`true`) or darken (`false`) the indicator.
    fn set_indicator(&mut self, lit: bool);
}

// ───────────────────────────────────────────────────────────────
// Timer port (driven adapter: domain ↔ millisecond timer service)
// ───────────────────────────────────────────────────────────────

/// The timers the sequencer owns.  One pending firing per id at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// One-shot: release the trigger at the end of a pulse.
    TriggerOff,
    /// Self-re-arming: advance the indicator animation by one step.
    IndicatorTick,
    /// Self-re-arming: idle heartbeat blink.
    Heartbeat,
}

impl TimerId {
    /// Number of distinct timers.
    pub const COUNT: usize = 3;

    /// Dense index for slot tables.
    pub const fn index(self) -> usize {
        match self {
            Self::TriggerOff => 0,
            Self::IndicatorTick => 1,
            Self::Heartbeat => 2,
        }
    }
}

/// A scheduled firing of a timer, stamped with the generation it was armed in.
///
/// Every `arm`/`disarm` bumps the timer's generation, so an expiry that was
/// already in flight when the timer was re-armed compares stale and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub timer: TimerId,
    pub generation: u32,
}

/// Single-owner cancellable millisecond timer service.
pub trait TimerPort {
    /// Cancel any pending firing of `timer` and schedule a new one
    /// `delay_ms` from now.  Returns the token the firing will carry.
    fn arm(&mut self, timer: TimerId, delay_ms: u32) -> Expiry;

    /// Cancel any pending firing of `timer`.
    fn disarm(&mut self, timer: TimerId);

    /// Whether `expiry` belongs to the latest arming of its timer.
    fn is_current(&self, expiry: Expiry) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuation port (dispatcher → sequencer)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget hand-off from the command dispatcher to the sequencer.
///
/// Implementations either execute the request in place (single event loop,
/// tests) or post it onto the actuator task's queue.  Neither blocks.
pub trait ActuationPort {
    fn request(&mut self, request: ActuationRequest);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
