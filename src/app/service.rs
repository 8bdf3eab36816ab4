//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the [`Sequencer`] and the single [`ActuatorState`]
//! record.  It exposes a hardware-agnostic API; all I/O flows through port
//! traits injected at call sites, so the service is testable with mock
//! adapters and a simulated clock.
//!
//! ```text
//!  ActuationRequest ──▶ ┌────────────────────────┐ ──▶ ActuatorPort
//!                       │       AppService        │
//!            Expiry ──▶ │  Sequencer · State      │ ──▶ TimerPort
//!                       └────────────────────────┘ ──▶ EventSink
//! ```

use log::{debug, info};

use crate::config::ControllerConfig;

use super::commands::ActuationRequest;
use super::events::AppEvent;
use super::ports::{ActuationPort, ActuatorPort, EventSink, Expiry, TimerId, TimerPort};
use super::sequencer::{ActuatorState, Sequencer, SequencerTiming, TickOutcome};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all actuation logic.
pub struct AppService {
    sequencer: Sequencer,
    state: ActuatorState,
    fired_total: u32,
    superseded_total: u32,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the outputs; call [`start`](Self::start) next.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            sequencer: Sequencer::new(SequencerTiming::from(config)),
            state: ActuatorState::default(),
            fired_total: 0,
            superseded_total: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force both outputs idle and arm the heartbeat (if enabled).
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        self.sequencer.reset(&mut self.state, hw, timers);
        sink.emit(&AppEvent::Started);
        info!("AppService started ({:?})", self.sequencer.timing());
    }

    // ── Requests ──────────────────────────────────────────────

    /// Execute an actuation request immediately.
    pub fn handle_request(
        &mut self,
        request: ActuationRequest,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        let outcome = match request {
            ActuationRequest::Full => self.sequencer.fire_full(&mut self.state, hw, timers),
            ActuationRequest::Half => self.sequencer.fire_half(&mut self.state, hw, timers),
        };
        self.fired_total = self.fired_total.wrapping_add(1);
        if outcome.superseded {
            self.superseded_total = self.superseded_total.wrapping_add(1);
        }
        sink.emit(&AppEvent::Fired {
            variant: request,
            duration_ms: outcome.duration_ms,
            superseded: outcome.superseded,
        });
    }

    // ── Timer callbacks ───────────────────────────────────────

    /// Route a timer expiry to its handler.  Expiries from an earlier
    /// arming of the same timer are dropped.
    pub fn on_timer(
        &mut self,
        expiry: Expiry,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        if !timers.is_current(expiry) {
            debug!("stale {:?} expiry (gen {}) dropped", expiry.timer, expiry.generation);
            sink.emit(&AppEvent::StaleTimerDropped(expiry.timer));
            return;
        }

        match expiry.timer {
            TimerId::TriggerOff => {
                self.sequencer.on_trigger_off_timer(&mut self.state, hw, timers);
                sink.emit(&AppEvent::TriggerReleased);
            }
            TimerId::IndicatorTick => {
                if self.sequencer.on_indicator_tick(&mut self.state, hw, timers)
                    == TickOutcome::Finished
                {
                    sink.emit(&AppEvent::AnimationFinished);
                }
            }
            TimerId::Heartbeat => {
                self.sequencer.on_heartbeat(&mut self.state, hw, timers);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the actuator state record.
    pub fn state(&self) -> &ActuatorState {
        &self.state
    }

    /// Whether a pulse is in flight (trigger output high).
    pub fn is_trigger_active(&self) -> bool {
        self.state.pulse.active
    }

    /// Logical indicator level.
    pub fn indicator_lit(&self) -> bool {
        self.state.indicator_lit()
    }

    /// Pulses started since boot.
    pub fn fired_total(&self) -> u32 {
        self.fired_total
    }

    /// Pulses that replaced one still in flight.
    pub fn superseded_total(&self) -> u32 {
        self.superseded_total
    }
}

// ───────────────────────────────────────────────────────────────
// In-place actuation
// ───────────────────────────────────────────────────────────────

/// [`ActuationPort`] that runs the request on the spot.
///
/// For callers already on the actuator's own event loop (tests, a single
/// polling loop).  The network task posts to a signal instead.
pub struct DirectActuation<'a, H, T, S> {
    pub app: &'a mut AppService,
    pub hw: &'a mut H,
    pub timers: &'a mut T,
    pub sink: &'a mut S,
}

impl<H, T, S> ActuationPort for DirectActuation<'_, H, T, S>
where
    H: ActuatorPort,
    T: TimerPort,
    S: EventSink,
{
    fn request(&mut self, request: ActuationRequest) {
        self.app
            .handle_request(request, &mut *self.hw, &mut *self.timers, &mut *self.sink);
    }
}
