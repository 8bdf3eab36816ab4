//! Actuation sequencer: trigger pulse timing and indicator animation.
//!
//! Two independent timers drive two independent effects:
//!
//! ```text
//!  fire ──▶ trigger HIGH ──────────────── TriggerOff ──▶ trigger LOW
//!       │                                  (full or half)   + indicator idle
//!       └─▶ IndicatorTick ─▶ toggle ─▶ IndicatorTick ─▶ … ─▶ idle (self-terminating)
//!            (fixed period, fixed step count, independent of pulse length)
//! ```
//!
//! Every entry point that touches timer state disarms before it arms, so a
//! request that lands mid-pulse supersedes the previous deadline rather than
//! racing it: exactly one trigger-off ever fires per overlapping sequence.
//!
//! The sequencer itself is stateless apart from its timing parameters; the
//! mutable hardware state lives in a single [`ActuatorState`] record passed
//! in by exclusive reference.

use crate::config::ControllerConfig;

use super::commands::ActuationRequest;
use super::ports::{ActuatorPort, TimerId, TimerPort};

// ───────────────────────────────────────────────────────────────
// State
// ───────────────────────────────────────────────────────────────

/// The in-flight actuation.  `active` mirrors the trigger output level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerPulse {
    pub active: bool,
    pub duration_ms: u32,
}

/// Indicator blink feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorAnimation {
    /// Toggles still to perform before the final idle step.
    pub steps_remaining: u8,
    /// Logical indicator level (`true` = lit) while the animation runs.
    pub current_level: bool,
    /// An `IndicatorTick` is pending for this animation.
    pub running: bool,
}

impl IndicatorAnimation {
    fn begin(steps: u8) -> Self {
        Self {
            steps_remaining: steps,
            current_level: false,
            running: true,
        }
    }
}

/// Everything the sequencer mutates.  One instance per physical device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorState {
    pub pulse: TriggerPulse,
    pub animation: IndicatorAnimation,
    /// Heartbeat phase while idle.
    pub heartbeat_lit: bool,
}

impl ActuatorState {
    /// Logical indicator level implied by the state.
    pub fn indicator_lit(&self) -> bool {
        if self.animation.running {
            self.animation.current_level
        } else {
            self.heartbeat_lit
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Timing
// ───────────────────────────────────────────────────────────────

/// Timing parameters, taken from [`ControllerConfig`] at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerTiming {
    pub pulse_duration_ms: u32,
    pub half_duration_ms: u32,
    pub blink_steps: u8,
    pub blink_tick_ms: u32,
    /// 0 disables the idle heartbeat.
    pub heartbeat_interval_ms: u32,
}

impl From<&ControllerConfig> for SequencerTiming {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            pulse_duration_ms: config.pulse_duration_ms,
            half_duration_ms: config.half_duration_ms(),
            blink_steps: config.blink_steps,
            blink_tick_ms: config.blink_tick_ms,
            heartbeat_interval_ms: config.heartbeat_interval_ms,
        }
    }
}

/// What a fire request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireOutcome {
    pub duration_ms: u32,
    /// A pulse was already in flight and its deadline was discarded.
    pub superseded: bool,
}

/// Result of one indicator tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The indicator toggled to the carried level and the tick re-armed.
    Toggled(bool),
    /// No steps left: indicator forced idle, nothing re-armed.
    Finished,
}

// ───────────────────────────────────────────────────────────────
// Sequencer
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Sequencer {
    timing: SequencerTiming,
}

impl Sequencer {
    pub fn new(timing: SequencerTiming) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &SequencerTiming {
        &self.timing
    }

    /// Drive both outputs to idle and start the heartbeat if enabled.
    pub fn reset(
        &self,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) {
        timers.disarm(TimerId::TriggerOff);
        timers.disarm(TimerId::IndicatorTick);
        timers.disarm(TimerId::Heartbeat);
        *state = ActuatorState::default();
        hw.set_trigger(false);
        hw.set_indicator(false);
        if self.timing.heartbeat_interval_ms > 0 {
            timers.arm(TimerId::Heartbeat, self.timing.heartbeat_interval_ms);
        }
    }

    /// Full-duration actuation.
    pub fn fire_full(
        &self,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) -> FireOutcome {
        self.fire(ActuationRequest::Full, state, hw, timers)
    }

    /// Half-duration actuation.  Indicator timing is unchanged.
    pub fn fire_half(
        &self,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) -> FireOutcome {
        self.fire(ActuationRequest::Half, state, hw, timers)
    }

    /// Start (or restart) a pulse.  The new deadline is measured from now;
    /// durations never add up.
    pub fn fire(
        &self,
        variant: ActuationRequest,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) -> FireOutcome {
        let duration_ms = match variant {
            ActuationRequest::Full => self.timing.pulse_duration_ms,
            ActuationRequest::Half => self.timing.half_duration_ms,
        };
        let superseded = state.pulse.active;

        hw.set_trigger(true);
        state.pulse = TriggerPulse {
            active: true,
            duration_ms,
        };

        // Animation restarts from its first step.
        timers.disarm(TimerId::IndicatorTick);
        state.animation = IndicatorAnimation::begin(self.timing.blink_steps);
        state.heartbeat_lit = false;
        hw.set_indicator(false);
        timers.arm(TimerId::IndicatorTick, self.timing.blink_tick_ms);

        timers.disarm(TimerId::TriggerOff);
        timers.arm(TimerId::TriggerOff, duration_ms);

        FireOutcome {
            duration_ms,
            superseded,
        }
    }

    /// `TriggerOff` expiry.  The only place the trigger is released.
    pub fn on_trigger_off_timer(
        &self,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) {
        hw.set_trigger(false);
        state.pulse.active = false;

        timers.disarm(TimerId::IndicatorTick);
        state.animation = IndicatorAnimation::default();
        state.heartbeat_lit = false;
        hw.set_indicator(false);
    }

    /// `IndicatorTick` expiry.
    pub fn on_indicator_tick(
        &self,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) -> TickOutcome {
        let anim = &mut state.animation;
        if anim.steps_remaining > 0 {
            anim.current_level = !anim.current_level;
            anim.steps_remaining -= 1;
            hw.set_indicator(anim.current_level);
            timers.disarm(TimerId::IndicatorTick);
            timers.arm(TimerId::IndicatorTick, self.timing.blink_tick_ms);
            TickOutcome::Toggled(anim.current_level)
        } else {
            *anim = IndicatorAnimation::default();
            hw.set_indicator(false);
            TickOutcome::Finished
        }
    }

    /// `Heartbeat` expiry.  Blinks only while nothing else owns the indicator.
    pub fn on_heartbeat(
        &self,
        state: &mut ActuatorState,
        hw: &mut impl ActuatorPort,
        timers: &mut impl TimerPort,
    ) {
        if self.timing.heartbeat_interval_ms == 0 {
            return;
        }
        timers.disarm(TimerId::Heartbeat);
        timers.arm(TimerId::Heartbeat, self.timing.heartbeat_interval_ms);

        if state.pulse.active || state.animation.running {
            return;
        }
        state.heartbeat_lit = !state.heartbeat_lit;
        hw.set_indicator(state.heartbeat_lit);
    }
}
