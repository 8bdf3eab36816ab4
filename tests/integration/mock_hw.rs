//! Simulated bench for integration tests.
//!
//! Two recording output pins sit behind the real [`HardwareAdapter`], so
//! tests see electrical levels (indicator polarity included) stamped with
//! the simulated time at which they changed.  A [`TimerQueue`] is driven
//! deadline by deadline, so every expiry is handled at its exact due time.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};

use triggerctl::adapters::hardware::HardwareAdapter;
use triggerctl::app::dispatch::{CommandResult, dispatch};
use triggerctl::app::events::AppEvent;
use triggerctl::app::ports::EventSink;
use triggerctl::app::service::{AppService, DirectActuation};
use triggerctl::config::ControllerConfig;
use triggerctl::http::codec::request_target;
use triggerctl::scheduler::TimerQueue;

// ── Pin recording ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Trigger,
    Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub at_ms: u64,
    pub line: Line,
    pub high: bool,
}

/// Clock and transition log shared by both pins.
#[derive(Clone, Default)]
pub struct Wire {
    now: Rc<Cell<u64>>,
    log: Rc<RefCell<Vec<Transition>>>,
}

/// Output pin that records level changes (not repeated writes).
pub struct RecordingPin {
    line: Line,
    high: bool,
    wire: Wire,
}

impl RecordingPin {
    fn write(&mut self, high: bool) {
        if high != self.high {
            self.high = high;
            self.wire.log.borrow_mut().push(Transition {
                at_ms: self.wire.now.get(),
                line: self.line,
                high,
            });
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

// ── Event recording ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Bench ─────────────────────────────────────────────────────

pub struct Bench {
    pub app: AppService,
    pub hw: HardwareAdapter<RecordingPin, RecordingPin>,
    pub timers: TimerQueue,
    /// Events from the actuation side.
    pub events: RecordingSink,
    /// Events from the dispatcher.
    pub commands: RecordingSink,
    pub config: ControllerConfig,
    wire: Wire,
}

#[allow(dead_code)]
impl Bench {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Pins start at their idle levels, as `hw_init` leaves them.
    pub fn with_config(config: ControllerConfig) -> Self {
        let wire = Wire::default();
        let trigger = RecordingPin {
            line: Line::Trigger,
            high: false,
            wire: wire.clone(),
        };
        let indicator = RecordingPin {
            line: Line::Indicator,
            high: config.indicator_active_low,
            wire: wire.clone(),
        };

        let mut bench = Self {
            app: AppService::new(&config),
            hw: HardwareAdapter::new(trigger, indicator, config.indicator_active_low),
            timers: TimerQueue::new(),
            events: RecordingSink::default(),
            commands: RecordingSink::default(),
            config,
            wire,
        };
        bench
            .app
            .start(&mut bench.hw, &mut bench.timers, &mut bench.events);
        bench
    }

    pub fn now(&self) -> u64 {
        self.wire.now.get()
    }

    /// Dispatch a bare command string at the current time.
    pub fn send(&mut self, raw: &str) -> CommandResult {
        let mut port = DirectActuation {
            app: &mut self.app,
            hw: &mut self.hw,
            timers: &mut self.timers,
            sink: &mut self.events,
        };
        dispatch(raw, &mut port, &mut self.commands)
    }

    /// Dispatch `GET /<path> HTTP/1.1` through the request-target parser.
    pub fn get(&mut self, path: &str) -> CommandResult {
        let raw = format!("GET /{} HTTP/1.1\r\nHost: trigger.local\r\n\r\n", path);
        let target = request_target(&raw).to_owned();
        self.send(&target)
    }

    /// Run every timer due at or before `t_ms`, each at its own deadline.
    pub fn advance_to(&mut self, t_ms: u64) {
        while let Some(deadline) = self.timers.next_deadline().filter(|&d| d <= t_ms) {
            self.wire.now.set(deadline);
            let Some(expiry) = self.timers.pop_expired(deadline) else {
                break;
            };
            self.app
                .on_timer(expiry, &mut self.hw, &mut self.timers, &mut self.events);
        }
        let t_ms = t_ms.max(self.now());
        self.wire.now.set(t_ms);
        self.timers.advance(t_ms);
    }

    pub fn advance_by(&mut self, dt_ms: u64) {
        self.advance_to(self.now() + dt_ms);
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.wire.log.borrow().clone()
    }

    pub fn transitions_of(&self, line: Line) -> Vec<Transition> {
        self.transitions()
            .into_iter()
            .filter(|t| t.line == line)
            .collect()
    }

    pub fn trigger_high(&self) -> bool {
        self.level(Line::Trigger, false)
    }

    pub fn indicator_high(&self) -> bool {
        self.level(Line::Indicator, self.config.indicator_active_low)
    }

    fn level(&self, line: Line, initial: bool) -> bool {
        self.transitions_of(line)
            .last()
            .map_or(initial, |t| t.high)
    }
}
