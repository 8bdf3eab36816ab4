//! Software millisecond timer queue.
//!
//! Implements [`TimerPort`] for the cooperative actuator task and for the
//! host test harness.  The queue never sleeps and never calls back into
//! the domain: the owner asks for the next expired timer and dispatches it
//! itself, one at a time, so every handler sees the effects of the one
//! before it.
//!
//! ```text
//!   arm(id, delay) ──▶ slot[id] = { gen+1, now+delay }
//!   disarm(id)     ──▶ slot[id] = { gen+1, — }
//!
//!   loop {
//!       pop_expired(now) ──▶ Expiry { id, gen }  ──▶ AppService::on_timer
//!   }                                                   │
//!                                                       └─ is_current(expiry)?
//! ```
//!
//! The generation stamp is what makes re-arming a true cancellation even
//! when an expiry has already been handed out: the stale token no longer
//! compares current and its handler is skipped.

use crate::app::ports::{Expiry, TimerId, TimerPort};
use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Slot
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    generation: u32,
    deadline_ms: Option<u64>,
    /// Global arm order, breaks deadline ties (earlier arm fires first).
    armed_seq: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Timer queue
// ═══════════════════════════════════════════════════════════════

/// One-shot timers, one slot per [`TimerId`].  Periodic behaviour is the
/// handler re-arming itself.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    slots: [Slot; TimerId::COUNT],
    now_ms: u64,
    next_seq: u64,
}

const ALL_TIMERS: [TimerId; TimerId::COUNT] =
    [TimerId::TriggerOff, TimerId::IndicatorTick, TimerId::Heartbeat];

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue clock: the latest time passed to [`advance`](Self::advance) or
    /// [`pop_expired`](Self::pop_expired).
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the queue clock forward.  Never goes backwards.
    pub fn advance(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Whether `timer` has a pending firing.
    pub fn is_armed(&self, timer: TimerId) -> bool {
        self.slots[timer.index()].deadline_ms.is_some()
    }

    /// Absolute deadline of `timer`, if armed.
    pub fn deadline(&self, timer: TimerId) -> Option<u64> {
        self.slots[timer.index()].deadline_ms
    }

    /// Earliest pending deadline across all timers.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().filter_map(|s| s.deadline_ms).min()
    }

    /// Milliseconds from `now_ms` until the next deadline (0 if overdue).
    pub fn time_until_next(&self, now_ms: u64) -> Option<u64> {
        self.next_deadline().map(|d| d.saturating_sub(now_ms))
    }

    /// Advance to `now_ms` and remove the earliest timer whose deadline has
    /// passed.  Ties go to the timer armed first.
    pub fn pop_expired(&mut self, now_ms: u64) -> Option<Expiry> {
        self.advance(now_ms);

        let due = ALL_TIMERS
            .into_iter()
            .filter_map(|id| {
                let slot = &self.slots[id.index()];
                slot.deadline_ms
                    .filter(|&d| d <= self.now_ms)
                    .map(|d| (d, slot.armed_seq, id))
            })
            .min_by_key(|&(deadline, seq, _)| (deadline, seq))?;

        let (_, _, timer) = due;
        let slot = &mut self.slots[timer.index()];
        slot.deadline_ms = None;
        Some(Expiry {
            timer,
            generation: slot.generation,
        })
    }
}

impl TimerPort for TimerQueue {
    fn arm(&mut self, timer: TimerId, delay_ms: u32) -> Expiry {
        let now = self.now_ms;
        let seq = self.next_seq;
        self.next_seq += 1;

        let slot = &mut self.slots[timer.index()];
        slot.generation = slot.generation.wrapping_add(1);
        slot.deadline_ms = Some(now + u64::from(delay_ms));
        slot.armed_seq = seq;
        debug!("timer: {:?} armed gen={} due={}ms", timer, slot.generation, now + u64::from(delay_ms));

        Expiry {
            timer,
            generation: slot.generation,
        }
    }

    fn disarm(&mut self, timer: TimerId) {
        let slot = &mut self.slots[timer.index()];
        slot.generation = slot.generation.wrapping_add(1);
        slot.deadline_ms = None;
    }

    fn is_current(&self, expiry: Expiry) -> bool {
        self.slots[expiry.timer.index()].generation == expiry.generation
    }
}
