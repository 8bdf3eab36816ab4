//! Trigger / indicator timing against the simulated clock.

use triggerctl::app::commands::ActuationRequest;
use triggerctl::app::events::AppEvent;
use triggerctl::config::ControllerConfig;

use crate::mock_hw::{Bench, Line};

fn long_pulse() -> ControllerConfig {
    ControllerConfig {
        pulse_duration_ms: 2_000,
        ..ControllerConfig::default()
    }
}

fn indicator_times(bench: &Bench) -> Vec<(u64, bool)> {
    bench
        .transitions_of(Line::Indicator)
        .into_iter()
        .map(|t| (t.at_ms, t.high))
        .collect()
}

#[test]
fn trigger_off_cuts_the_animation_short() {
    let mut bench = Bench::new();
    bench.get("fire");
    bench.advance_to(1_000);

    // One toggle at +50 (lit = LOW on an active-low LED), idle at +65.
    assert_eq!(indicator_times(&bench), vec![(50, false), (65, true)]);
    assert!(!bench.app.state().animation.running);
}

#[test]
fn animation_runs_exactly_the_configured_steps() {
    let mut bench = Bench::with_config(long_pulse());
    bench.get("fire");
    bench.advance_to(1_500);

    let times = indicator_times(&bench);
    assert_eq!(times.len(), 10);
    for (i, (at_ms, high)) in times.iter().enumerate() {
        assert_eq!(*at_ms, 50 * (i as u64 + 1));
        assert_eq!(*high, i % 2 == 1, "odd toggles light the LED");
    }
    assert!(bench.events.events.contains(&AppEvent::AnimationFinished));
    assert!(bench.trigger_high(), "pulse outlives the animation");

    bench.advance_to(2_000);
    assert!(!bench.trigger_high());
    assert_eq!(indicator_times(&bench).len(), 10, "release adds no toggle");
}

#[test]
fn refire_restarts_the_step_count() {
    let mut bench = Bench::with_config(long_pulse());
    bench.get("fire");
    bench.advance_to(120);
    assert_eq!(indicator_times(&bench), vec![(50, false), (100, true)]);

    bench.get("fire");
    bench.advance_to(1_500);

    let after: Vec<_> = indicator_times(&bench).into_iter().skip(2).collect();
    assert_eq!(after.len(), 10);
    assert_eq!(after.first(), Some(&(170, false)));
    assert_eq!(after.last(), Some(&(620, true)));
}

#[test]
fn refire_while_lit_forces_indicator_idle_first() {
    let mut bench = Bench::with_config(long_pulse());
    bench.get("fire");
    bench.advance_to(60);
    assert!(!bench.indicator_high(), "lit after the first toggle");

    bench.get("fire_half");
    assert!(bench.indicator_high(), "new sequence starts from idle");
}

#[test]
fn supersede_is_reported_once_per_overlap() {
    let mut bench = Bench::new();
    bench.get("fire");
    bench.advance_to(10);
    bench.get("fire_half");
    bench.advance_to(500);

    let fired: Vec<_> = bench
        .events
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Fired { .. }))
        .cloned()
        .collect();
    assert_eq!(
        fired,
        vec![
            AppEvent::Fired {
                variant: ActuationRequest::Full,
                duration_ms: 65,
                superseded: false,
            },
            AppEvent::Fired {
                variant: ActuationRequest::Half,
                duration_ms: 32,
                superseded: true,
            },
        ]
    );
    let releases = bench
        .events
        .events
        .iter()
        .filter(|e| **e == AppEvent::TriggerReleased)
        .count();
    assert_eq!(releases, 1);
    assert_eq!(bench.app.fired_total(), 2);
    assert_eq!(bench.app.superseded_total(), 1);
}

#[test]
fn heartbeat_blinks_only_while_idle() {
    let mut bench = Bench::with_config(ControllerConfig {
        heartbeat_interval_ms: 1_000,
        ..ControllerConfig::default()
    });

    bench.advance_to(2_050);
    assert_eq!(indicator_times(&bench), vec![(1_000, false), (2_000, true)]);

    bench.get("fire");
    bench.advance_to(2_999);
    // Fire animation (+50 lit) and release (+65 idle); heartbeat phase reset.
    assert_eq!(
        indicator_times(&bench)[2..],
        [(2_100, false), (2_115, true)]
    );

    bench.advance_to(3_000);
    assert_eq!(indicator_times(&bench).last(), Some(&(3_000, false)));
}

#[test]
fn heartbeat_disabled_by_default() {
    let mut bench = Bench::new();
    bench.advance_to(60_000);
    assert!(bench.transitions().is_empty());
    assert!(!bench.timers.is_armed(triggerctl::app::ports::TimerId::Heartbeat));
}
