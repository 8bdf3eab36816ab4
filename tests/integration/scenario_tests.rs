//! End-to-end request scenarios with the factory timing (65 ms pulse,
//! 50 ms indicator tick, 10 toggles).

use crate::mock_hw::{Bench, Line, Transition};

fn at(at_ms: u64, line: Line, high: bool) -> Transition {
    Transition { at_ms, line, high }
}

#[test]
fn fire_holds_trigger_for_full_duration() {
    let mut bench = Bench::new();

    let r = bench.get("fire");
    assert!(r.body.contains(r#""status":"fired""#));
    assert!(bench.trigger_high(), "trigger must go high before the reply");

    bench.advance_to(64);
    assert!(bench.trigger_high());
    bench.advance_to(65);
    assert!(!bench.trigger_high());

    assert_eq!(
        bench.transitions_of(Line::Trigger),
        vec![at(0, Line::Trigger, true), at(65, Line::Trigger, false)]
    );
}

#[test]
fn fire_half_releases_at_half_duration() {
    let mut bench = Bench::new();

    let r = bench.get("fire_half");
    assert!(r.body.contains(r#""status":"fired_half""#));

    bench.advance_to(31);
    assert!(bench.trigger_high());
    bench.advance_to(32);
    assert!(!bench.trigger_high());
}

#[test]
fn second_fire_restarts_the_pulse() {
    let mut bench = Bench::new();

    bench.get("fire");
    bench.advance_to(30);
    bench.get("fire");
    bench.advance_to(200);

    // High continuously from 0 to 95, exactly one low transition.
    assert_eq!(
        bench.transitions_of(Line::Trigger),
        vec![at(0, Line::Trigger, true), at(95, Line::Trigger, false)]
    );
}

#[test]
fn status_touches_no_pins() {
    let mut bench = Bench::new();
    let before = bench.transitions();

    let r = bench.get("status");
    bench.advance_to(500);

    assert!(r.body.contains(r#""status":"ready""#));
    assert_eq!(bench.transitions(), before);
    assert!(!bench.trigger_high());
    assert!(bench.indicator_high(), "active-low indicator idles high");
}

#[test]
fn garbage_serves_help_and_touches_no_pins() {
    let mut bench = Bench::new();

    let r = bench.send("garbage");
    bench.advance_to(500);

    assert!(r.body.starts_with("<html>"));
    assert!(bench.transitions().is_empty());
}

#[test]
fn status_mid_pulse_does_not_disturb_it() {
    let mut bench = Bench::new();

    bench.get("fire");
    bench.advance_to(20);
    bench.get("status");
    bench.advance_to(100);

    assert_eq!(
        bench.transitions_of(Line::Trigger),
        vec![at(0, Line::Trigger, true), at(65, Line::Trigger, false)]
    );
}

#[test]
fn half_then_full_uses_latest_duration() {
    let mut bench = Bench::new();

    bench.get("fire_half");
    bench.advance_to(10);
    bench.get("fire");
    bench.advance_to(200);

    assert_eq!(
        bench.transitions_of(Line::Trigger),
        vec![at(0, Line::Trigger, true), at(75, Line::Trigger, false)]
    );
}
