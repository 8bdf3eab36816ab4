//! Command classification and response framing through the bench.

use triggerctl::app::commands::Command;
use triggerctl::app::dispatch::{ContentType, HELP_PAGE};
use triggerctl::app::events::AppEvent;
use triggerctl::http::codec::encode_response;

use crate::mock_hw::Bench;

#[test]
fn fire_half_wins_over_fire() {
    let mut bench = Bench::with_config(Default::default());
    bench.send("/fire_half?x=1");
    assert_eq!(
        bench.commands.events,
        vec![AppEvent::CommandHandled(Command::FireHalf)]
    );
    assert_eq!(bench.app.state().pulse.duration_ms, 32);
}

#[test]
fn matching_is_case_sensitive() {
    let mut bench = Bench::new();
    let r = bench.send("/FIRE");
    assert_eq!(r.content_type, ContentType::Html);
    assert!(!bench.trigger_high());
}

#[test]
fn fire_only_in_a_header_is_ignored() {
    let mut bench = Bench::new();
    let raw = "GET /nothing HTTP/1.1\r\nX-Note: please fire\r\n\r\n";
    let target = triggerctl::http::codec::request_target(raw).to_owned();
    let r = bench.send(&target);
    assert_eq!(r.body, HELP_PAGE);
    assert!(!bench.trigger_high());
}

#[test]
fn every_fallback_is_identical() {
    let mut bench = Bench::new();
    let a = bench.send("");
    let b = bench.send("\u{0}\u{ff}");
    let c = bench.get("index.html");
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn framed_fire_response() {
    let mut bench = Bench::new();
    let r = bench.get("fire");
    let bytes = encode_response(&r).expect("fits");
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(
        text,
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Connection: close\r\n\
         \r\n\
         {\"status\":\"fired\",\"message\":\"Nerf gun fired successfully!\"}\r\n"
    );
}
