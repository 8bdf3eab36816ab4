//! Fuzz target: request framing + command dispatch
//!
//! Feeds arbitrary bytes through the same path the listener uses
//! (lossy UTF-8, request-target extraction, dispatch, response framing)
//! and asserts that it never panics, that unknown input always yields the
//! help page, and that every response fits the framing buffer.
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;
use triggerctl::app::commands::{ActuationRequest, Command};
use triggerctl::app::dispatch::{HELP_PAGE, dispatch};
use triggerctl::app::events::AppEvent;
use triggerctl::app::ports::{ActuationPort, EventSink};
use triggerctl::http::codec::{REQUEST_BUF_SIZE, encode_response, request_complete, request_target};

struct Count(usize);

impl ActuationPort for Count {
    fn request(&mut self, _request: ActuationRequest) {
        self.0 += 1;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(REQUEST_BUF_SIZE)];
    let _ = request_complete(data);

    let raw = String::from_utf8_lossy(data);
    let target = request_target(&raw);
    let command = Command::parse(target);

    let mut actuations = Count(0);
    let result = dispatch(target, &mut actuations, &mut Discard);

    assert_eq!(actuations.0, usize::from(command.actuation().is_some()));
    if command == Command::Help {
        assert_eq!(result.body, HELP_PAGE);
    }
    assert!(encode_response(&result).is_some(), "response must fit the buffer");
});
