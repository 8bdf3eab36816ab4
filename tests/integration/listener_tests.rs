//! Real-socket round trips against the I/O task on a loopback listener.
//!
//! The task runs on its own thread with a recording hardware adapter; the
//! test talks to it with a plain blocking `TcpStream`.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use triggerctl::app::ports::ActuatorPort;
use triggerctl::config::ControllerConfig;
use triggerctl::http::io_task;

#[derive(Clone, Default)]
struct SharedPins {
    writes: Arc<Mutex<Vec<(&'static str, bool)>>>,
}

impl ActuatorPort for SharedPins {
    fn set_trigger(&mut self, active: bool) {
        self.writes.lock().unwrap().push(("trigger", active));
    }

    fn set_indicator(&mut self, lit: bool) {
        self.writes.lock().unwrap().push(("indicator", lit));
    }
}

fn start() -> (SocketAddr, SharedPins) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let pins = SharedPins::default();
    let config = ControllerConfig {
        request_timeout_ms: 300,
        ..ControllerConfig::default()
    };
    io_task::spawn(listener, config, pins.clone()).unwrap();
    (addr, pins)
}

fn request(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(raw.as_bytes()).unwrap();
    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    reply
}

fn trigger_writes(pins: &SharedPins) -> Vec<bool> {
    pins.writes
        .lock()
        .unwrap()
        .iter()
        .filter(|(line, _)| *line == "trigger")
        .map(|&(_, level)| level)
        .collect()
}

#[test]
fn fire_over_tcp_pulses_the_trigger() {
    let (addr, pins) = start();

    let reply = request(addr, "GET /fire HTTP/1.1\r\nHost: x\r\n\r\n");
    assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(reply.contains("Connection: close"));
    assert!(reply.contains(r#""status":"fired""#));

    std::thread::sleep(Duration::from_millis(400));
    // start() idle write, fire high, release low.
    assert_eq!(trigger_writes(&pins), vec![false, true, false]);
}

#[test]
fn status_over_tcp_never_actuates() {
    let (addr, pins) = start();

    let reply = request(addr, "GET /status HTTP/1.1\r\n\r\n");
    assert!(reply.contains(r#""status":"ready""#));

    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(trigger_writes(&pins), vec![false]);
}

#[test]
fn partial_request_is_served_after_the_deadline() {
    let (addr, _pins) = start();

    // No blank line: the server gives up waiting and dispatches what it has.
    let reply = request(addr, "GET /status HTTP/1.1\r\n");
    assert!(reply.contains(r#""status":"ready""#));
}

#[test]
fn listener_survives_a_silent_client() {
    let (addr, _pins) = start();

    drop(TcpStream::connect(addr).unwrap());
    let reply = request(addr, "GET /nope HTTP/1.1\r\n\r\n");
    assert!(reply.contains("text/html"));
}

#[test]
fn last_request_of_a_burst_sets_the_release() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // Everything is queued in the backlog before the task starts, so the
    // whole burst is ready on the first accept.
    let mut clients: Vec<TcpStream> = (0..8)
        .map(|_| {
            let mut s = TcpStream::connect(addr).unwrap();
            s.write_all(b"GET /fire HTTP/1.1\r\n\r\n").unwrap();
            s
        })
        .collect();
    let mut last = TcpStream::connect(addr).unwrap();
    last.write_all(b"GET /fire_half HTTP/1.1\r\n\r\n").unwrap();

    let pins = SharedPins::default();
    let config = ControllerConfig {
        pulse_duration_ms: 2_000,
        request_timeout_ms: 300,
        ..ControllerConfig::default()
    };
    io_task::spawn(listener, config, pins.clone()).unwrap();

    for client in &mut clients {
        client.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let mut reply = String::new();
        client.read_to_string(&mut reply).unwrap();
        assert!(reply.contains(r#""status":"fired""#));
    }
    last.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut reply = String::new();
    last.read_to_string(&mut reply).unwrap();
    assert!(reply.contains(r#""status":"fired_half""#));

    // Half of 2000 ms from the last request, not the full pulse.
    std::thread::sleep(Duration::from_millis(1_400));
    assert_eq!(trigger_writes(&pins).last(), Some(&false));
}
