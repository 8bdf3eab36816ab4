//! Network I/O task: command listener plus actuator loop on one thread.
//!
//! Runs in a dedicated thread using `edge-executor` for cooperative
//! scheduling and `async-io-mini` for reactor-driven sockets and timers.
//! Two futures share nothing but the actuation signal:
//!
//! 1. **serve**: accepts one connection at a time, reads the request,
//!    dispatches it, writes the response and closes.
//! 2. **actuate**: owns the [`AppService`], the outputs and the timer
//!    queue; sleeps until the next deadline or the next request.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────┐
//!  │  I/O Thread                                              │
//!  │  ┌────────────────────────────────────────────────────┐  │
//!  │  │  futures_lite::block_on                            │  │
//!  │  │  ┌──────────────────────────────────────────────┐  │  │
//!  │  │  │  edge_executor::LocalExecutor                │  │  │
//!  │  │  │                                              │  │  │
//!  │  │  │  ┌───────────┐  signal   ┌───────────────┐   │  │  │
//!  │  │  │  │   serve   │──────────▶│    actuate    │   │  │  │
//!  │  │  │  │ accept/rw │           │ deadline ⏱    │   │  │  │
//!  │  │  │  └───────────┘           └───────────────┘   │  │  │
//!  │  │  └──────────────────────────────────────────────┘  │  │
//!  │  └────────────────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────────────────┘
//! ```

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::{Duration, Instant};

use async_io_mini::{Async, Timer};
use futures_lite::future;
use log::{debug, error, info, warn};

use super::channels::{ActuationSignal, SignalActuation};
use super::codec::{REQUEST_BUF_SIZE, encode_response, request_complete, request_target};
use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::MonotonicClock;
use crate::app::dispatch::dispatch;
use crate::app::ports::{ActuatorPort, EventSink};
use crate::app::service::AppService;
use crate::config::ControllerConfig;
use crate::drivers::task_pin::{self, Core};
use crate::error::{Error, NetError, Result};
use crate::scheduler::TimerQueue;

// ── Connection handling ──────────────────────────────────────

/// Read until the header block completes, the buffer fills, the peer
/// closes, or `timeout` passes.  Returns the number of bytes read.
async fn read_request(
    stream: &Async<TcpStream>,
    buf: &mut [u8; REQUEST_BUF_SIZE],
    timeout: Duration,
) -> core::result::Result<usize, NetError> {
    let deadline = Instant::now() + timeout;
    let mut len = 0;

    while len < buf.len() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let read = stream.read_with(|mut s: &TcpStream| s.read(&mut buf[len..]));
        let expired = async {
            Timer::after(remaining).await;
            None
        };

        let n = match future::or(async { Some(read.await) }, expired).await {
            Some(Ok(n)) => n,
            Some(Err(_)) => return Err(NetError::Read),
            None if len == 0 => return Err(NetError::Timeout),
            None => {
                debug!("IO: read deadline passed after {} bytes", len);
                break;
            }
        };

        if n == 0 {
            break;
        }
        len += n;
        if request_complete(&buf[..len]) {
            break;
        }
    }
    Ok(len)
}

async fn write_all(stream: &Async<TcpStream>, mut data: &[u8]) -> core::result::Result<(), NetError> {
    while !data.is_empty() {
        let n = stream
            .write_with(|mut s: &TcpStream| s.write(data))
            .await
            .map_err(|_| NetError::Write)?;
        if n == 0 {
            return Err(NetError::Write);
        }
        data = &data[n..];
    }
    Ok(())
}

/// Serve exactly one request on `stream`.
async fn handle_connection(
    stream: &Async<TcpStream>,
    signal: &ActuationSignal,
    timeout: Duration,
) -> core::result::Result<(), NetError> {
    let mut buf = [0u8; REQUEST_BUF_SIZE];
    let len = read_request(stream, &mut buf, timeout).await?;
    let raw = String::from_utf8_lossy(&buf[..len]);

    let result = dispatch(
        request_target(&raw),
        &mut SignalActuation::new(signal),
        &mut LogEventSink::new(),
    );

    match encode_response(&result) {
        Some(bytes) => write_all(stream, &bytes).await,
        None => {
            warn!("IO: response too large, closing without reply");
            Ok(())
        }
    }
}

/// Accept loop.  One connection at a time; a failed connection is logged
/// and the listener carries on.  Yields after every connection so the
/// actuator sees each request before the next one is read.
pub async fn serve(listener: &Async<TcpListener>, signal: &ActuationSignal, timeout: Duration) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("IO: {} ({})", NetError::Accept, e);
                Timer::after(Duration::from_millis(100)).await;
                continue;
            }
        };
        debug!("IO: client {} connected", peer);

        if let Err(e) = handle_connection(&stream, signal, timeout).await {
            warn!("IO: client {}: {}", peer, e);
        }
        drop(stream);
        future::yield_now().await;
    }
}

// ── Actuator loop ────────────────────────────────────────────

fn drain_expired(
    app: &mut AppService,
    hw: &mut impl ActuatorPort,
    timers: &mut TimerQueue,
    sink: &mut impl EventSink,
    now_ms: u64,
) {
    while let Some(expiry) = timers.pop_expired(now_ms) {
        app.on_timer(expiry, hw, timers, sink);
    }
}

/// Actuator loop.  Expired timers are always handled before a request
/// that arrived in the same wake-up.
pub async fn actuate<H: ActuatorPort>(mut app: AppService, mut hw: H, signal: &ActuationSignal) {
    let clock = MonotonicClock::new();
    let mut timers = TimerQueue::new();
    let mut sink = LogEventSink::new();

    timers.advance(clock.now_ms());
    app.start(&mut hw, &mut timers, &mut sink);

    loop {
        let now = clock.now_ms();
        drain_expired(&mut app, &mut hw, &mut timers, &mut sink, now);

        let received = match timers.time_until_next(now) {
            Some(wait_ms) => {
                future::or(async { Some(signal.wait().await) }, async {
                    Timer::after(Duration::from_millis(wait_ms)).await;
                    None
                })
                .await
            }
            None => Some(signal.wait().await),
        };

        if let Some(request) = received {
            drain_expired(&mut app, &mut hw, &mut timers, &mut sink, clock.now_ms());
            app.handle_request(request, &mut hw, &mut timers, &mut sink);
        }
    }
}

// ── Entry points ─────────────────────────────────────────────

/// Drive the listener and the actuator on the calling thread.  Returns
/// only if the listener cannot be registered with the reactor.
pub fn run<H: ActuatorPort>(listener: TcpListener, config: &ControllerConfig, hw: H) -> Result<()> {
    let listener = Async::new(listener).map_err(|_| NetError::Bind)?;
    let signal = ActuationSignal::new();
    let app = AppService::new(config);
    let timeout = Duration::from_millis(u64::from(config.request_timeout_ms));

    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    executor.spawn(serve(&listener, &signal, timeout)).detach();
    executor.spawn(actuate(app, hw, &signal)).detach();

    info!(
        "IO task started (port {}, read timeout {}ms)",
        config.http_port, config.request_timeout_ms
    );
    future::block_on(executor.run(core::future::pending::<()>()));
    Ok(())
}

/// Spawn the I/O task in a dedicated thread pinned to Core 0 (PRO_CPU),
/// next to the lwIP stack.
pub fn spawn<H>(
    listener: TcpListener,
    config: ControllerConfig,
    hw: H,
) -> Result<std::thread::JoinHandle<()>>
where
    H: ActuatorPort + Send + 'static,
{
    task_pin::spawn_on_core(Core::Pro, 5, 32, "http-io\0", move || {
        if let Err(e) = run(listener, &config, hw) {
            error!("IO task exited: {}", e);
        }
    })
    .map_err(|_| Error::Init("io thread spawn"))
}
