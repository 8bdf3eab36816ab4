//! Minimal HTTP/1.1 framing for the command listener.
//!
//! Only what a one-request-per-connection command surface needs: pull the
//! request target out of the first line, detect the end of the header
//! block, and frame a response with the fixed header set.

use core::fmt::Write as _;

use crate::app::dispatch::CommandResult;

/// Largest request we read; anything past it is ignored.
pub const REQUEST_BUF_SIZE: usize = 1024;

/// Largest response we frame (help page plus headers fits comfortably).
pub const RESPONSE_BUF_SIZE: usize = 1024;

/// Target of the request line (`GET /fire HTTP/1.1` → `/fire`).
///
/// A first line without a target is returned trimmed, so bare command
/// words (`fire`, `status`) work from a raw TCP client as well.
pub fn request_target(raw: &str) -> &str {
    let line = raw.lines().next().unwrap_or("").trim();
    let mut parts = line.split_ascii_whitespace();
    match (parts.next(), parts.next()) {
        (Some(_method), Some(target)) => target,
        _ => line,
    }
}

/// Whether `buf` holds a complete header block.
pub fn request_complete(buf: &[u8]) -> bool {
    buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.windows(2).any(|w| w == b"\n\n")
}

const fn reason_phrase(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Unknown",
    }
}

/// Frame `result` as a complete HTTP/1.1 response.
///
/// Returns `None` if the response does not fit in [`RESPONSE_BUF_SIZE`].
pub fn encode_response(result: &CommandResult) -> Option<heapless::Vec<u8, RESPONSE_BUF_SIZE>> {
    let mut out = heapless::String::<RESPONSE_BUF_SIZE>::new();
    write!(
        out,
        "HTTP/1.1 {} {}\r\n\
         Content-Type: {}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Connection: close\r\n\
         \r\n\
         {}\r\n",
        result.status_code,
        reason_phrase(result.status_code),
        result.content_type.as_str(),
        result.body,
    )
    .ok()?;
    Some(out.into_bytes())
}
