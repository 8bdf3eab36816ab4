//! Command dispatcher: maps a raw command string to an outcome.
//!
//! Stateless per invocation.  Every call produces exactly one
//! [`CommandResult`]; actuation is handed to an [`ActuationPort`] and never
//! awaited, so the response is ready before the pulse completes.
//!
//! | Token       | Action            | Body                                   |
//! |-------------|-------------------|----------------------------------------|
//! | `fire_half` | half-duration fire| `{"status":"fired_half",...}`          |
//! | `fire`      | full-duration fire| `{"status":"fired",...}`               |
//! | `status`    | none              | `{"status":"ready",...}`               |
//! | (other)     | none              | HTML help page                         |

use log::info;
use serde::Serialize;

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{ActuationPort, EventSink};

/// Static help page served for any unrecognised command.
pub const HELP_PAGE: &str = concat!(
    "<html><body>",
    "<h1>ESP WiFi Nerf Gun Controller</h1>",
    "<p>Available endpoints:</p>",
    "<ul>",
    "<li><a href=\"/fire\">POST/GET /fire</a> - Fire the nerf gun</li>",
    "<li><a href=\"/fire_half\">POST/GET /fire_half</a> - Fire the nerf gun (half duration)</li>",
    "<li><a href=\"/status\">GET /status</a> - Check status</li>",
    "</ul>",
    "</body></html>",
);

/// Payload media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Html,
}

impl ContentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Html => "text/html",
        }
    }
}

/// One response, built per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status_code: u16,
    pub content_type: ContentType,
    pub body: String,
}

#[derive(Serialize)]
struct StatusReply {
    status: &'static str,
    message: &'static str,
}

impl CommandResult {
    fn json(status: &'static str, message: &'static str) -> Self {
        Self {
            status_code: 200,
            content_type: ContentType::Json,
            body: serde_json::to_string(&StatusReply { status, message }).unwrap_or_default(),
        }
    }

    fn help() -> Self {
        Self {
            status_code: 200,
            content_type: ContentType::Html,
            body: HELP_PAGE.into(),
        }
    }

    /// The response a given command produces.  Pure.
    pub fn for_command(command: Command) -> Self {
        match command {
            Command::FireHalf => Self::json("fired_half", "Nerf gun fired at half duration!"),
            Command::Fire => Self::json("fired", "Nerf gun fired successfully!"),
            Command::Status => Self::json("ready", "Nerf gun is ready to fire"),
            Command::Help => Self::help(),
        }
    }
}

/// Classify `raw`, hand any actuation to `actuation`, and build the response.
pub fn dispatch(
    raw: &str,
    actuation: &mut impl ActuationPort,
    sink: &mut impl EventSink,
) -> CommandResult {
    let command = Command::parse(raw);
    info!("dispatch: {:?} <- {:?}", command, raw);

    if let Some(request) = command.actuation() {
        actuation.request(request);
    }
    sink.emit(&AppEvent::CommandHandled(command));
    CommandResult::for_command(command)
}
