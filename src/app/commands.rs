//! Inbound commands to the application core.
//!
//! [`Command`] is what the dispatcher recognised in a request;
//! [`ActuationRequest`] is the subset that reaches the sequencer.

/// Actuation variants.  A pure trigger carrying no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationRequest {
    /// Pulse for the full configured duration.
    Full,
    /// Pulse for half the configured duration.
    Half,
}

/// Commands recognised by the dispatcher, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FireHalf,
    Fire,
    Status,
    /// Anything unrecognised: serve the help page.
    Help,
}

impl Command {
    /// Command token, as it appears in a request target.
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Self::FireHalf => Some("fire_half"),
            Self::Fire => Some("fire"),
            Self::Status => Some("status"),
            Self::Help => None,
        }
    }

    /// Classify a raw command string.
    ///
    /// Case-sensitive substring match, checked in priority order so that
    /// `fire_half` is never mistaken for `fire`.  Empty or unrecognised
    /// input falls through to [`Command::Help`].
    pub fn parse(raw: &str) -> Self {
        [Self::FireHalf, Self::Fire, Self::Status]
            .into_iter()
            .find(|cmd| cmd.token().is_some_and(|token| raw.contains(token)))
            .unwrap_or(Self::Help)
    }

    /// The sequencer action this command maps to, if any.
    pub const fn actuation(self) -> Option<ActuationRequest> {
        match self {
            Self::FireHalf => Some(ActuationRequest::Half),
            Self::Fire => Some(ActuationRequest::Full),
            Self::Status | Self::Help => None,
        }
    }
}
