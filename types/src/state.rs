//! Connection state enum for the wallet session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of the wallet connection.
///
/// `Disconnected` is both the initial and the terminal state; every error
/// path leads back to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No connection; the only state from which `connect()` is valid.
    Disconnected,
    /// Key material generated, hand-off to the wallet in flight.
    Connecting,
    /// Hand-off accepted by the platform; waiting for the asynchronous callback.
    AwaitingResponse,
    /// Handshake approved, shared secret derived, address known.
    Connected,
    /// Teardown in progress (best-effort wallet notification).
    Disconnecting,
}

impl SessionState {
    /// Whether a new `connect()` attempt may start.
    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Disconnected)
    }

    /// Whether `disconnect()` is meaningful from this state.
    pub fn can_disconnect(&self) -> bool {
        matches!(self, Self::Connecting | Self::AwaitingResponse | Self::Connected)
    }

    /// Whether the session holds a live shared secret and address.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::AwaitingResponse => "awaiting_response",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
        };
        write!(f, "{name}")
    }
}
