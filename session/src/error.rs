//! Session error taxonomy.
//!
//! Every handshake-phase error terminates the session back to
//! `Disconnected` carrying one of these values; none is retried
//! automatically.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("could not launch wallet hand-off: {0}")]
    HandOff(String),

    #[error("connection rejected by wallet")]
    Rejected,

    #[error("wallet response carried no usable data")]
    MissingResponseData,

    #[error("could not decode wallet response: {0}")]
    Decode(String),

    #[error("session key material missing")]
    MissingKeyMaterial,

    #[error("unrecognized wallet response: {0:?}")]
    UnrecognizedResponse(String),

    #[error("timed out waiting for wallet response")]
    Timeout,

    #[error("a connect attempt is already in progress")]
    ConnectInProgress,

    #[error("no active connection")]
    NotConnected,
}
