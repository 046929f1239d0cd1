//! Wallet connection session for the pact link.
//!
//! One `ConnectionSession` per application instance drives the handshake
//! with the external wallet: it owns the ephemeral key material, hands off
//! to the wallet through a deep link, consumes the asynchronous callback,
//! derives the session secret, and publishes every state transition to UI
//! observers. A 60-second timeout races the wallet's reply; whichever
//! resolves first wins and the loser becomes a no-op.

pub mod config;
pub mod error;
pub mod launcher;
pub mod nullable;
pub mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use launcher::{HandOffError, LinkLauncher};
pub use nullable::NullLauncher;
pub use session::{CallbackDisposition, ConnectionSession, SessionSnapshot};
