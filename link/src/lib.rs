//! Deep-link codec for the wallet handshake.
//!
//! Outbound: connect/disconnect request URIs carrying a base64-encoded JSON
//! payload in the `data` query parameter. Inbound: callback URIs from the
//! wallet, matched by scheme and parsed into an outcome plus raw payload.
//! URIs that do not belong to this application return "no match" rather
//! than an error, so the platform can route unrelated callbacks.

pub mod error;
pub mod payload;
pub mod request;
pub mod response;

pub use error::LinkError;
pub use payload::{AppInfo, ApprovalPayload, ConnectPayload, DisconnectPayload};
pub use request::{build_connect_uri, build_disconnect_uri};
pub use response::{decode_approval, parse_callback, parse_public_key_hex, Callback, ResponseOutcome};
