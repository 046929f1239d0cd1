//! JSON payload schemas crossing the inter-app boundary.
//!
//! All field names are camelCase on the wire. Decoding is strict: unknown
//! outcomes and malformed fields are surfaced, never silently defaulted.

use serde::{Deserialize, Serialize};

/// Static identity of this application, shown by the wallet during approval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub domain: String,
    pub name: String,
}

/// Payload of the connect request deep link.
///
/// Immutable once built; a fresh connect attempt builds a fresh payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectPayload {
    pub app_info: AppInfo,
    /// URI the wallet should reply to.
    pub redirect_link: String,
    /// Our session public key, `0x`-prefixed hex.
    pub dapp_encryption_public_key: String,
}

/// Payload of the disconnect request deep link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectPayload {
    pub app_info: AppInfo,
    pub redirect_link: String,
}

/// Decoded body of an approved connect callback.
///
/// Both fields are optional at the schema level; the session decides which
/// absences are fatal (a missing counterpart key aborts the handshake, a
/// missing address is synthesized from the key).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPayload {
    #[serde(default)]
    pub counterpart_public_key: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}
