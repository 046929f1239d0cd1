//! Ledger client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pact_types::LedgerAddress;

use crate::error::LedgerError;

/// Configuration for [`crate::LedgerQueryClient`].
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base URL of the ledger's REST/RPC surface (view + resource endpoints).
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Transfer endpoint of the external signing/broadcast service.
    #[serde(default = "default_transfer_url")]
    pub transfer_url: String,

    /// Creator account of the application's fungible asset.
    #[serde(default = "default_token_creator")]
    pub token_creator: LedgerAddress,

    /// Seed string the asset's metadata object was created with.
    #[serde(default = "default_token_seed")]
    pub token_seed: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "http://127.0.0.1:8080/v1".to_string()
}

fn default_transfer_url() -> String {
    "http://127.0.0.1:8000/api/transfer".to_string()
}

fn default_token_creator() -> LedgerAddress {
    LedgerAddress::parse("0x1").expect("static address")
}

fn default_token_seed() -> String {
    "PDTT".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for LedgerConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config uses defaults")
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LedgerError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("failed to parse config file: {e}")))
    }
}
