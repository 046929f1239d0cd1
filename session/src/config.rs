//! Session configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pact_link::AppInfo;

use crate::error::SessionError;

/// Configuration for [`crate::ConnectionSession`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Identity shown by the wallet during approval.
    #[serde(default = "default_app_info")]
    pub app: AppInfo,

    /// Deep-link scheme of the external wallet.
    #[serde(default = "default_wallet_scheme")]
    pub wallet_scheme: String,

    /// This application's own deep-link scheme; callbacks on any other
    /// scheme are "no match".
    #[serde(default = "default_app_scheme")]
    pub app_scheme: String,

    /// URI the wallet should reply to.
    #[serde(default = "default_redirect_link")]
    pub redirect_link: String,

    /// How long to wait for the wallet's callback before giving up.
    #[serde(default = "default_response_timeout")]
    pub response_timeout_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_app_info() -> AppInfo {
    AppInfo {
        domain: "pdtt.app".to_string(),
        name: "PDTT".to_string(),
    }
}

fn default_wallet_scheme() -> String {
    "petra".to_string()
}

fn default_app_scheme() -> String {
    "pdtt".to_string()
}

fn default_redirect_link() -> String {
    "pdtt://api/v1/connect".to_string()
}

fn default_response_timeout() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config uses defaults")
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SessionError::Decode(format!("failed to read config file: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| SessionError::Decode(format!("failed to parse config file: {e}")))
    }
}
