//! Platform hand-off seam.
//!
//! Launching a deep link is the one platform-specific operation in the
//! handshake. The session only needs to know whether the platform accepted
//! the hand-off; the wallet's reply arrives later as an independent
//! callback, never as a return value here.

use thiserror::Error;
use url::Url;

/// The platform refused or failed to launch the deep link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandOffError(pub String);

/// Hands a deep-link URI to the platform for delivery to the wallet.
pub trait LinkLauncher: Send + Sync {
    fn launch(&self, uri: &Url) -> Result<(), HandOffError>;
}
