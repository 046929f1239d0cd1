//! Nullable launcher — deterministic hand-off for testing.
//!
//! Records every launched URI and can be scripted to fail, so tests can
//! drive the full state machine without a platform or a wallet.

use std::sync::Mutex;
use url::Url;

use crate::launcher::{HandOffError, LinkLauncher};

/// A `LinkLauncher` that never leaves the process.
#[derive(Default)]
pub struct NullLauncher {
    launched: Mutex<Vec<Url>>,
    failure: Mutex<Option<String>>,
}

impl NullLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a launcher that fails every hand-off with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            launched: Mutex::new(Vec::new()),
            failure: Mutex::new(Some(message.into())),
        }
    }

    /// Script subsequent hand-offs to fail (or succeed again with `None`).
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.lock().unwrap() = message;
    }

    /// URIs handed off so far, in order.
    pub fn launched(&self) -> Vec<Url> {
        self.launched.lock().unwrap().clone()
    }
}

impl LinkLauncher for NullLauncher {
    fn launch(&self, uri: &Url) -> Result<(), HandOffError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(HandOffError(message));
        }
        self.launched.lock().unwrap().push(uri.clone());
        Ok(())
    }
}
