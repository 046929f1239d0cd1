//! The wallet connection state machine.
//!
//! State flow: `Disconnected` → `Connecting` → `AwaitingResponse` →
//! `Connected` → `Disconnecting` → `Disconnected`, with every failure
//! path short-circuiting back to `Disconnected` carrying an error.
//!
//! Reentrancy: the wallet's callback and the response timeout race; an
//! attempt counter plus the state check make whichever loses the race a
//! no-op, including callbacks delivered after a timeout already fired.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use pact_crypto::{derive_account_address, derive_shared_secret, generate_keypair};
use pact_ledger::LedgerQueryClient;
use pact_link::{
    build_connect_uri, build_disconnect_uri, decode_approval, parse_callback,
    parse_public_key_hex, ConnectPayload, DisconnectPayload, ResponseOutcome,
};
use pact_types::{KeyPair, LedgerAddress, SessionState, SharedSecret};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::launcher::LinkLauncher;

/// Observer view of the session, published on every transition.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub address: Option<LedgerAddress>,
    pub error: Option<SessionError>,
}

/// How `handle_callback` disposed of an inbound URI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackDisposition {
    /// The URI does not belong to this application; route it elsewhere.
    NoMatch,
    /// The URI was consumed by the state machine.
    Handled,
}

struct Inner {
    state: SessionState,
    address: Option<LedgerAddress>,
    error: Option<SessionError>,
    key_material: Option<KeyPair>,
    shared_secret: Option<SharedSecret>,
    /// Bumped on every connect attempt and every terminal transition;
    /// stale timeouts and late callbacks check it and stand down.
    attempt: u64,
}

struct Shared {
    config: SessionConfig,
    launcher: Arc<dyn LinkLauncher>,
    ledger: Option<Arc<LedgerQueryClient>>,
    inner: Mutex<Inner>,
    tx: watch::Sender<SessionSnapshot>,
}

/// Handle to the single live wallet session.
///
/// Cheap to clone; all clones share one state machine. Key material and
/// the shared secret never leave this type.
#[derive(Clone)]
pub struct ConnectionSession {
    shared: Arc<Shared>,
}

impl ConnectionSession {
    /// Create a disconnected session.
    ///
    /// `ledger` is optional: when present, reaching `Connected` spawns a
    /// balance refresh for the session address as a side effect.
    pub fn new(
        config: SessionConfig,
        launcher: Arc<dyn LinkLauncher>,
        ledger: Option<Arc<LedgerQueryClient>>,
    ) -> Self {
        let initial = SessionSnapshot {
            state: SessionState::Disconnected,
            address: None,
            error: None,
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            shared: Arc::new(Shared {
                config,
                launcher,
                ledger,
                inner: Mutex::new(Inner {
                    state: SessionState::Disconnected,
                    address: None,
                    error: None,
                    key_material: None,
                    shared_secret: None,
                    attempt: 0,
                }),
                tx,
            }),
        }
    }

    // ── Observation ────────────────────────────────────────────────────

    /// Subscribe to state transitions (UI binding).
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.tx.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.shared.inner.lock().expect("session lock").state
    }

    /// The connected wallet address; `None` unless `Connected`.
    pub fn address(&self) -> Option<LedgerAddress> {
        self.shared.inner.lock().expect("session lock").address.clone()
    }

    /// The error that terminated the last attempt, if any.
    pub fn last_error(&self) -> Option<SessionError> {
        self.shared.inner.lock().expect("session lock").error.clone()
    }

    /// Run a closure over the live shared secret without copying it out.
    ///
    /// Returns `None` when no connection is established.
    pub fn shared_secret_with<R>(&self, f: impl FnOnce(&SharedSecret) -> R) -> Option<R> {
        let inner = self.shared.inner.lock().expect("session lock");
        inner.shared_secret.as_ref().map(f)
    }

    /// Encrypt a payload for the connected wallet (hex wire encoding).
    pub fn encrypt_for_counterpart(&self, plaintext: &[u8]) -> Result<String, SessionError> {
        let inner = self.shared.inner.lock().expect("session lock");
        let secret = inner
            .shared_secret
            .as_ref()
            .ok_or(SessionError::NotConnected)?;
        Ok(pact_crypto::encrypt_to_hex(plaintext, secret.as_bytes()))
    }

    /// Decrypt a hex-encoded payload received from the connected wallet.
    pub fn decrypt_from_counterpart(&self, encoded: &str) -> Result<Vec<u8>, SessionError> {
        let inner = self.shared.inner.lock().expect("session lock");
        let secret = inner
            .shared_secret
            .as_ref()
            .ok_or(SessionError::NotConnected)?;
        pact_crypto::decrypt_from_hex(encoded, secret.as_bytes())
            .map_err(|e| SessionError::Decode(e.to_string()))
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Start a connect attempt.
    ///
    /// Valid only from `Disconnected`; a second call while a handshake is
    /// in flight is rejected rather than racing a second hand-off. On
    /// success the session sits in `AwaitingResponse` with the response
    /// timeout armed.
    pub async fn connect(&self) -> Result<(), SessionError> {
        let (uri, attempt) = {
            let mut inner = self.shared.inner.lock().expect("session lock");
            if !inner.state.can_connect() {
                return Err(SessionError::ConnectInProgress);
            }

            let keys = generate_keypair();
            let payload = ConnectPayload {
                app_info: self.shared.config.app.clone(),
                redirect_link: self.shared.config.redirect_link.clone(),
                dapp_encryption_public_key: keys.public.to_hex(),
            };
            let uri = match build_connect_uri(&self.shared.config.wallet_scheme, &payload) {
                Ok(uri) => uri,
                Err(e) => {
                    let err = SessionError::HandOff(e.to_string());
                    self.shared.fail_locked(&mut inner, err.clone());
                    return Err(err);
                }
            };

            inner.key_material = Some(keys);
            inner.error = None;
            inner.address = None;
            inner.attempt += 1;
            inner.state = SessionState::Connecting;
            self.shared.publish(&inner);
            tracing::info!(attempt = inner.attempt, "wallet connect started");
            (uri, inner.attempt)
        };

        // Hand off outside the lock; the reply arrives out-of-band later.
        let launch_result = self.shared.launcher.launch(&uri);

        let mut inner = self.shared.inner.lock().expect("session lock");
        if inner.attempt != attempt || inner.state != SessionState::Connecting {
            // A concurrent disconnect won the race; nothing left to do.
            return Ok(());
        }
        match launch_result {
            Ok(()) => {
                inner.state = SessionState::AwaitingResponse;
                self.shared.publish(&inner);
                drop(inner);
                self.arm_timeout(attempt);
                Ok(())
            }
            Err(e) => {
                let err = SessionError::HandOff(e.0);
                self.shared.fail_locked(&mut inner, err.clone());
                Err(err)
            }
        }
    }

    fn arm_timeout(&self, attempt: u64) {
        let shared = self.shared.clone();
        let timeout = Duration::from_secs(shared.config.response_timeout_secs);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut inner = shared.inner.lock().expect("session lock");
            if inner.state == SessionState::AwaitingResponse && inner.attempt == attempt {
                tracing::warn!(attempt, "wallet response timed out");
                shared.fail_locked(&mut inner, SessionError::Timeout);
            }
        });
    }

    /// Route an inbound deep-link callback.
    ///
    /// URIs for other applications are reported as `NoMatch` so the
    /// platform can keep routing them; everything on our scheme is fed to
    /// the state machine.
    pub async fn handle_callback(&self, uri: &str) -> CallbackDisposition {
        match parse_callback(uri, &self.shared.config.app_scheme) {
            None => CallbackDisposition::NoMatch,
            Some(callback) => {
                let _ = self
                    .handle_response(callback.outcome, callback.data.as_deref())
                    .await;
                CallbackDisposition::Handled
            }
        }
    }

    /// Consume the wallet's handshake response.
    ///
    /// Only meaningful in `AwaitingResponse`; anything arriving later
    /// (e.g. after the timeout already fired) is a no-op.
    pub async fn handle_response(
        &self,
        outcome: ResponseOutcome,
        data: Option<&str>,
    ) -> Result<(), SessionError> {
        let refresh_address = {
            let mut inner = self.shared.inner.lock().expect("session lock");
            if inner.state != SessionState::AwaitingResponse {
                tracing::debug!(state = %inner.state, "ignoring late wallet response");
                return Ok(());
            }

            match outcome {
                ResponseOutcome::Rejected => {
                    return Err(self.shared.fail_locked(&mut inner, SessionError::Rejected));
                }
                ResponseOutcome::Unknown(value) => {
                    let err = SessionError::UnrecognizedResponse(value);
                    return Err(self.shared.fail_locked(&mut inner, err));
                }
                ResponseOutcome::Approved => {}
            }

            let raw = match data {
                Some(raw) if !raw.is_empty() => raw,
                _ => {
                    let err = SessionError::MissingResponseData;
                    return Err(self.shared.fail_locked(&mut inner, err));
                }
            };
            let payload = match decode_approval(raw) {
                Ok(payload) => payload,
                Err(e) => {
                    let err = SessionError::Decode(e.to_string());
                    return Err(self.shared.fail_locked(&mut inner, err));
                }
            };
            let counterpart_hex = match payload.counterpart_public_key {
                Some(hex) => hex,
                None => {
                    let err = SessionError::MissingResponseData;
                    return Err(self.shared.fail_locked(&mut inner, err));
                }
            };
            let counterpart = match parse_public_key_hex(&counterpart_hex) {
                Ok(key) => key,
                Err(e) => {
                    let err = SessionError::Decode(e.to_string());
                    return Err(self.shared.fail_locked(&mut inner, err));
                }
            };

            let secret = {
                let keys = match inner.key_material.as_ref() {
                    Some(keys) => keys,
                    None => {
                        let err = SessionError::MissingKeyMaterial;
                        return Err(self.shared.fail_locked(&mut inner, err));
                    }
                };
                match derive_shared_secret(&keys.private, &counterpart) {
                    Ok(secret) => secret,
                    Err(e) => {
                        let err = SessionError::Decode(e.to_string());
                        return Err(self.shared.fail_locked(&mut inner, err));
                    }
                }
            };

            // The wallet may withhold its address; derive one from the key
            // it disclosed so balances still have somewhere to look.
            let address = match payload.address {
                Some(raw) => match LedgerAddress::parse(&raw) {
                    Ok(address) => address,
                    Err(e) => {
                        let err = SessionError::Decode(e.to_string());
                        return Err(self.shared.fail_locked(&mut inner, err));
                    }
                },
                None => derive_account_address(&counterpart),
            };

            inner.shared_secret = Some(secret);
            inner.address = Some(address.clone());
            inner.error = None;
            inner.state = SessionState::Connected;
            self.shared.publish(&inner);
            tracing::info!(address = %address, "wallet connected");
            address
        };

        self.spawn_balance_refresh(refresh_address);
        Ok(())
    }

    fn spawn_balance_refresh(&self, address: LedgerAddress) {
        if let Some(client) = self.shared.ledger.clone() {
            tokio::spawn(async move {
                // Failures are soft: the client records them for display
                // and the connection stays up.
                let _ = client.refresh_balances(&address).await;
            });
        }
    }

    /// Tear down the connection (also the only way to abandon a pending
    /// handshake). The wallet is notified best-effort; local key material
    /// is always cleared.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        let uri = {
            let mut inner = self.shared.inner.lock().expect("session lock");
            if !inner.state.can_disconnect() {
                return Err(SessionError::NotConnected);
            }
            inner.state = SessionState::Disconnecting;
            self.shared.publish(&inner);

            let payload = DisconnectPayload {
                app_info: self.shared.config.app.clone(),
                redirect_link: self.shared.config.redirect_link.clone(),
            };
            build_disconnect_uri(&self.shared.config.wallet_scheme, &payload).ok()
        };

        if let Some(uri) = uri {
            if let Err(e) = self.shared.launcher.launch(&uri) {
                tracing::warn!("disconnect hand-off failed: {e}");
            }
        }

        let mut inner = self.shared.inner.lock().expect("session lock");
        inner.key_material = None;
        inner.shared_secret = None;
        inner.address = None;
        inner.error = None;
        inner.attempt += 1;
        inner.state = SessionState::Disconnected;
        self.shared.publish(&inner);
        tracing::info!("wallet disconnected");
        Ok(())
    }
}

impl Shared {
    /// Terminal error transition: clear all secrets, land in
    /// `Disconnected`, notify observers. Returns the error for the caller
    /// to propagate.
    fn fail_locked(&self, inner: &mut Inner, err: SessionError) -> SessionError {
        inner.key_material = None;
        inner.shared_secret = None;
        inner.address = None;
        inner.attempt += 1;
        inner.error = Some(err.clone());
        inner.state = SessionState::Disconnected;
        self.publish(inner);
        tracing::info!("session failed: {err}");
        err
    }

    fn publish(&self, inner: &Inner) {
        self.tx.send_replace(SessionSnapshot {
            state: inner.state,
            address: inner.address.clone(),
            error: inner.error.clone(),
        });
    }
}
