//! HTTP client for ledger balance reads and transfer requests.
//!
//! Wraps `reqwest::Client` with the configured endpoints and provides typed
//! methods for each remote call. Balance reads go through the ledger's
//! `view` function endpoint; the native coin additionally has a
//! resource-fetch fallback path. Transfers are delegated to the external
//! signing/broadcast service — this client never signs anything.

use serde::Deserialize;
use serde_json::json;
use std::sync::RwLock;
use std::time::Duration;

use pact_types::{LedgerAddress, Timestamp, TokenAmount};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::snapshot::BalanceSnapshot;

/// View function returning the native coin balance of an account.
const NATIVE_BALANCE_FUNCTION: &str = "0x1::coin::balance";

/// Type argument selecting the native coin.
const NATIVE_COIN_TYPE: &str = "0x1::aptos_coin::AptosCoin";

/// Resource path used by the fallback native-balance read.
const NATIVE_COIN_STORE: &str = "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>";

/// View function returning a fungible-asset balance.
const TOKEN_BALANCE_FUNCTION: &str = "0x1::primary_fungible_store::balance";

/// Type argument selecting the fungible-asset metadata object.
const TOKEN_METADATA_TYPE: &str = "0x1::fungible_asset::Metadata";

/// Client for the ledger's RPC surface and the transfer service.
pub struct LedgerQueryClient {
    http: reqwest::Client,
    rpc_url: String,
    transfer_url: String,
    token_metadata: LedgerAddress,
    snapshot: RwLock<Option<BalanceSnapshot>>,
    last_error: RwLock<Option<String>>,
}

/// Success payload reported by the transfer service.
#[derive(Clone, Debug, Deserialize)]
pub struct TransferReceipt {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LedgerQueryClient {
    /// Create a client from configuration.
    ///
    /// The fungible-asset metadata address is derived here, once, from the
    /// configured creator and seed — there is no separate hardcoded copy.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| LedgerError::Config(format!("failed to create HTTP client: {e}")))?;

        let token_metadata =
            pact_crypto::derive_metadata_address(&config.token_creator, &config.token_seed);
        tracing::debug!(metadata = %token_metadata, "derived fungible asset metadata address");

        Ok(Self {
            http,
            rpc_url: config.rpc_url.trim_end_matches('/').to_string(),
            transfer_url: config.transfer_url.trim_end_matches('/').to_string(),
            token_metadata,
            snapshot: RwLock::new(None),
            last_error: RwLock::new(None),
        })
    }

    /// The derived metadata address used for token balance reads.
    pub fn token_metadata_address(&self) -> &LedgerAddress {
        &self.token_metadata
    }

    // ── Balance reads ──────────────────────────────────────────────────

    /// Native coin balance. "Not found" means the account has no coin
    /// store yet and reads as zero.
    pub async fn native_balance(
        &self,
        address: &LedgerAddress,
    ) -> Result<TokenAmount, LedgerError> {
        match self.native_balance_via_view(address).await {
            Ok(amount) => Ok(amount),
            Err(e @ (LedgerError::Read(_) | LedgerError::Http(_))) => {
                tracing::warn!("view balance read failed ({e}), trying resource path");
                self.native_balance_via_resource(address).await
            }
            Err(e) => Err(e),
        }
    }

    async fn native_balance_via_view(
        &self,
        address: &LedgerAddress,
    ) -> Result<TokenAmount, LedgerError> {
        let body = json!({
            "function": NATIVE_BALANCE_FUNCTION,
            "type_arguments": [NATIVE_COIN_TYPE],
            "arguments": [address.as_str()],
        });
        let response = self
            .http
            .post(format!("{}/view", self.rpc_url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            let values: serde_json::Value = response
                .json()
                .await
                .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
            parse_view_amount(&values)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(TokenAmount::ZERO)
        } else {
            Err(LedgerError::Http(status.as_u16()))
        }
    }

    /// Alternate native-balance path: fetch the coin store resource
    /// directly. HTTP 404 means "no coin store" — a zero balance.
    async fn native_balance_via_resource(
        &self,
        address: &LedgerAddress,
    ) -> Result<TokenAmount, LedgerError> {
        let url = format!(
            "{}/accounts/{}/resource/{}",
            self.rpc_url,
            address.as_str(),
            NATIVE_COIN_STORE
        );
        let response = self.http.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(TokenAmount::ZERO);
        }
        if !status.is_success() {
            return Err(LedgerError::Http(status.as_u16()));
        }

        let resource: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
        let value = resource
            .pointer("/data/coin/value")
            .ok_or_else(|| LedgerError::InvalidResponse("missing data.coin.value".into()))?;
        parse_amount_value(value)
    }

    /// Fungible-asset balance at the derived metadata address. Both
    /// "not found" and "bad request" (asset not registered for the
    /// account) read as zero.
    pub async fn token_balance(
        &self,
        address: &LedgerAddress,
    ) -> Result<TokenAmount, LedgerError> {
        let body = json!({
            "function": TOKEN_BALANCE_FUNCTION,
            "type_arguments": [TOKEN_METADATA_TYPE],
            "arguments": [address.as_str(), self.token_metadata.as_str()],
        });
        let response = self
            .http
            .post(format!("{}/view", self.rpc_url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            let values: serde_json::Value = response
                .json()
                .await
                .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
            parse_view_amount(&values)
        } else if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::BAD_REQUEST
        {
            Ok(TokenAmount::ZERO)
        } else {
            Err(LedgerError::Http(status.as_u16()))
        }
    }

    /// Run both balance reads and replace the cached snapshot only if both
    /// complete. A partial failure leaves the previous snapshot untouched
    /// and records a soft error for display.
    pub async fn refresh_balances(
        &self,
        address: &LedgerAddress,
    ) -> Result<BalanceSnapshot, LedgerError> {
        let result = tokio::try_join!(self.native_balance(address), self.token_balance(address));
        match result {
            Ok((native_balance, token_balance)) => {
                let snapshot = BalanceSnapshot {
                    native_balance,
                    token_balance,
                    address: address.clone(),
                    fetched_at: Timestamp::now(),
                };
                *self.snapshot.write().expect("snapshot lock") = Some(snapshot.clone());
                *self.last_error.write().expect("error lock") = None;
                tracing::info!(
                    address = %address,
                    native = %native_balance,
                    token = %token_balance,
                    "balances refreshed"
                );
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(address = %address, "balance refresh failed: {e}");
                *self.last_error.write().expect("error lock") = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The most recent complete snapshot, if any refresh has succeeded.
    pub fn snapshot(&self) -> Option<BalanceSnapshot> {
        self.snapshot.read().expect("snapshot lock").clone()
    }

    /// Soft error from the last refresh attempt (cleared on success).
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().expect("error lock").clone()
    }

    // ── Transfers ──────────────────────────────────────────────────────

    /// Request a transfer from the external signing/broadcast service.
    ///
    /// The remote's error detail is surfaced verbatim; failures are never
    /// retried here.
    pub async fn request_transfer(
        &self,
        to: &LedgerAddress,
        amount: TokenAmount,
    ) -> Result<TransferReceipt, LedgerError> {
        let body = json!({
            "to_address": to.as_str(),
            "amount": amount.as_decimal(),
        });
        let response = self
            .http
            .post(&self.transfer_url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| LedgerError::InvalidResponse(e.to_string()));
        }

        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .or_else(|| v.get("message"))
                    .and_then(|d| d.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        tracing::warn!(to = %to, "transfer rejected: {detail}");
        Err(LedgerError::Transfer(detail))
    }
}

fn transport_error(e: reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Read(format!("request timed out: {e}"))
    } else if e.is_connect() {
        LedgerError::Read(format!("connection failed: {e}"))
    } else {
        LedgerError::Read(e.to_string())
    }
}

/// Extract the single amount returned by a view call (`[value]`).
fn parse_view_amount(values: &serde_json::Value) -> Result<TokenAmount, LedgerError> {
    let first = values
        .as_array()
        .and_then(|a| a.first())
        .ok_or_else(|| LedgerError::InvalidResponse("view result is not a 1-element array".into()))?;
    parse_amount_value(first)
}

/// Amounts arrive as decimal strings (u64/u128 on the wire) or, from some
/// gateways, as plain JSON numbers.
fn parse_amount_value(value: &serde_json::Value) -> Result<TokenAmount, LedgerError> {
    if let Some(s) = value.as_str() {
        return TokenAmount::parse_raw(s)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()));
    }
    if let Some(n) = value.as_u64() {
        return Ok(TokenAmount::from_raw(n as u128));
    }
    Err(LedgerError::InvalidResponse(format!(
        "unexpected amount value: {value}"
    )))
}
