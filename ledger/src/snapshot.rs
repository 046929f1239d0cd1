//! Balance snapshot published to UI observers.

use serde::Serialize;

use pact_types::{LedgerAddress, Timestamp, TokenAmount};

/// A consistent reading of both balances for one address.
///
/// Snapshots are replaced wholesale: a refresh either produces a complete
/// new snapshot or leaves the previous one untouched. They are never
/// partially updated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BalanceSnapshot {
    pub native_balance: TokenAmount,
    pub token_balance: TokenAmount,
    pub address: LedgerAddress,
    pub fetched_at: Timestamp,
}
