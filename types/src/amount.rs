//! Token amount type shared by native and fungible-asset balances.
//!
//! Amounts are represented as raw integer ledger units (u128) to avoid
//! floating-point errors. Both assets use a fixed 8-decimal scale; the
//! decimal view exists only at the display/API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AmountError;

/// Number of decimal places in one whole unit.
pub const DECIMALS: u32 = 8;

/// Raw units per whole unit (10^8).
pub const SCALE: u128 = 100_000_000;

/// An asset amount in raw ledger units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Parse a raw integer amount from a decimal string (the ledger's
    /// wire representation for u64/u128 values).
    pub fn parse_raw(s: &str) -> Result<Self, AmountError> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| AmountError::InvalidRaw(s.to_string()))
    }

    /// Convert a decimal amount (e.g. user input `5.0`) to raw units.
    ///
    /// Rejects negative, non-finite, and out-of-range values.
    pub fn from_decimal(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AmountError::InvalidDecimal(value));
        }
        let raw = value * SCALE as f64;
        if raw > u128::MAX as f64 {
            return Err(AmountError::InvalidDecimal(value));
        }
        Ok(Self(raw.round() as u128))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Decimal view for display and the transfer API boundary.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:08}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}
