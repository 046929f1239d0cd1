//! Parsing errors for the shared types.

use thiserror::Error;

/// Errors from address and public-key parsing.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address missing 0x prefix: {0}")]
    MissingPrefix(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: {0}")]
    InvalidLength(usize),
}

/// Errors from amount parsing and conversion.
#[derive(Debug, Error)]
pub enum AmountError {
    #[error("invalid raw amount: {0}")]
    InvalidRaw(String),

    #[error("invalid decimal amount: {0}")]
    InvalidDecimal(f64),
}
