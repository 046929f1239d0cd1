//! Ledger address type with `0x` prefix.
//!
//! Addresses are hex-encoded 32-byte account identifiers on the remote
//! ledger. The canonical form is trimmed, lowercased, and `0x`-prefixed;
//! short forms (fewer than 64 nibbles) are accepted and left-padded when
//! converted back to bytes.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::AddressError;

/// A ledger account address, always `0x`-prefixed lowercase hex.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LedgerAddress(String);

impl<'de> Deserialize<'de> for LedgerAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl LedgerAddress {
    /// The standard prefix for all ledger addresses.
    pub const PREFIX: &'static str = "0x";

    /// Parse and normalize an address string.
    ///
    /// Normalization: trim whitespace, lowercase, require the `0x` prefix
    /// and 1–64 hex characters after it. Anything else fails closed.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let normalized = raw.trim().to_lowercase();
        let digits = normalized
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| AddressError::MissingPrefix(raw.to_string()))?;
        if digits.is_empty() || digits.len() > 64 {
            return Err(AddressError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidHex(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Build an address from raw 32-byte account bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Decode to 32 account bytes, left-padding short addresses.
    pub fn to_bytes(&self) -> [u8; 32] {
        let digits = &self.0[Self::PREFIX.len()..];
        let padded = format!("{digits:0>64}");
        let mut out = [0u8; 32];
        // parse() guarantees the digits are valid hex of <= 64 chars
        out.copy_from_slice(&hex::decode(padded).expect("validated hex"));
        out
    }

    /// Return the canonical address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let addr = LedgerAddress::parse("  0xAbCd01  ").unwrap();
        assert_eq!(addr.as_str(), "0xabcd01");
    }

    #[test]
    fn parse_requires_prefix() {
        assert!(matches!(
            LedgerAddress::parse("abcd01"),
            Err(AddressError::MissingPrefix(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_and_overlong() {
        assert!(LedgerAddress::parse("0x").is_err());
        let overlong = format!("0x{}", "a".repeat(65));
        assert!(LedgerAddress::parse(&overlong).is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!(matches!(
            LedgerAddress::parse("0xg123"),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn bytes_roundtrip() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x42;
        let addr = LedgerAddress::from_bytes(&bytes);
        assert_eq!(addr.to_bytes(), bytes);
    }

    #[test]
    fn deserialize_validates_and_normalizes() {
        let addr: LedgerAddress = serde_json::from_str(r#""0xABCD""#).unwrap();
        assert_eq!(addr.as_str(), "0xabcd");
        assert!(serde_json::from_str::<LedgerAddress>(r#""abcd""#).is_err());
    }

    #[test]
    fn short_address_left_pads() {
        let addr = LedgerAddress::parse("0x1").unwrap();
        let bytes = addr.to_bytes();
        assert_eq!(bytes[31], 0x01);
        assert_eq!(&bytes[..31], &[0u8; 31]);
    }
}
