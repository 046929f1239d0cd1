//! Cryptographic key types for the wallet handshake.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::AddressError;

/// A 32-byte X25519 public key, safe to transmit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

/// A 32-byte X25519 private scalar.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// The 32-byte symmetric secret agreed with the counterpart wallet.
///
/// Held only for the lifetime of a connection and zeroized on drop.
/// Like `PrivateKey`, it carries no `Debug`/`Clone`/serde.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(pub [u8; 32]);

/// An X25519 key pair (public + private).
///
/// Use `pact_crypto::generate_keypair()` to construct key pairs.
/// This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Format as `0x`-prefixed lowercase hex (the wire encoding).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a 32-byte public key from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let stripped = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        let bytes = hex::decode(stripped).map_err(|_| AddressError::InvalidHex(s.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(s.len()))?;
        Ok(Self(arr))
    }
}

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
