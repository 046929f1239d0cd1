//! Session secret derivation via X25519 key agreement.
//!
//! Both sides compute the same Diffie-Hellman point from complementary key
//! pairs; a SHA3-256 KDF with a fixed context string turns the raw point
//! into the 32-byte session secret.

use pact_types::{PrivateKey, PublicKey, SharedSecret};
use x25519_dalek::StaticSecret;

use crate::error::CryptoError;

/// Domain-separation context mixed into the session-secret KDF.
const KDF_CONTEXT: &[u8] = b"pact-session-v1";

/// Derive the symmetric session secret from our private key and the
/// counterpart wallet's public key.
///
/// Rejects low-order counterpart keys (the shared point would be the
/// identity, giving an attacker-predictable secret).
pub fn derive_shared_secret(
    local_private: &PrivateKey,
    counterpart_public: &PublicKey,
) -> Result<SharedSecret, CryptoError> {
    let secret = StaticSecret::from(local_private.0);
    let counterpart = x25519_dalek::PublicKey::from(counterpart_public.0);
    let shared = secret.diffie_hellman(&counterpart);

    if !shared.was_contributory() {
        return Err(CryptoError::NonContributoryKey);
    }

    let key = crate::hash::sha3_256_multi(&[shared.as_bytes(), KDF_CONTEXT]);
    Ok(SharedSecret(key))
}
