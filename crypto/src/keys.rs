//! X25519 key generation for one handshake session.
//!
//! Key pairs are ephemeral: generated at `connect()`, dropped (and
//! zeroized) at disconnect. Callers must never persist the private key.

use pact_types::{KeyPair, PrivateKey, PublicKey};
use rand::rngs::OsRng;
use x25519_dalek::StaticSecret;

/// Generate a new X25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = x25519_dalek::PublicKey::from(&secret);
    KeyPair {
        public: PublicKey(*public.as_bytes()),
        private: PrivateKey(secret.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let secret = StaticSecret::from(private.0);
    let public = x25519_dalek::PublicKey::from(&secret);
    PublicKey(*public.as_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}
