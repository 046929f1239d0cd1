//! Deterministic ledger address derivation.
//!
//! Two derivations are needed to locate balances:
//! - the fungible-asset metadata address, from a creator address and a
//!   fixed seed string (scheme tag `0xFE`);
//! - a plain account address from a public key (scheme tag `0x00`), used
//!   when the wallet approves a connection without disclosing its address.
//!
//! Both are pure functions of their inputs.

use pact_types::{LedgerAddress, PublicKey};

/// Scheme tag for seed-derived object (metadata) addresses.
const SCHEME_DERIVE_FROM_SEED: u8 = 0xFE;

/// Scheme tag for single-key account addresses.
const SCHEME_SINGLE_KEY: u8 = 0x00;

/// Derive the metadata address of a fungible asset from its creator
/// address and seed: `SHA3-256(creator_bytes ++ utf8(seed) ++ [0xFE])`.
pub fn derive_metadata_address(creator: &LedgerAddress, seed: &str) -> LedgerAddress {
    let digest = crate::hash::sha3_256_multi(&[
        &creator.to_bytes(),
        seed.as_bytes(),
        &[SCHEME_DERIVE_FROM_SEED],
    ]);
    LedgerAddress::from_bytes(&digest)
}

/// Derive an account address from a public key:
/// `SHA3-256(public_key ++ [0x00])`.
pub fn derive_account_address(public_key: &PublicKey) -> LedgerAddress {
    let digest = crate::hash::sha3_256_multi(&[public_key.as_bytes(), &[SCHEME_SINGLE_KEY]]);
    LedgerAddress::from_bytes(&digest)
}
