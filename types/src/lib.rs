//! Fundamental types for the pact wallet link.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: key material, ledger addresses, token amounts, timestamps, and
//! the connection state enum.

pub mod address;
pub mod amount;
pub mod error;
pub mod keys;
pub mod state;
pub mod time;

pub use address::LedgerAddress;
pub use amount::TokenAmount;
pub use error::{AddressError, AmountError};
pub use keys::{KeyPair, PrivateKey, PublicKey, SharedSecret};
pub use state::SessionState;
pub use time::Timestamp;
