//! Cryptographic primitives for the pact wallet link.
//!
//! - **X25519** for the handshake key agreement with the external wallet
//! - **SHA3-256** for address derivation and the session-secret KDF
//! - **AES-256-CBC + PKCS#7** for the handshake payload cipher
//!
//! This is not a general-purpose cryptographic library; it implements
//! exactly the primitives the wallet handshake and ledger addressing need.

pub mod address;
pub mod agreement;
pub mod cipher;
pub mod error;
pub mod hash;
pub mod keys;

pub use address::{derive_account_address, derive_metadata_address};
pub use agreement::derive_shared_secret;
pub use cipher::{decrypt, decrypt_from_hex, encrypt, encrypt_to_hex};
pub use error::CryptoError;
pub use hash::{sha3_256, sha3_256_multi};
pub use keys::{generate_keypair, keypair_from_private, public_from_private};
