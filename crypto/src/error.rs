use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("ciphertext too short: {len} bytes, need at least {min}")]
    CiphertextTooShort { len: usize, min: usize },

    #[error("decryption failed: bad padding or corrupted ciphertext")]
    DecryptionFailed,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("counterpart public key is non-contributory")]
    NonContributoryKey,
}
