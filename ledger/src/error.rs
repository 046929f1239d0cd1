use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger read failed: {0}")]
    Read(String),

    #[error("ledger returned HTTP {0}")]
    Http(u16),

    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("configuration error: {0}")]
    Config(String),
}
