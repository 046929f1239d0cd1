use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("malformed request URI: {0}")]
    MalformedUri(String),

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    #[error("payload is not valid UTF-8")]
    Utf8,

    #[error("invalid JSON payload: {0}")]
    Json(String),

    #[error("invalid counterpart public key: {0}")]
    InvalidPublicKey(String),
}
