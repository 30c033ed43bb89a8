use thiserror::Error;

/// Errors that abort an encode. Encoding never degrades silently.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that abort a decode.
///
/// Only text that is not JSON at all fails here; malformed envelopes inside
/// valid JSON decode to `Value::Null` and are logged instead.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("syntax error: {0}")]
    Syntax(#[from] serde_json::Error),
}
