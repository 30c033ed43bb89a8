use thiserror::Error;

use pyon_codec::{DecodeError, EncodeError};

/// Errors surfaced to callers of the facade.
#[derive(Error, Debug)]
pub enum PyonError {
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("not a valid pyon output file: '{0}'")]
    InvalidDestination(String),

    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PyonError>;
