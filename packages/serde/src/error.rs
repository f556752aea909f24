//! Error types for the serde layer.

use thiserror::Error;

/// Errors from converting between documents and Rust types.
#[derive(Debug, Error)]
pub enum Error {
    /// A stored value did not deserialize into the requested type.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A Rust value could not be serialized.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// The document rejected the operation.
    #[error(transparent)]
    Document(#[from] structyaml_core::Error),
}

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
