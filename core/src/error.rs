//! Error types for the shortener client.
//!
//! # Design
//! One enum covers every way an operation can fail, from construction
//! through decoding. Nothing is retried or logged inside the crate: each
//! variant is handed straight back to the caller. `Api` keeps the numeric
//! status so callers can tell an unauthorized key apart from a server
//! failure without parsing the message.

use thiserror::Error;

use crate::config::ENV_API_KEY;
use crate::http::BoxError;

pub type Result<T> = std::result::Result<T, ShortenerError>;

/// Errors returned by `ShortenerClient`.
#[derive(Debug, Error)]
pub enum ShortenerError {
    /// No explicit API key was given and the environment does not provide one.
    #[error("could not find {:?} in your environment", ENV_API_KEY)]
    MissingApiKey,

    /// The URL argument was empty or whitespace-only.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport could not complete the exchange.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("decoding response failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ShortenerError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ShortenerError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the server rejected the API key.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
