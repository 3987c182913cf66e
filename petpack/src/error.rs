//! Error definitions for petpack.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Content blocked: {reason}")]
    Blocked { reason: String },
}

impl From<petpack_types::DataUriError> for Error {
    fn from(err: petpack_types::DataUriError) -> Self {
        Self::InvalidInput {
            message: format!("Invalid data URI: {err}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
