//! Error types for session loading and snapshot construction.
//!
//! Every failure in this crate is fatal to the caller: a session either loads
//! completely or the error propagates up and aborts startup. There is no retry
//! and no partial snapshot.
//!
//! ## Error Categories
//!
//! - **Transport Errors**: the OpenF1 request could not be sent or completed
//! - **Status Errors**: OpenF1 answered with a non-success HTTP status
//! - **Parse Errors**: a response body did not match the expected shape
//! - **Cache Errors**: the on-disk response cache could not be read or written
//! - **File Errors**: the lap export could not be written
//! - **Lookup Errors**: the requested season/round/session does not exist
//!
//! ## Helper Constructors
//!
//! ```rust
//! use paddock::{PaddockError, SessionId};
//!
//! let err = PaddockError::parse_error("laps response", "expected an array");
//! assert!(err.to_string().contains("laps response"));
//!
//! let missing = PaddockError::session_not_found(SessionId::BAHRAIN_2024);
//! assert!(missing.to_string().contains("2024"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::SessionId;

/// Result type alias for session operations.
pub type Result<T, E = PaddockError> = std::result::Result<T, E>;

/// Main error type for session loading.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PaddockError {
    #[error("Request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Response cache error: {path}")]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session not found: {id}")]
    SessionNotFound { id: SessionId },

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl PaddockError {
    /// Helper constructor for transport errors with the request URL.
    pub fn http_error(url: impl Into<String>, source: reqwest::Error) -> Self {
        PaddockError::Http { url: url.into(), source }
    }

    /// Helper constructor for non-success status codes.
    pub fn status_error(url: impl Into<String>, status: u16) -> Self {
        PaddockError::Status { url: url.into(), status }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        PaddockError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for cache I/O errors with path context.
    pub fn cache_error(path: PathBuf, source: std::io::Error) -> Self {
        PaddockError::Cache { path, source }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        PaddockError::File { path, source }
    }

    /// Helper constructor for unknown sessions.
    pub fn session_not_found(id: SessionId) -> Self {
        PaddockError::SessionNotFound { id }
    }
}

impl From<serde_json::Error> for PaddockError {
    fn from(err: serde_json::Error) -> Self {
        PaddockError::Parse { context: "JSON".to_string(), details: err.to_string() }
    }
}
