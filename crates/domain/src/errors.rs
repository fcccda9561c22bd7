//! Error types used throughout the access layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Painel
///
/// `InvalidCredentials` and `Http` carry the backend's own message verbatim
/// because callers surface it to the user unchanged.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SessionError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Sessão expirada")]
    SessionExpired,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Malformed session record: {0}")]
    MalformedSession(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Painel operations
pub type Result<T> = std::result::Result<T, SessionError>;
