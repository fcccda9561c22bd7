//! Traits for storage substrates and the accounts backend
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (durable store, cookie jar, accounts backend) and
//! let the request gateway consume the session service without depending on
//! its concrete type.

use async_trait::async_trait;
use painel_domain::SessionError;

use super::types::{LoginResponse, RefreshResponse};

/// Trait for the durable key-value substrate
///
/// Holds the persisted session record under the `access_token`,
/// `refresh_token`, and `user` keys. Implementations surface plain string
/// errors; the vault maps them into the domain error type.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    /// `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// Returns error if the substrate cannot be read
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Returns error if the substrate cannot be written
    async fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Remove a key
    ///
    /// Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns error if the substrate cannot be written
    async fn remove(&self, key: &str) -> Result<(), String>;
}

/// Trait for the cookie substrate mirrored next to the durable store
///
/// The session service writes the token cookies so the edge route guard can
/// gate navigation on their presence. Values are never read back here.
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Set a cookie, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the jar cannot be written
    async fn set(&self, name: &str, value: &str) -> Result<(), String>;

    /// Expire a cookie
    ///
    /// Clearing an absent cookie is not an error.
    ///
    /// # Errors
    /// Returns error if the jar cannot be written
    async fn clear(&self, name: &str) -> Result<(), String>;
}

/// Trait for the accounts backend endpoints the session consumes
#[async_trait]
pub trait AccountsBackend: Send + Sync {
    /// Exchange credentials for a token pair and the user profile
    ///
    /// # Errors
    /// Returns `SessionError::InvalidCredentials` with the backend's message
    /// on rejection, `SessionError::Network` on transport failure.
    async fn obtain_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, SessionError>;

    /// Exchange the refresh token for a new access token
    ///
    /// # Returns
    /// The new access token, plus a rotated refresh token when the backend
    /// issues one.
    ///
    /// # Errors
    /// Returns `SessionError::Http` on rejection, `SessionError::Network` on
    /// transport failure.
    async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, SessionError>;

    /// Notify the backend that the session ended
    ///
    /// Non-success statuses are not errors; the backend's answer carries no
    /// information the caller acts on.
    ///
    /// # Errors
    /// Returns `SessionError::Network` on transport failure.
    async fn logout(&self, access: &str, refresh: &str) -> Result<(), SessionError>;
}

/// Gateway-facing handle over the session service
///
/// Injected into whatever issues HTTP calls so that request-time renewal and
/// session-owned renewal go through one shared path.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current access token as persisted in the durable store
    ///
    /// Reads the durable record rather than in-memory state, matching what
    /// outbound requests attach as the bearer credential.
    async fn stored_access_token(&self) -> Option<String>;

    /// Renew the access token
    ///
    /// Never fails: `false` means renewal was impossible and the persisted
    /// session has been cleared. Concurrent callers share a single in-flight
    /// renewal.
    async fn renew_credentials(&self) -> bool;

    /// Tear down all persisted and in-memory session state
    async fn force_logout(&self);
}
