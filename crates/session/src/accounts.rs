//! HTTP client for the accounts token endpoints
//!
//! Thin reqwest wrapper around the three backend calls the session lifecycle
//! needs: obtaining a token pair, refreshing the access token, and revoking
//! the refresh token on logout.

use std::time::Duration;

use async_trait::async_trait;
use painel_domain::constants::API_BASE_PATH;
use painel_domain::{HttpConfig, Result, SessionError};
use tracing::debug;

use super::traits::AccountsBackend;
use super::types::{ApiErrorBody, LoginResponse, RefreshResponse, GENERIC_LOGIN_ERROR};

/// Client for the backend accounts endpoints
pub struct AccountsClient {
    http: reqwest::Client,
    base_url: String,
}

impl AccountsClient {
    /// Build a client for the configured accounts backend
    ///
    /// The client carries the configured timeout and never picks up proxy
    /// settings from the environment.
    ///
    /// # Errors
    /// Returns `SessionError::Config` when the HTTP client cannot be built
    /// from the given configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .no_proxy()
            .build()
            .map_err(|e| SessionError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{API_BASE_PATH}{path}", self.base_url)
    }
}

#[async_trait]
impl AccountsBackend for AccountsClient {
    async fn obtain_token(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .http
            .post(self.endpoint("/accounts/token/"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.login_message(),
                Err(_) => GENERIC_LOGIN_ERROR.to_string(),
            };
            return Err(SessionError::InvalidCredentials(message));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| SessionError::Network(format!("invalid token response: {e}")))
    }

    async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse> {
        let response = self
            .http
            .post(self.endpoint("/accounts/token/refresh/"))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(SessionError::Http { status: status.as_u16(), message });
        }

        response
            .json::<RefreshResponse>()
            .await
            .map_err(|e| SessionError::Network(format!("invalid refresh response: {e}")))
    }

    async fn logout(&self, access: &str, refresh: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("/accounts/logout/"))
            .bearer_auth(access)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        // Revocation is best-effort; a rejected request must not block the
        // local teardown that follows.
        if !response.status().is_success() {
            debug!(status = %response.status(), "Logout endpoint rejected token revocation");
        }

        Ok(())
    }
}
