//! Typed access to the accounts endpoints
//!
//! Wraps [`ApiClient`] for the profile and password operations the dashboard
//! exposes. The password reset pair is reachable without a session, so those
//! calls skip bearer attachment.

use std::sync::Arc;

use painel_domain::{ProfileUpdate, Result, UserProfile};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::client::{ApiClient, RequestOptions};

/// Acknowledgement message returned by the password endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Typed wrapper over the accounts endpoints
pub struct AccountsService {
    client: Arc<ApiClient>,
}

impl AccountsService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the authenticated user's profile
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn me(&self) -> Result<UserProfile> {
        self.client.get("/accounts/me/").await
    }

    /// Apply a partial profile update and return the updated profile
    ///
    /// Only the fields set on `update` are sent.
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.client.patch("/accounts/update-profile/", Some(update)).await
    }

    /// Change the authenticated user's password
    ///
    /// # Errors
    /// Returns `SessionError::Http` with the backend's message when the
    /// current password does not match; see [`ApiClient::request`] for the
    /// rest.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<DetailResponse> {
        self.client
            .post(
                "/accounts/change-password/",
                Some(&json!({ "old_password": old_password, "new_password": new_password })),
            )
            .await
    }

    /// Request a password reset email
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn request_password_reset(&self, email: &str) -> Result<DetailResponse> {
        self.client
            .request(
                Method::POST,
                "/accounts/password-reset/",
                Some(&json!({ "email": email })),
                RequestOptions { skip_auth: true },
            )
            .await
    }

    /// Confirm a password reset with the emailed token
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn confirm_password_reset(
        &self,
        uidb64: &str,
        token: &str,
        new_password: &str,
    ) -> Result<DetailResponse> {
        self.client
            .request(
                Method::POST,
                "/accounts/password-reset-confirm/",
                Some(&json!({
                    "uidb64": uidb64,
                    "token": token,
                    "new_password": new_password,
                })),
                RequestOptions { skip_auth: true },
            )
            .await
    }
}
