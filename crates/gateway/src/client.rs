//! Authenticated HTTP gateway
//!
//! Every dashboard API call goes through [`ApiClient`]: it resolves
//! endpoints against the configured base URL, attaches the stored bearer
//! token, and retries once with renewed credentials when the backend
//! answers 401. A failed renewal forces a logout and surfaces
//! [`SessionError::SessionExpired`].

use std::sync::Arc;
use std::time::Duration;

use painel_domain::constants::API_BASE_PATH;
use painel_domain::{HttpConfig, Result, SessionError};
use painel_session::CredentialProvider;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-request overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Skip bearer attachment and request-time renewal
    ///
    /// Used for endpoints that are reachable without a session, for example
    /// the password reset flow.
    pub skip_auth: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// HTTP client for the dashboard API
///
/// Resolves relative endpoints under the versioned API path and passes
/// absolute URLs through untouched. Credentials come from the injected
/// [`CredentialProvider`], so the gateway and the session service always
/// agree on the current token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Build a gateway client over the injected credential provider
    ///
    /// The client carries the configured timeout and never picks up proxy
    /// settings from the environment.
    ///
    /// # Errors
    /// Returns `SessionError::Config` when the HTTP client cannot be built
    /// from the given configuration.
    pub fn new(config: &HttpConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .no_proxy()
            .build()
            .map_err(|e| SessionError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string(), credentials })
    }

    fn resolve_url(&self, endpoint: &str) -> String {
        // Absolute URLs pass through for calls outside the dashboard API.
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}{API_BASE_PATH}{endpoint}", self.base_url)
        }
    }

    fn build_request<B>(
        &self,
        method: &Method,
        url: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> reqwest::RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        // The JSON content type is only set when there is a body to carry.
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    /// Issue a request with full control over method, body, and options
    ///
    /// A 401 on an authenticated request triggers one credential renewal and
    /// one retry; the retried response is handled like any other. When the
    /// renewal fails, the session is forcibly terminated.
    ///
    /// # Errors
    /// Returns `SessionError::SessionExpired` when credentials could not be
    /// renewed, `SessionError::Http` for other non-success statuses,
    /// `SessionError::Network` when the backend is unreachable or the
    /// response body does not decode.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(endpoint);

        let bearer =
            if options.skip_auth { None } else { self.credentials.stored_access_token().await };

        let mut response = self
            .build_request(&method, &url, bearer.as_deref(), body)
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED && !options.skip_auth {
            if self.credentials.renew_credentials().await {
                debug!(%url, "Retrying request with renewed credentials");
                let bearer = self.credentials.stored_access_token().await;
                response = self
                    .build_request(&method, &url, bearer.as_deref(), body)
                    .send()
                    .await
                    .map_err(|e| SessionError::Network(e.to_string()))?;
            } else {
                debug!(%url, "Credential renewal failed, forcing logout");
                self.credentials.force_logout().await;
                return Err(SessionError::SessionExpired);
            }
        }

        Self::deserialize_response(response).await
    }

    async fn deserialize_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(ErrorBody { detail: Some(detail) }) => detail,
                Ok(ErrorBody { detail: None }) => {
                    format!("HTTP error! status: {}", status.as_u16())
                }
                Err(_) => "Erro na requisição".to_string(),
            };
            return Err(SessionError::Http { status: status.as_u16(), message });
        }

        if status == StatusCode::NO_CONTENT {
            // No body to read; decode the target type from JSON null.
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| SessionError::Network(format!("invalid response body: {e}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SessionError::Network(format!("invalid response body: {e}")))
    }

    /// GET an endpoint
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, None::<&serde_json::Value>, RequestOptions::default())
            .await
    }

    /// POST a JSON body to an endpoint
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, body, RequestOptions::default()).await
    }

    /// PUT a JSON body to an endpoint
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn put<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, body, RequestOptions::default()).await
    }

    /// PATCH a JSON body to an endpoint
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn patch<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, body, RequestOptions::default()).await
    }

    /// DELETE an endpoint
    ///
    /// # Errors
    /// See [`ApiClient::request`]
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(
            Method::DELETE,
            endpoint,
            None::<&serde_json::Value>,
            RequestOptions::default(),
        )
        .await
    }
}
