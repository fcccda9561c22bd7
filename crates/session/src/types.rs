//! Session and accounts wire types
//!
//! Defines the payloads exchanged with the accounts backend and the in-memory
//! session adopted after login or initialization.

use painel_domain::UserProfile;
use serde::Deserialize;

/// Generic fallback shown when the backend rejects a login without a message
pub(crate) const GENERIC_LOGIN_ERROR: &str = "Email ou senha inválidos";

/// In-memory session held by the session service
///
/// The access token here mirrors the durable store; the durable store stays
/// authoritative for anything that outlives the process.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub access_token: String,
    pub user: UserProfile,
}

/// Successful response from the token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

/// Successful response from the token refresh endpoint
///
/// `refresh` is only present when the backend rotates refresh tokens; the
/// stored refresh token must be kept as-is otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    pub refresh: Option<String>,
}

/// Error body shape returned by the accounts backend
///
/// Rejections carry either a `detail` string or a `non_field_errors` list,
/// never both.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
    pub non_field_errors: Option<Vec<String>>,
}

impl ApiErrorBody {
    /// Best available login rejection message
    ///
    /// Prefers `detail`, then the first `non_field_errors` entry, then the
    /// generic fallback.
    #[must_use]
    pub fn login_message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.non_field_errors.as_ref().and_then(|errors| errors.first().cloned()))
            .unwrap_or_else(|| GENERIC_LOGIN_ERROR.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for session types.
    use super::*;

    /// Validates `LoginResponse` deserialization for the full backend payload
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `response.access` equals `"T1"`.
    /// - Confirms `response.refresh` equals `"R1"`.
    /// - Confirms `response.user.id` equals `1`.
    /// - Confirms `response.user.direction_name` equals
    ///   `Some("Diretoria de TI".to_string())`.
    /// - Ensures `response.user.coordination_id.is_none()` evaluates to true.
    #[test]
    fn test_login_response_deserialization() {
        let body = r#"{
            "access": "T1",
            "refresh": "R1",
            "user": {
                "id": 1,
                "email": "a@b.com",
                "name": "Ana Souza",
                "cpf": "12345678900",
                "phone": null,
                "avatar": null,
                "direction_id": 2,
                "direction_name": "Diretoria de TI",
                "management_id": null,
                "management_name": null,
                "coordination_id": null,
                "coordination_name": null
            }
        }"#;

        let response: LoginResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.access, "T1");
        assert_eq!(response.refresh, "R1");
        assert_eq!(response.user.id, 1);
        assert_eq!(response.user.email, "a@b.com");
        assert_eq!(response.user.direction_name, Some("Diretoria de TI".to_string()));
        assert!(response.user.coordination_id.is_none());
    }

    /// Validates `RefreshResponse` deserialization for the rotation scenario.
    ///
    /// Assertions:
    /// - Confirms the rotated payload carries `Some("R2".to_string())`.
    /// - Ensures `without_rotation.refresh.is_none()` evaluates to true.
    #[test]
    fn test_refresh_response_rotation_is_optional() {
        let with_rotation: RefreshResponse =
            serde_json::from_str(r#"{"access": "T2", "refresh": "R2"}"#).unwrap();
        assert_eq!(with_rotation.access, "T2");
        assert_eq!(with_rotation.refresh, Some("R2".to_string()));

        let without_rotation: RefreshResponse =
            serde_json::from_str(r#"{"access": "T2"}"#).unwrap();
        assert_eq!(without_rotation.access, "T2");
        assert!(without_rotation.refresh.is_none());
    }

    /// Validates `ApiErrorBody::login_message` behavior for the message
    /// precedence scenario.
    ///
    /// Assertions:
    /// - Confirms `detail` wins over `non_field_errors`.
    /// - Confirms the first `non_field_errors` entry is used when `detail` is
    ///   absent.
    /// - Confirms the generic fallback is used when both are absent.
    #[test]
    fn test_login_message_precedence() {
        let with_detail = ApiErrorBody {
            detail: Some("Conta bloqueada".to_string()),
            non_field_errors: Some(vec!["ignored".to_string()]),
        };
        assert_eq!(with_detail.login_message(), "Conta bloqueada");

        let with_field_errors = ApiErrorBody {
            detail: None,
            non_field_errors: Some(vec![
                "Credenciais inválidas".to_string(),
                "ignored".to_string(),
            ]),
        };
        assert_eq!(with_field_errors.login_message(), "Credenciais inválidas");

        let empty = ApiErrorBody::default();
        assert_eq!(empty.login_message(), "Email ou senha inválidos");
    }

    /// Validates `ApiErrorBody` deserialization for the unknown fields
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures a `token_not_valid` style body still yields its `detail`.
    #[test]
    fn test_error_body_tolerates_extra_fields() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail": "Token is invalid or expired", "code": "token_not_valid"}"#,
        )
        .unwrap();
        assert_eq!(body.login_message(), "Token is invalid or expired");
    }
}
