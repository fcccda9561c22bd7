//! Integration tests for domain type serialization
//!
//! Covers the wire shapes shared by the session store, the gateway and the
//! accounts backend: tagged errors, profile payloads and configuration.

use painel_domain::{PainelConfig, ProfileUpdate, SessionError, UserProfile};
use serde_json::json;

// ============================================================================
// SessionError Tests
// ============================================================================

/// Test the tagged error representation
///
/// Scenario: errors cross a serialization boundary (logs, IPC) and must keep
/// a stable `type`/`message` envelope.
#[test]
fn test_session_error_wire_shape() {
    let login = SessionError::InvalidCredentials("Email ou senha inválidos".to_string());
    assert_eq!(
        serde_json::to_value(&login).unwrap(),
        json!({"type": "InvalidCredentials", "message": "Email ou senha inválidos"})
    );

    let expired = SessionError::SessionExpired;
    assert_eq!(
        serde_json::to_value(&expired).unwrap(),
        json!({"type": "SessionExpired"})
    );

    let http = SessionError::Http {
        status: 403,
        message: "Sem permissão".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&http).unwrap(),
        json!({"type": "Http", "message": {"status": 403, "message": "Sem permissão"}})
    );
}

#[test]
fn test_session_error_round_trip() {
    let serialized = json!({"type": "Http", "message": {"status": 500, "message": "boom"}});
    let parsed: SessionError = serde_json::from_value(serialized).unwrap();

    assert!(matches!(
        parsed,
        SessionError::Http { status: 500, ref message } if message == "boom"
    ));
}

/// Test that user-facing errors display the backend's own text
#[test]
fn test_error_messages_surface_backend_text() {
    assert_eq!(SessionError::SessionExpired.to_string(), "Sessão expirada");
    assert_eq!(
        SessionError::InvalidCredentials("Email ou senha inválidos".to_string()).to_string(),
        "Email ou senha inválidos"
    );
    assert_eq!(
        SessionError::Http {
            status: 404,
            message: "HTTP error! status: 404".to_string(),
        }
        .to_string(),
        "HTTP error! status: 404"
    );
}

// ============================================================================
// UserProfile Tests
// ============================================================================

/// Test deserializing the full profile payload the backend returns
///
/// Scenario: login response and `GET /accounts/me/` both embed this shape;
/// the organizational unit triple arrives as independently nullable pairs.
#[test]
fn test_user_profile_deserializes_backend_payload() {
    let payload = json!({
        "id": 7,
        "email": "maria@example.com",
        "name": "Maria Souza",
        "cpf": "12345678900",
        "phone": null,
        "avatar": null,
        "direction_id": 2,
        "direction_name": "Diretoria de Tecnologia",
        "management_id": null,
        "management_name": null,
        "coordination_id": null,
        "coordination_name": null
    });

    let profile: UserProfile = serde_json::from_value(payload).unwrap();

    assert_eq!(profile.id, 7);
    assert_eq!(profile.email, "maria@example.com");
    assert_eq!(profile.name, "Maria Souza");
    assert_eq!(profile.cpf.as_deref(), Some("12345678900"));
    assert_eq!(profile.phone, None);
    assert_eq!(profile.direction_id, Some(2));
    assert_eq!(
        profile.direction_name.as_deref(),
        Some("Diretoria de Tecnologia")
    );
    assert_eq!(profile.management_id, None);
    assert_eq!(profile.coordination_name, None);
}

#[test]
fn test_profile_update_serializes_only_set_fields() {
    let update = ProfileUpdate {
        name: Some("Maria S. Souza".to_string()),
        phone: Some("11999990000".to_string()),
        ..ProfileUpdate::default()
    };

    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        json!({"name": "Maria S. Souza", "phone": "11999990000"})
    );

    let empty = ProfileUpdate::default();
    assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
}

// ============================================================================
// PainelConfig Tests
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = PainelConfig::default();

    assert_eq!(config.http.base_url, "http://localhost:8000");
    assert_eq!(config.http.timeout_seconds, 30);
    assert_eq!(config.session.refresh_threshold_seconds, 300);
    assert_eq!(config.session.expiry_check_interval_seconds, 30);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = PainelConfig::default();
    let serialized = serde_json::to_string(&config).unwrap();
    let parsed: PainelConfig = serde_json::from_str(&serialized).unwrap();

    assert_eq!(parsed.http.base_url, config.http.base_url);
    assert_eq!(
        parsed.session.refresh_threshold_seconds,
        config.session.refresh_threshold_seconds
    );
}
