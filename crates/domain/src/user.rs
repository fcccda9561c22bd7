//! User profile types
//!
//! Profile payload returned by the accounts backend at login and kept in the
//! persisted session record until the next login.

use serde::{Deserialize, Serialize};

/// User profile as serialized by the accounts backend
///
/// The organizational unit triple (direction, management, coordination) is
/// flattened into id/name pairs, each independently nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub direction_id: Option<i64>,
    pub direction_name: Option<String>,
    pub management_id: Option<i64>,
    pub management_name: Option<String>,
    pub coordination_id: Option<i64>,
    pub coordination_name: Option<String>,
}

/// Partial profile update payload
///
/// Only fields that are set are serialized; `id` and `email` are read-only
/// on the backend and never sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordination_id: Option<i64>,
}
