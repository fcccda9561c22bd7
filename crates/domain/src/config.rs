//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, EXPIRY_CHECK_INTERVAL_SECONDS,
    REFRESH_THRESHOLD_SECONDS,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainelConfig {
    pub http: HttpConfig,
    pub session: SessionConfig,
}

/// Request gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Silent renewal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub refresh_threshold_seconds: i64,
    pub expiry_check_interval_seconds: u64,
}

impl Default for PainelConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            },
            session: SessionConfig {
                refresh_threshold_seconds: REFRESH_THRESHOLD_SECONDS,
                expiry_check_interval_seconds: EXPIRY_CHECK_INTERVAL_SECONDS,
            },
        }
    }
}
