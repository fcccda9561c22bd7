//! Configuration loading for the gateway and the session service
//!
//! Sources, in order of precedence:
//! 1. Environment variables: `PAINEL_BASE_URL` (required for this source),
//!    plus the optional `PAINEL_HTTP_TIMEOUT`, `PAINEL_REFRESH_THRESHOLD`,
//!    and `PAINEL_EXPIRY_CHECK_INTERVAL`
//! 2. A `painel.{json,toml}` or `config.{json,toml}` file, probed in the
//!    working directory, its parent, and the executable's directory
//! 3. The built-in defaults
//!
//! A missing source falls through to the next one; a source that exists but
//! does not parse is an error.

use std::path::{Path, PathBuf};

use painel_domain::constants::{
    DEFAULT_HTTP_TIMEOUT_SECONDS, EXPIRY_CHECK_INTERVAL_SECONDS, REFRESH_THRESHOLD_SECONDS,
};
use painel_domain::{HttpConfig, PainelConfig, Result, SessionConfig, SessionError};
use tracing::{debug, info};

/// Load configuration, falling through the sources in precedence order
///
/// Every field has a default, so an environment without `PAINEL_*` variables
/// and without a config file yields the default configuration rather than an
/// error.
///
/// # Errors
/// Returns `SessionError::Config` when a source is present but invalid, for
/// example a malformed file or a non-numeric timeout variable.
pub fn load() -> Result<PainelConfig> {
    match load_from_env() {
        Ok(config) => {
            info!("Configuration loaded from environment");
            Ok(config)
        }
        Err(e) => {
            debug!("Environment configuration incomplete ({e}), probing for files");
            match load_from_file(None) {
                Ok(config) => Ok(config),
                Err(SessionError::Config(reason)) if reason.contains("no config file") => {
                    info!("No configuration source found, using defaults");
                    Ok(PainelConfig::default())
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Read configuration from the environment
///
/// `PAINEL_BASE_URL` must be present; the numeric variables fall back to
/// their defaults when unset.
///
/// # Errors
/// Returns `SessionError::Config` when the base URL is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<PainelConfig> {
    let base_url = env_var("PAINEL_BASE_URL")?;
    let timeout_seconds = env_u64("PAINEL_HTTP_TIMEOUT", DEFAULT_HTTP_TIMEOUT_SECONDS)?;
    let refresh_threshold_seconds =
        env_i64("PAINEL_REFRESH_THRESHOLD", REFRESH_THRESHOLD_SECONDS)?;
    let expiry_check_interval_seconds =
        env_u64("PAINEL_EXPIRY_CHECK_INTERVAL", EXPIRY_CHECK_INTERVAL_SECONDS)?;

    Ok(PainelConfig {
        http: HttpConfig { base_url, timeout_seconds },
        session: SessionConfig { refresh_threshold_seconds, expiry_check_interval_seconds },
    })
}

/// Read configuration from a JSON or TOML file
///
/// With an explicit `path` the file must exist; with `None` the standard
/// locations are probed via [`probe_config_paths`]. The format is picked
/// from the file extension.
///
/// # Errors
/// Returns `SessionError::Config` when the file is missing, unreadable, or
/// does not deserialize into the full configuration structure.
pub fn load_from_file(path: Option<PathBuf>) -> Result<PainelConfig> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(SessionError::Config(format!(
                    "config file {} does not exist",
                    explicit.display()
                )));
            }
            explicit
        }
        None => probe_config_paths().ok_or_else(|| {
            SessionError::Config("no config file found in the probed locations".to_string())
        })?,
    };

    info!(path = %config_path.display(), "Loading configuration file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        SessionError::Config(format!("cannot read {}: {e}", config_path.display()))
    })?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<PainelConfig> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("json") {
        "toml" => toml::from_str(contents).map_err(|e| {
            SessionError::Config(format!("invalid TOML in {}: {e}", path.display()))
        }),
        "json" => serde_json::from_str(contents).map_err(|e| {
            SessionError::Config(format!("invalid JSON in {}: {e}", path.display()))
        }),
        other => Err(SessionError::Config(format!("unsupported config format: {other}"))),
    }
}

/// First existing config file among the standard locations
///
/// Probes `painel.{json,toml}` and `config.{json,toml}` in the working
/// directory, its parent, and next to the executable, in that order.
#[must_use]
pub fn probe_config_paths() -> Option<PathBuf> {
    const FILE_NAMES: [&str; 4] = ["painel.json", "painel.toml", "config.json", "config.toml"];

    let mut directories: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        directories.push(cwd.clone());
        directories.push(cwd.join(".."));
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            directories.push(dir.to_path_buf());
        }
    }

    directories
        .iter()
        .flat_map(|dir| FILE_NAMES.iter().map(|name| dir.join(name)))
        .find(|candidate| candidate.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SessionError::Config(format!("environment variable {key} is not set")))
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| SessionError::Config(format!("environment variable {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

fn env_i64(key: &str, default: i64) -> Result<i64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<i64>()
            .map_err(|e| SessionError::Config(format!("environment variable {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
