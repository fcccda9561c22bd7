//! Unverified access token decoding
//!
//! Reads the `exp` claim out of a JWT payload without verifying the
//! signature. The decoded expiry only schedules client-side renewal ahead of
//! time; the backend re-validates the token on every request, so nothing here
//! is an authorization decision.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use painel_domain::{Result, SessionError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Decode the expiry timestamp from an access token
///
/// # Errors
/// Returns `SessionError::MalformedSession` if the token has no payload
/// segment, the payload is not base64url, or it carries no numeric `exp`.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>> {
    let payload = token.split('.').nth(1).ok_or_else(|| {
        SessionError::MalformedSession("access token has no payload segment".to_string())
    })?;

    // Tolerate encoders that pad; JWTs themselves are unpadded base64url
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::MalformedSession(format!("payload is not base64url: {e}")))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::MalformedSession(format!("payload has no exp claim: {e}")))?;

    Utc.timestamp_opt(claims.exp, 0).single().ok_or_else(|| {
        SessionError::MalformedSession(format!("exp claim {} is out of range", claims.exp))
    })
}

/// Check whether the access token is already past its expiry
///
/// # Errors
/// Returns `SessionError::MalformedSession` if the token cannot be decoded.
pub fn is_expired(token: &str) -> Result<bool> {
    Ok(decode_expiry(token)? < Utc::now())
}

/// Seconds left until the access token expires (negative once past expiry)
///
/// # Errors
/// Returns `SessionError::MalformedSession` if the token cannot be decoded.
pub fn seconds_until_expiry(token: &str) -> Result<i64> {
    Ok((decode_expiry(token)? - Utc::now()).num_seconds())
}

/// Build an unsigned token carrying only an `exp` claim
#[cfg(test)]
pub(crate) fn token_with_exp(exp: i64) -> String {
    let payload = URL_SAFE_NO_PAD.encode(format!("{{\"exp\":{exp}}}"));
    format!("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.{payload}.sig")
}
