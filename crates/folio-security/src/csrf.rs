//! CSRF token issuing and verification
//!
//! A token is 32 random bytes, hex-encoded, valid for 60 minutes. The server
//! keeps [`CsrfTokenData`] as JSON in a cookie and the page echoes the raw
//! token back in a request header; [`check_csrf_token_at`] compares the two.

use chrono::Utc;
use folio_shared::constants::{CSRF_TOKEN_BYTES, CSRF_TOKEN_TTL_MS};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

/// Token plus its absolute expiry, as stored in the CSRF cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CsrfTokenData {
    pub token: String,
    /// Unix timestamp in milliseconds.
    pub expires_at: i64,
}

impl CsrfTokenData {
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }
}

/// Reasons a token check fails. Messages never include token values.
#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("CSRF token missing")]
    MissingToken,

    #[error("CSRF cookie is malformed")]
    MalformedCookie(#[source] serde_json::Error),

    #[error("CSRF cookie holds an invalid token")]
    InvalidStoredToken,

    #[error("CSRF token expired")]
    Expired,

    #[error("CSRF token mismatch")]
    Mismatch,

    #[error("CSRF cookie could not be serialized")]
    Serialize(#[source] serde_json::Error),
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generates a fresh token from the thread-local CSPRNG.
pub fn generate_csrf_token() -> CsrfTokenData {
    generate_csrf_token_at(now_ms())
}

pub fn generate_csrf_token_at(now_ms: i64) -> CsrfTokenData {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    csrf_token_with(hex::encode(bytes), now_ms)
}

/// Wraps an existing token with the standard lifetime.
pub fn csrf_token_with(token: impl Into<String>, now_ms: i64) -> CsrfTokenData {
    CsrfTokenData {
        token: token.into(),
        expires_at: now_ms.saturating_add(CSRF_TOKEN_TTL_MS),
    }
}

/// Serializes token data into the cookie value.
pub fn create_csrf_cookie(data: &CsrfTokenData) -> Result<String, CsrfError> {
    serde_json::to_string(data).map_err(CsrfError::Serialize)
}

/// Parses a cookie value and checks its shape before anything uses it.
pub fn parse_csrf_cookie(stored: &str) -> Result<CsrfTokenData, CsrfError> {
    let data: CsrfTokenData = serde_json::from_str(stored).map_err(CsrfError::MalformedCookie)?;
    if data.token.is_empty() || !data.token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CsrfError::InvalidStoredToken);
    }
    Ok(data)
}

/// Checks a submitted token against the stored cookie value.
pub fn check_csrf_token_at(submitted: &str, stored: &str, now_ms: i64) -> Result<(), CsrfError> {
    if submitted.is_empty() || stored.is_empty() {
        return Err(CsrfError::MissingToken);
    }

    let data = parse_csrf_cookie(stored)?;
    if data.is_expired_at(now_ms) {
        debug!(expires_at = data.expires_at, "CSRF token expired");
        return Err(CsrfError::Expired);
    }

    if constant_time_eq(submitted.as_bytes(), data.token.as_bytes()) {
        Ok(())
    } else {
        Err(CsrfError::Mismatch)
    }
}

pub fn verify_csrf_token(submitted: &str, stored: &str) -> bool {
    verify_csrf_token_at(submitted, stored, now_ms())
}

pub fn verify_csrf_token_at(submitted: &str, stored: &str, now_ms: i64) -> bool {
    check_csrf_token_at(submitted, stored, now_ms).is_ok()
}

// Token lengths are fixed and public, so a length mismatch may return early.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
