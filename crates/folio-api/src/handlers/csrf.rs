use axum::{extract::State, http::header, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use folio_security::csrf::{create_csrf_cookie, generate_csrf_token};
use folio_shared::constants::{CSRF_COOKIE_NAME, CSRF_TOKEN_TTL_MINUTES};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResponse {
    pub success: bool,
    pub csrf_token: String,
    pub expires_at: i64,
}

/// GET /api/csrf-token
///
/// Issues a fresh token: the JSON token data goes into the `__csrf_token`
/// cookie and the raw token into the body for the page to echo back.
pub async fn issue_csrf_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let data = generate_csrf_token();
    let value = create_csrf_cookie(&data).map_err(|e| ApiError::InternalError(e.to_string()))?;

    let cookie = Cookie::build((CSRF_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.config.csrf.cookie_secure)
        .max_age(time::Duration::minutes(CSRF_TOKEN_TTL_MINUTES));

    debug!(expires_at = data.expires_at, "Issued CSRF token");

    Ok((
        jar.add(cookie),
        [(header::CACHE_CONTROL, "no-store")],
        Json(CsrfTokenResponse {
            success: true,
            csrf_token: data.token,
            expires_at: data.expires_at,
        }),
    ))
}
