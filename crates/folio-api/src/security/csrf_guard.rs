use axum::http::{header, HeaderMap, Method, Uri};
use axum_extra::extract::cookie::CookieJar;
use folio_security::csrf::{check_csrf_token_at, now_ms, CsrfError};
use folio_shared::constants::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME};
use thiserror::Error;
use tracing::debug;

/// Why a mutating request was refused. Display strings go back to the client.
#[derive(Error, Debug)]
pub enum CsrfRejection {
    #[error("Origin header missing")]
    MissingOrigin,

    #[error("Origin header invalid")]
    InvalidOrigin,

    #[error("Host header missing")]
    MissingHost,

    #[error("Origin does not match host")]
    OriginMismatch,

    #[error("CSRF token header missing")]
    MissingHeaderToken,

    #[error("CSRF cookie missing")]
    MissingCookie,

    #[error(transparent)]
    Token(#[from] CsrfError),
}

pub fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// Validates the CSRF protection of an incoming API request.
pub fn validate_csrf_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<(), CsrfRejection> {
    validate_csrf_request_at(method, uri, headers, now_ms())
}

/// Same as [`validate_csrf_request`] with an explicit clock (Unix ms).
///
/// Safe methods pass untouched. Everything else needs a same-origin `Origin`
/// header, the `x-csrf-token` header and the `__csrf_token` cookie, and the
/// two tokens have to match before the cookie expires.
pub fn validate_csrf_request_at(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    now_ms: i64,
) -> Result<(), CsrfRejection> {
    if is_safe_method(method) {
        return Ok(());
    }

    let origin = header_str(headers, header::ORIGIN.as_str()).ok_or(CsrfRejection::MissingOrigin)?;
    let origin_authority = origin
        .parse::<Uri>()
        .ok()
        .filter(|origin| origin.scheme().is_some())
        .and_then(|origin| origin.authority().cloned())
        .ok_or(CsrfRejection::InvalidOrigin)?;

    // HTTP/2 requests carry the host in the URI authority instead of a header
    let host = header_str(headers, header::HOST.as_str())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .ok_or(CsrfRejection::MissingHost)?;

    if !origin_authority.as_str().eq_ignore_ascii_case(host) {
        debug!(origin = %origin_authority, host, "Cross-origin mutating request");
        return Err(CsrfRejection::OriginMismatch);
    }

    let submitted = header_str(headers, CSRF_HEADER_NAME).ok_or(CsrfRejection::MissingHeaderToken)?;

    let jar = CookieJar::from_headers(headers);
    let stored = jar
        .get(CSRF_COOKIE_NAME)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(CsrfRejection::MissingCookie)?;

    check_csrf_token_at(submitted, stored, now_ms)?;
    Ok(())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use folio_security::csrf::{create_csrf_cookie, csrf_token_with, generate_csrf_token_at};

    const NOW: i64 = 1_760_000_000_000;

    fn uri() -> Uri {
        Uri::from_static("/api/contact")
    }

    fn valid_headers(token: &str, cookie_value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("studio.example"));
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_static("https://studio.example"),
        );
        headers.insert(CSRF_HEADER_NAME, HeaderValue::from_str(token).unwrap());
        let cookie = format!("theme=dark; {}={}", CSRF_COOKIE_NAME, cookie_value);
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
        headers
    }

    fn issued() -> (String, String) {
        let data = generate_csrf_token_at(NOW);
        let cookie = create_csrf_cookie(&data).unwrap();
        (data.token, cookie)
    }

    #[test]
    fn test_safe_methods_always_pass() {
        let empty = HeaderMap::new();
        for method in [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE] {
            assert!(validate_csrf_request_at(&method, &uri(), &empty, NOW).is_ok());
        }
    }

    #[test]
    fn test_valid_post_passes() {
        let (token, cookie) = issued();
        let headers = valid_headers(&token, &cookie);
        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(validate_csrf_request_at(&method, &uri(), &headers, NOW).is_ok());
        }
    }

    #[test]
    fn test_missing_origin() {
        let (token, cookie) = issued();
        let mut headers = valid_headers(&token, &cookie);
        headers.remove(header::ORIGIN);
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW),
            Err(CsrfRejection::MissingOrigin)
        ));
    }

    #[test]
    fn test_invalid_origin() {
        let (token, cookie) = issued();
        for origin in ["null", "studio.example", "::::"] {
            let mut headers = valid_headers(&token, &cookie);
            headers.insert(header::ORIGIN, HeaderValue::from_static(origin));
            assert!(matches!(
                validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW),
                Err(CsrfRejection::InvalidOrigin)
            ));
        }
    }

    #[test]
    fn test_cross_origin_fails_even_with_valid_token() {
        let (token, cookie) = issued();
        let mut headers = valid_headers(&token, &cookie);
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_static("https://evil.example"),
        );
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW),
            Err(CsrfRejection::OriginMismatch)
        ));

        let mut other_port = valid_headers(&token, &cookie);
        other_port.insert(
            header::ORIGIN,
            HeaderValue::from_static("https://studio.example:8443"),
        );
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &other_port, NOW),
            Err(CsrfRejection::OriginMismatch)
        ));
    }

    #[test]
    fn test_host_comparison_ignores_case() {
        let (token, cookie) = issued();
        let mut headers = valid_headers(&token, &cookie);
        headers.insert(header::HOST, HeaderValue::from_static("Studio.Example"));
        assert!(validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW).is_ok());
    }

    #[test]
    fn test_host_falls_back_to_uri_authority() {
        let (token, cookie) = issued();
        let mut headers = valid_headers(&token, &cookie);
        headers.remove(header::HOST);

        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW),
            Err(CsrfRejection::MissingHost)
        ));

        let absolute = Uri::from_static("https://studio.example/api/contact");
        assert!(validate_csrf_request_at(&Method::POST, &absolute, &headers, NOW).is_ok());
    }

    #[test]
    fn test_missing_token_header_or_cookie() {
        let (token, cookie) = issued();

        let mut no_header = valid_headers(&token, &cookie);
        no_header.remove(CSRF_HEADER_NAME);
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &no_header, NOW),
            Err(CsrfRejection::MissingHeaderToken)
        ));

        let mut no_cookie = valid_headers(&token, &cookie);
        no_cookie.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &no_cookie, NOW),
            Err(CsrfRejection::MissingCookie)
        ));
    }

    #[test]
    fn test_token_failures_are_reported() {
        let (token, cookie) = issued();

        let wrong = valid_headers(&"0".repeat(64), &cookie);
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &wrong, NOW),
            Err(CsrfRejection::Token(CsrfError::Mismatch))
        ));

        let headers = valid_headers(&token, &cookie);
        let later = NOW + 61 * 60 * 1000;
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &headers, later),
            Err(CsrfRejection::Token(CsrfError::Expired))
        ));

        let garbled = valid_headers(&token, "not-json");
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &garbled, NOW),
            Err(CsrfRejection::Token(CsrfError::MalformedCookie(_)))
        ));
    }

    #[test]
    fn test_percent_encoded_cookie_is_decoded() {
        let data = csrf_token_with("ab".repeat(32), NOW);
        let cookie = create_csrf_cookie(&data).unwrap();
        let encoded = cookie
            .replace('{', "%7B")
            .replace('}', "%7D")
            .replace('"', "%22")
            .replace(':', "%3A")
            .replace(',', "%2C");
        let headers = valid_headers(&data.token, &encoded);
        assert!(validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW).is_ok());
    }

    #[test]
    fn test_non_ascii_header_is_treated_as_missing() {
        let (_, cookie) = issued();
        let mut headers = valid_headers("placeholder", &cookie);
        headers.insert(
            CSRF_HEADER_NAME,
            HeaderValue::from_bytes(b"\xfftoken").unwrap(),
        );
        assert!(matches!(
            validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW),
            Err(CsrfRejection::MissingHeaderToken)
        ));
    }

    #[test]
    fn test_rejection_messages_do_not_echo_tokens() {
        let (token, cookie) = issued();
        let headers = valid_headers(&"1".repeat(64), &cookie);
        let rejection = validate_csrf_request_at(&Method::POST, &uri(), &headers, NOW).unwrap_err();
        let message = rejection.to_string();
        assert!(!message.contains(&token));
        assert!(!message.contains(&"1".repeat(64)));
    }
}
