//! Application-wide constants

/// Cookie holding the JSON-serialized CSRF token data.
pub const CSRF_COOKIE_NAME: &str = "__csrf_token";
/// Request header carrying the raw hex CSRF token.
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";
/// Number of random bytes behind each CSRF token.
pub const CSRF_TOKEN_BYTES: usize = 32;
/// CSRF token lifetime in minutes.
pub const CSRF_TOKEN_TTL_MINUTES: i64 = 60;
pub const CSRF_TOKEN_TTL_MS: i64 = CSRF_TOKEN_TTL_MINUTES * 60 * 1000;

pub const DEFAULT_PAGE_SIZE: usize = 9;
pub const MAX_PAGE_SIZE: usize = 50;
pub const DEFAULT_SIBLING_COUNT: usize = 1;
