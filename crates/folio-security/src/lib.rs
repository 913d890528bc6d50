//! # Folio Security
//!
//! CSRF token issuing and verification.

pub mod csrf;

pub use csrf::{
    check_csrf_token_at, create_csrf_cookie, csrf_token_with, generate_csrf_token,
    parse_csrf_cookie, verify_csrf_token, verify_csrf_token_at, CsrfError, CsrfTokenData,
};
