//! # Folio API
//!
//! HTTP handlers, CSRF guard, site content, and contact intake.

pub mod contact;
pub mod content;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod security;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
