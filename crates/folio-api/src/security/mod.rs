pub mod csrf_guard;
pub mod middleware;

pub use csrf_guard::{validate_csrf_request, validate_csrf_request_at, CsrfRejection};
pub use middleware::csrf_middleware;
