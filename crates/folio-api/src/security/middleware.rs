use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use super::csrf_guard::validate_csrf_request;
use crate::error::ApiError;

/// CSRF middleware - rejects mutating requests without a valid token
///
/// Safe methods and valid requests reach the handler unchanged; everything
/// else gets a 403 before the handler runs.
pub async fn csrf_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    if let Err(rejection) =
        validate_csrf_request(request.method(), request.uri(), request.headers())
    {
        warn!(
            method = %request.method(),
            path = request.uri().path(),
            reason = %rejection,
            "Request failed CSRF validation"
        );
        return Err(ApiError::CsrfRejected(rejection.to_string()));
    }

    Ok(next.run(request).await)
}
