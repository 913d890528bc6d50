use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("CSRF validation failed: {0}")]
    CsrfRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::CsrfRejected(reason) => {
                tracing::warn!("CSRF rejected: {}", reason);
                (
                    StatusCode::FORBIDDEN,
                    "CSRF validation failed",
                    Some(reason),
                )
            }
            ApiError::NotFound(what) => {
                tracing::debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, "Not found", Some(what))
            }
            ApiError::ValidationError(details) => {
                tracing::debug!("Validation failed: {}", details);
                (StatusCode::BAD_REQUEST, "Validation failed", Some(details))
            }
            ApiError::InternalError(msg) => {
                // logged only, never sent to the client
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::failure(error, details));
        (status, body).into_response()
    }
}

impl From<folio_shared::AppError> for ApiError {
    fn from(err: folio_shared::AppError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_csrf_rejection_is_forbidden() {
        let error = ApiError::CsrfRejected("CSRF token mismatch".into());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "CSRF validation failed");
        assert_eq!(body["details"], "CSRF token mismatch");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::InternalError("disk full at /var/data".into());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("details").is_none());
    }
}
