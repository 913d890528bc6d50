use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::contact::{self, ContactForm};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: Uuid,
}

/// POST /api/contact (CSRF protected)
///
/// Body errors (bad JSON, missing fields, wrong content type) come back as
/// 400 in the usual envelope rather than axum's plain-text rejection.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ApiResponse<ContactReceipt>>, ApiError> {
    let Json(form) = payload.map_err(|e| ApiError::ValidationError(e.body_text()))?;
    let submission = contact::accept(form, state.contact_sink.as_ref()).await?;
    Ok(Json(ApiResponse::success(ContactReceipt { id: submission.id })))
}
