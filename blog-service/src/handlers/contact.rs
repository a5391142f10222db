use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{ContactMessage, ContactPayload};
use crate::AppState;

/// Store a contact-form message
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContactMessage>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let contact = state
        .db
        .insert_contact(&payload.name, &payload.email, &payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}
