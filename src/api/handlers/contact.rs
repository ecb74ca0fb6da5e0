//! Handler for the contact form.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::contact::{ContactRequest, ContactResponse};
use crate::domain::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a contact message.
///
/// # Endpoint
///
/// `POST /api/shorty-url/contact`
///
/// # Errors
///
/// - **400**: validation failure
/// - **429**: too many messages from this IP within the window
pub async fn contact_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    payload.validate()?;

    state.contact_service.submit(payload.into(), &ctx).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Message sent successfully. We will get back to you soon.".to_string(),
        }),
    ))
}
