//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::RedirectOutcome;
use crate::domain::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **307 Temporary Redirect** to the long URL; the click counter and the
///   visit log are updated
/// - **400 Bad Request**: parameter is not a well-formed short code
/// - **404 Not Found**: unknown code
/// - **410 Gone**: link is expired or blacklisted
///
/// Non-redirect outcomes are answered with a short plain-text body. Store
/// failures produce the usual JSON error.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let outcome = state.redirect_service.resolve(&code, &ctx).await?;

    Ok(outcome_response(outcome))
}

fn outcome_response(outcome: RedirectOutcome) -> Response {
    match outcome {
        RedirectOutcome::Resolved { long_url } => Redirect::temporary(&long_url).into_response(),
        RedirectOutcome::InvalidParam => {
            (StatusCode::BAD_REQUEST, "Invalid short URL").into_response()
        }
        RedirectOutcome::NotFound => (StatusCode::NOT_FOUND, "Short URL not found").into_response(),
        RedirectOutcome::Expired => (StatusCode::GONE, "This link has expired").into_response(),
        RedirectOutcome::Blacklisted => {
            (StatusCode::GONE, "This link has been disabled").into_response()
        }
    }
}
