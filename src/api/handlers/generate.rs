//! Handlers for link issuance and QR tracking.

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;
use validator::Validate;

use crate::api::dto::generate::{
    GenerateRequest, GenerateResponse, TrackQrRequest, TrackQrResponse,
};
use crate::domain::RequestContext;
use crate::domain::entities::EventKind;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a short link for a destination URL.
///
/// # Endpoint
///
/// `POST /api/shorty-url/generate`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/page" }
/// ```
///
/// # Response
///
/// **201 Created** for a new link, **200 OK** when an active link for the
/// URL already existed:
///
/// ```json
/// {
///   "shortCode": "aB3dE",
///   "shortUrl": "https://shorty.co/aB3dE",
///   "isExisting": false
/// }
/// ```
///
/// # Errors
///
/// - **400**: invalid URL
/// - **403**: the URL is blacklisted
pub async fn generate_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    payload.validate()?;

    let issued = state.link_service.issue(&payload.url, &ctx).await?;
    let short_url = state.link_service.short_url(&issued.link.short_code);

    let _ = state
        .analytics_service
        .track(EventKind::UrlGenerated, Some(short_url.clone()), &ctx)
        .await;

    let status = if issued.is_existing {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(GenerateResponse {
            short_code: issued.link.short_code,
            short_url,
            is_existing: issued.is_existing,
        }),
    ))
}

/// Counts a QR code rendered for a short link.
///
/// # Endpoint
///
/// `POST /api/shorty-url/stats/track-qr`
///
/// # Errors
///
/// - **400**: `shortUrl` is not a short URL of this service
/// - **404**: unknown short code
pub async fn track_qr_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<TrackQrRequest>,
) -> Result<Json<TrackQrResponse>, AppError> {
    payload.validate()?;

    let (short_code, qr_generated_count) =
        state.link_service.track_qr(payload.short_url.trim()).await?;

    let _ = state
        .analytics_service
        .track(
            EventKind::QrGenerated,
            Some(state.link_service.short_url(&short_code)),
            &ctx,
        )
        .await;

    info!(short_code = %short_code, qr_generated_count, "QR generation tracked");

    Ok(Json(TrackQrResponse {
        short_code,
        qr_generated_count,
    }))
}
