//! Handlers for abuse reports.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::report::{ReportRequest, ReportResponse, ReportStatusResponse};
use crate::domain::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Files an abuse report against a short link.
///
/// # Endpoint
///
/// `POST /api/shorty-url/report`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "user@example.com",
///   "shorty": "https://shorty.co/aB3dE",
///   "detail": "Phishing page imitating a bank login"
/// }
/// ```
///
/// Once a link has collected enough reports it is blacklisted automatically.
///
/// # Errors
///
/// - **400**: validation failure or malformed short URL
/// - **404**: unknown short code
/// - **409**: this client already reported the link recently
pub async fn report_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<ReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    payload.validate()?;

    let report = state.report_service.submit(payload.into(), &ctx).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            report_id: report.id,
            message: "Report submitted successfully. We will review it shortly.".to_string(),
        }),
    ))
}

/// Returns the moderation status of a report filed from the caller's IP.
///
/// # Endpoint
///
/// `GET /api/shorty-url/report/status/{id}`
///
/// Reports filed from another IP are reported as not found.
pub async fn report_status_handler(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
    ctx: RequestContext,
) -> Result<Json<ReportStatusResponse>, AppError> {
    let report = state.report_service.status(report_id, &ctx).await?;

    Ok(Json(report.into()))
}
