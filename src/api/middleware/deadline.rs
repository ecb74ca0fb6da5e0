//! Overall per-request deadline.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;

use crate::error::AppError;

/// Aborts a request that runs longer than the configured deadline.
///
/// The in-flight handler future is dropped and the client receives
/// `504 Gateway Timeout` with a `timeout` error body.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{code}", get(redirect_handler))
///     .layer(middleware::from_fn_with_state(Duration::from_secs(10), deadline::layer));
/// ```
pub async fn layer(State(deadline): State<Duration>, request: Request, next: Next) -> Response {
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Request deadline exceeded");
            AppError::timeout(
                "Request timed out",
                json!({ "deadline_ms": deadline.as_millis() as u64 }),
            )
            .into_response()
        }
    }
}
