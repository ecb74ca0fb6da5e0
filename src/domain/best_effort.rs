//! Outcome type for side effects that must never fail the caller.

use crate::error::AppError;

/// Result of a best-effort write such as a visit or analytics event.
///
/// A failed write is logged and reported as [`BestEffort::Dropped`] instead of
/// being propagated, so the surrounding request still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum BestEffort {
    Recorded,
    Dropped,
}

impl BestEffort {
    /// Converts a write result, logging the error at `error` level when it
    /// is dropped. `what` names the write in the log line.
    pub fn from_result<T>(result: Result<T, AppError>, what: &'static str) -> Self {
        match result {
            Ok(_) => BestEffort::Recorded,
            Err(e) => {
                tracing::error!(write = what, error = %e, kind = e.kind(), "Best-effort write dropped");
                BestEffort::Dropped
            }
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, BestEffort::Recorded)
    }
}
