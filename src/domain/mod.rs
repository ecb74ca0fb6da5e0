//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`request_context`] - Client metadata carried into write operations
//! - [`best_effort`] - Outcome of side effects that never fail a request
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod best_effort;
pub mod entities;
pub mod repositories;
pub mod request_context;

pub use best_effort::BestEffort;
pub use request_context::RequestContext;
