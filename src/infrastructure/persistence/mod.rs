//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! prepared statements. Uniqueness and counter atomicity are delegated to
//! the schema in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Links, status and counters
//! - [`PgVisitRepository`] - Visit log and aggregates
//! - [`PgReportRepository`] - Abuse reports
//! - [`PgContactRepository`] - Contact messages
//! - [`PgAnalyticsRepository`] - Analytics events

pub mod pg_analytics_repository;
pub mod pg_contact_repository;
pub mod pg_link_repository;
pub mod pg_report_repository;
pub mod pg_visit_repository;
mod rows;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_contact_repository::PgContactRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_report_repository::PgReportRepository;
pub use pg_visit_repository::PgVisitRepository;
