//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules, and
//! expose the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - Issuance, lookup and lifecycle of links
//! - [`services::VisitService`] - Best-effort visit log and visit aggregates
//! - [`services::RedirectService`] - Short code resolution
//! - [`services::ReportService`] - Abuse reports and auto-flagging
//! - [`services::StatsService`] - Read-only rollups
//! - [`services::AnalyticsService`] - Product event log
//! - [`services::ContactService`] - Contact form intake

pub mod services;
