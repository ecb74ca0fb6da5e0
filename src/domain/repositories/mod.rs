//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and
//! are implemented in `crate::infrastructure::persistence`. Mock
//! implementations are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Links, their status and counters
//! - [`VisitRepository`] - Visit log and visit aggregates
//! - [`ReportRepository`] - Abuse reports with duplicate suppression
//! - [`ContactRepository`] - Contact form messages
//! - [`AnalyticsRepository`] - Product analytics events

pub mod analytics_repository;
pub mod contact_repository;
pub mod link_repository;
pub mod report_repository;
pub mod visit_repository;

pub use analytics_repository::AnalyticsRepository;
pub use contact_repository::ContactRepository;
pub use link_repository::{
    ACTIVE_LONG_URL_CONSTRAINT, LinkOverview, LinkRepository, SHORT_CODE_CONSTRAINT,
};
pub use report_repository::ReportRepository;
pub use visit_repository::{
    DIRECT_REFERER, DailyCount, HourlyCount, RefererCount, VisitRepository, VisitSummary,
};

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use report_repository::MockReportRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
