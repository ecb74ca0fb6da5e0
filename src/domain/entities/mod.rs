//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Each persisted entity has a separate
//! `New*` struct carrying only the fields a caller supplies on creation; ids,
//! timestamps and initial statuses are assigned by the store.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL with its [`LinkStatus`]
//! - [`Visit`] - One resolved redirect
//! - [`Report`] - An abuse report against a short code
//! - [`Contact`] - A contact form message
//! - [`NewAnalyticsEvent`] - A product analytics event

pub mod analytics_event;
pub mod contact;
pub mod link;
pub mod report;
pub mod visit;

pub use analytics_event::{EventKind, NewAnalyticsEvent};
pub use contact::{Contact, NewContact};
pub use link::{Link, LinkStatus, NewLink, UnknownLinkStatus};
pub use report::{NewReport, Report, ReportStatus, UnknownReportStatus};
pub use visit::{NewVisit, Visit};
