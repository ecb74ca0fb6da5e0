//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod contact;
pub mod generate;
pub mod health;
pub mod redirect;
pub mod report;
pub mod stats;

pub use contact::contact_handler;
pub use generate::{generate_handler, track_qr_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use report::{report_handler, report_status_handler};
pub use stats::{dashboard_handler, link_stats_handler, stats_handler};
