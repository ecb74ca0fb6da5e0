//! Repository trait for contact form messages.

use crate::domain::entities::{Contact, NewContact};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, new_contact: NewContact) -> Result<Contact, AppError>;

    /// Counts messages sent from `ip` within the last `window_minutes` minutes.
    async fn count_recent_by_ip(&self, ip: &str, window_minutes: i64) -> Result<i64, AppError>;
}
