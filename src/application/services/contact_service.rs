//! Contact form intake with per-IP throttling.

use std::sync::Arc;

use crate::domain::RequestContext;
use crate::domain::entities::{Contact, NewContact};
use crate::domain::repositories::ContactRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(Debug, Clone, Copy)]
pub struct ContactPolicy {
    pub window_minutes: i64,
    pub max_per_window: i64,
}

impl Default for ContactPolicy {
    fn default() -> Self {
        Self {
            window_minutes: 60,
            max_per_window: 3,
        }
    }
}

/// A validated contact form submission.
#[derive(Debug, Clone)]
pub struct SubmitContact {
    pub fullname: String,
    pub email: String,
    pub message: String,
}

pub struct ContactService<C: ContactRepository + ?Sized = dyn ContactRepository> {
    contact_repository: Arc<C>,
    policy: ContactPolicy,
}

impl<C: ContactRepository + ?Sized> ContactService<C> {
    pub fn new(contact_repository: Arc<C>, policy: ContactPolicy) -> Self {
        Self {
            contact_repository,
            policy,
        }
    }

    /// Stores a contact message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RateLimited`] when the sender IP already sent
    /// `max_per_window` messages within the window.
    pub async fn submit(
        &self,
        submission: SubmitContact,
        ctx: &RequestContext,
    ) -> Result<Contact, AppError> {
        let ip = ctx.ip_or_unknown();

        let recent = self
            .contact_repository
            .count_recent_by_ip(ip, self.policy.window_minutes)
            .await?;
        if recent >= self.policy.max_per_window {
            tracing::warn!(ip, recent, "Contact form spam detected");
            return Err(AppError::rate_limited(
                "Too many submissions. Please try again later.",
                json!({ "retry_after_minutes": self.policy.window_minutes }),
            ));
        }

        let contact = self
            .contact_repository
            .create(NewContact {
                fullname: submission.fullname,
                email: submission.email,
                message: submission.message,
                sender_ip: ip.to_string(),
                sender_user_agent: ctx.user_agent.clone(),
            })
            .await?;

        tracing::info!(contact_id = contact.id, ip, "Contact form submitted");
        Ok(contact)
    }
}
