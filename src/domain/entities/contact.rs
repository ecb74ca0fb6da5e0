//! Contact message entity.

use chrono::{DateTime, Utc};

/// A support message submitted through the contact form.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub message: String,
    pub sender_ip: String,
    pub sender_user_agent: Option<String>,
    pub status: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub fullname: String,
    pub email: String,
    pub message: String,
    pub sender_ip: String,
    pub sender_user_agent: Option<String>,
}
