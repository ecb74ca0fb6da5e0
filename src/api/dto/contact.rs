//! DTOs for the contact form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::SubmitContact;

/// Request body for `POST /api/shorty-url/contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub fullname: String,

    #[validate(email(message = "Valid email is required"), length(max = 254))]
    pub email: String,

    #[serde(alias = "detail")]
    #[validate(length(min = 10, max = 1000, message = "Message must be 10 to 1000 characters"))]
    pub message: String,
}

impl From<ContactRequest> for SubmitContact {
    fn from(c: ContactRequest) -> Self {
        Self {
            fullname: c.fullname.trim().to_string(),
            email: c.email.trim().to_string(),
            message: c.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}
