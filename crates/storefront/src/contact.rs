//! Contact form.
//!
//! Submissions are validated, logged and acknowledged. Nothing is sent
//! anywhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use urban_store_core::Email;
use uuid::Uuid;

use crate::forms::{FieldError, min_chars};

/// Contact form as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A contact form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidContact {
    pub name: String,
    pub email: Email,
    pub message: String,
}

/// The answer to an accepted contact message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    pub title: &'static str,
    pub description: &'static str,
}

impl ContactForm {
    /// Validate every field, reporting all failures at once.
    ///
    /// # Errors
    ///
    /// Returns the list of failing fields, in form order.
    pub fn validate(self) -> Result<ValidContact, Vec<FieldError>> {
        let mut errors = Vec::new();

        if !min_chars(&self.name, 2) {
            errors.push(FieldError {
                field: "name",
                message: "Name is required",
            });
        }
        let email = Email::parse(&self.email);
        if email.is_err() {
            errors.push(FieldError {
                field: "email",
                message: "Enter a valid email",
            });
        }
        if !min_chars(&self.message, 10) {
            errors.push(FieldError {
                field: "message",
                message: "Message should be at least 10 characters",
            });
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(ValidContact {
                name: self.name.trim().to_string(),
                email,
                message: self.message.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Record an accepted message and acknowledge it.
#[must_use]
pub fn acknowledge(contact: &ValidContact) -> ContactReceipt {
    let receipt = ContactReceipt {
        reference: Uuid::new_v4(),
        received_at: Utc::now(),
        title: "Message sent",
        description: "Our team will get back to you shortly.",
    };

    tracing::info!(
        reference = %receipt.reference,
        email_domain = contact.email.domain(),
        message_chars = contact.message.chars().count(),
        "Contact message received"
    );

    receipt
}
