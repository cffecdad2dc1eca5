//! Contact form route handler.

use axum::Json;
use tracing::instrument;

use crate::contact::{ContactForm, ContactReceipt, acknowledge};
use crate::error::{AppError, Result, add_breadcrumb};

/// Submit the contact form.
///
/// Responds 422 with every invalid field, otherwise an acknowledgement.
#[instrument(skip(form))]
pub async fn submit(Json(form): Json<ContactForm>) -> Result<Json<ContactReceipt>> {
    let contact = form.validate().map_err(AppError::Validation)?;
    let receipt = acknowledge(&contact);
    add_breadcrumb(
        "contact",
        "Contact message received",
        &[("reference", receipt.reference.to_string())],
    );
    Ok(Json(receipt))
}
