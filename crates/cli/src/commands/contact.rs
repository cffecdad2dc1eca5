//! Contact form command.
//!
//! # Usage
//!
//! ```bash
//! us-cli contact -n "Jordan Fox" -e jordan@example.com -m "Do you offer styling sessions?"
//! ```

use urban_store_storefront::contact::{ContactForm, ContactReceipt, acknowledge};

use super::{CommandError, describe_fields, emit};

fn format_receipt(receipt: &ContactReceipt) -> String {
    format!(
        "{} (reference {})\n{}",
        receipt.title, receipt.reference, receipt.description
    )
}

/// Validate and send a contact message.
///
/// # Errors
///
/// Returns `CommandError::Contact` listing invalid fields.
pub fn submit(form: ContactForm) -> Result<(), CommandError> {
    let contact = form
        .validate()
        .map_err(|errors| CommandError::Contact(describe_fields(&errors)))?;
    emit(&format_receipt(&acknowledge(&contact)));
    Ok(())
}
