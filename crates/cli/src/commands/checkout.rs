//! Mock checkout command.

use urban_store_storefront::checkout::{CheckoutForm, Confirmation, confirm};
use urban_store_storefront::state::AppState;

use super::{CommandError, describe_fields, emit};

fn format_confirmation(confirmation: &Confirmation) -> String {
    format!(
        "Order {} confirmed at {}\n{} item(s), total {}",
        confirmation.order_reference,
        confirmation.placed_at.format("%Y-%m-%d %H:%M UTC"),
        confirmation.item_count,
        confirmation.summary.total.display()
    )
}

/// Validate the form and confirm an order for the current cart.
///
/// The cart is left as it is.
///
/// # Errors
///
/// Returns `CommandError::Checkout` listing invalid fields, or when the cart
/// is empty.
pub fn submit(state: &AppState, form: CheckoutForm) -> Result<(), CommandError> {
    let order = form
        .validate()
        .map_err(|errors| CommandError::Checkout(describe_fields(&errors)))?;

    let cart = state.cart();
    if cart.state().is_empty() {
        return Err(CommandError::Checkout("cart is empty".to_string()));
    }

    emit(&format_confirmation(&confirm(&order, cart.state())));
    Ok(())
}
