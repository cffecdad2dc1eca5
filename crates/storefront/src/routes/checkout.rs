//! Checkout route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::checkout::{CheckoutForm, Confirmation, confirm};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Submit the checkout form.
///
/// Responds 422 with every invalid field, 400 for an empty cart, otherwise a
/// confirmation. The cart is not cleared.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<Confirmation>> {
    let order = form.validate().map_err(AppError::Validation)?;

    let cart = state.cart();
    if cart.state().is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let confirmation = confirm(&order, cart.state());
    add_breadcrumb(
        "checkout",
        "Order confirmed",
        &[("order_reference", confirmation.order_reference.to_string())],
    );
    Ok(Json(confirmation))
}
