//! Order totals shown on the cart and checkout pages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Price;

use super::state::CartState;

/// Flat shipping charged on any non-empty cart.
pub const FLAT_SHIPPING: Price = Price::new(Decimal::from_parts(1200, 0, 0, false, 2));

/// Subtotal, shipping and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Compute the summary for a cart. Empty carts ship free.
    #[must_use]
    pub fn for_cart(cart: &CartState) -> Self {
        let subtotal = cart.subtotal();
        let shipping = if cart.is_empty() {
            Price::ZERO
        } else {
            FLAT_SHIPPING
        };
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Whether the order ships for free.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping == Price::ZERO
    }
}
