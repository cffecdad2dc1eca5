//! Cart store: the reducer composed with durable storage.
//!
//! [`CartStore`] is the only writer of the cart slot. Every mutation runs the
//! pure reducer from `urban_store_core` and then writes the full item list
//! back to the slot. A failed write never fails the mutation: the in-memory
//! cart stays authoritative for the rest of the session and the failure is
//! logged and sent to Sentry.

use urban_store_core::{
    CartAction, CartState, LineItem, LineItemUid, OrderSummary, Price, Product, Variant,
};

use crate::storage::{CartPersistence, DEFAULT_CART_KEY, MemoryStorage, StorageError};

/// The shopper's cart.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    persistence: CartPersistence,
    last_persist_error: Option<String>,
}

impl CartStore {
    /// Open the store, restoring whatever the slot holds.
    ///
    /// Never fails: an absent or unreadable slot gives an empty cart.
    #[must_use]
    pub fn open(persistence: CartPersistence) -> Self {
        let state = persistence.load();
        tracing::info!(
            slot = %persistence.key(),
            lines = state.len(),
            units = state.count(),
            "Cart restored"
        );
        Self {
            state,
            persistence,
            last_persist_error: None,
        }
    }

    /// A store backed by process memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(CartPersistence::new(MemoryStorage::new(), DEFAULT_CART_KEY))
    }

    /// Add `quantity` units of `product`, returning the row's uid.
    ///
    /// Repeated adds of the same product and size merge into one row, capped
    /// at the product's stock.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> LineItemUid {
        let uid = LineItemUid::new(product.id, &Variant::for_product(product));
        tracing::debug!(%uid, quantity, "Adding to cart");
        self.dispatch(CartAction::Add {
            product: product.clone(),
            quantity,
        });
        uid
    }

    /// Remove a row. Unknown uids are ignored.
    pub fn remove_item(&mut self, uid: &LineItemUid) {
        tracing::debug!(%uid, "Removing from cart");
        self.dispatch(CartAction::Remove { uid: uid.clone() });
    }

    /// Set a row's quantity, floored at 1. Unknown uids are ignored.
    pub fn update_quantity(&mut self, uid: &LineItemUid, quantity: i64) {
        tracing::debug!(%uid, quantity, "Updating cart quantity");
        self.dispatch(CartAction::UpdateQuantity {
            uid: uid.clone(),
            quantity,
        });
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        tracing::debug!("Clearing cart");
        self.dispatch(CartAction::Clear);
    }

    /// Apply an action and persist the result.
    pub fn dispatch(&mut self, action: CartAction) {
        self.state = std::mem::take(&mut self.state).apply(action);
        self.persist();
    }

    /// Replace the in-memory cart with the slot's current contents.
    ///
    /// Used when another process may have written the slot.
    pub fn reload(&mut self) {
        self.state = self.persistence.load();
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.state) {
            Ok(()) => {
                self.last_persist_error = None;
            }
            Err(e) => {
                report_persist_failure(&e, self.persistence.key());
                self.last_persist_error = Some(e.to_string());
            }
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.state.count()
    }

    /// Sum of `price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.state.subtotal()
    }

    /// Subtotal, shipping and total.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.state.summary()
    }

    /// The error from the most recent write, if it failed.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }
}

fn report_persist_failure(error: &StorageError, slot: &str) {
    let event_id = sentry::capture_error(error);
    tracing::warn!(
        slot,
        error = %error,
        sentry_event_id = %event_id,
        "Cart not persisted; keeping in-memory state"
    );
}
