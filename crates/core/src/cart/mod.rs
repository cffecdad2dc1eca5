//! Shopping cart state.
//!
//! The cart is a list of [`LineItem`]s, unique by [`LineItemUid`]. All
//! changes go through [`CartState::apply`], a pure reducer over
//! [`CartAction`]s:
//!
//! ```text
//! Add { product, quantity }      merge by uid, capped at stock (fallback 99)
//! Remove { uid }                 drop the row, no-op when absent
//! UpdateQuantity { uid, qty }    set max(1, qty), no stock cap
//! Clear                          drop every row
//! ```
//!
//! Persistence lives in the storefront crate; nothing here performs I/O.

mod line_item;
mod state;
mod summary;

pub use line_item::{LineItem, LineItemUid, Variant};
pub use state::{CartAction, CartState, FALLBACK_STOCK_CAP};
pub use summary::{FLAT_SHIPPING, OrderSummary};
