//! Urban Store Core - cart state and shared types.
//!
//! This crate provides the types used across all Urban Store components:
//! - `storefront` - Local storefront server (catalog, cart and checkout API)
//! - `cli` - Command-line access to the same cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no HTTP. The cart reducer in [`cart`] can be unit tested
//! without any persistence behind it; the storefront crate composes it with a
//! storage adapter.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails
//! - [`product`] - Catalog product records
//! - [`cart`] - Line items, the cart reducer and order summaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;

pub use cart::{
    CartAction, CartState, FALLBACK_STOCK_CAP, LineItem, LineItemUid, OrderSummary, Variant,
};
pub use product::Product;
pub use types::*;
