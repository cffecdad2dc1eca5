//! Cart management commands.
//!
//! Commands edit the persisted cart slot, the same one the storefront loads
//! at startup.
//!
//! # Usage
//!
//! ```bash
//! us-cli cart add 2 --size M --quantity 2
//! us-cli cart update 2-M 3
//! us-cli cart remove 2-M
//! us-cli cart show
//! us-cli cart clear
//! ```

use urban_store_core::{LineItemUid, ProductId};
use urban_store_storefront::cart_store::CartStore;
use urban_store_storefront::state::AppState;

use super::{CommandError, emit};

fn format_cart(cart: &CartStore) -> String {
    if cart.state().is_empty() {
        return "Your cart is empty.".to_string();
    }

    let summary = cart.summary();
    let shipping = if summary.free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "{:<24} {:<28} {:>3} x {:>9} = {:>9}",
                item.uid.as_str(),
                item.name,
                item.quantity,
                item.price.display(),
                item.line_total().display()
            )
        })
        .collect();
    lines.push(format!("Items:    {}", cart.count()));
    lines.push(format!("Subtotal: {}", summary.subtotal.display()));
    lines.push(format!("Shipping: {shipping}"));
    lines.push(format!("Total:    {}", summary.total.display()));

    if let Some(error) = cart.last_persist_error() {
        lines.push(format!("Warning: cart was not saved ({error})"));
    }
    lines.join("\n")
}

fn existing_row(cart: &CartStore, uid: &str) -> Result<LineItemUid, CommandError> {
    let uid = LineItemUid::from(uid.trim());
    if cart.state().get(&uid).is_none() {
        return Err(CommandError::RowNotFound(uid.to_string()));
    }
    Ok(uid)
}

/// Show cart contents and totals.
pub fn show(state: &AppState) {
    emit(&format_cart(&state.cart()));
}

/// Add a product, optionally in a given size.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` for an unknown product ID.
pub async fn add(
    state: &AppState,
    product_id: ProductId,
    size: Option<&str>,
    quantity: u32,
) -> Result<(), CommandError> {
    let product = state
        .catalog()
        .fetch_product_by_id(product_id)
        .await
        .ok_or(CommandError::ProductNotFound(product_id))?;
    let product = match size.map(str::trim).filter(|size| !size.is_empty()) {
        Some(size) => product.with_selected_size(size),
        None => product,
    };

    let mut cart = state.cart();
    let uid = cart.add_item(&product, quantity);
    tracing::info!(%uid, quantity, "Added to cart");
    emit(&format_cart(&cart));
    Ok(())
}

/// Set a row's quantity.
///
/// # Errors
///
/// Returns `CommandError::RowNotFound` if the cart has no such row.
pub fn update(state: &AppState, uid: &str, quantity: i64) -> Result<(), CommandError> {
    let mut cart = state.cart();
    let uid = existing_row(&cart, uid)?;
    cart.update_quantity(&uid, quantity);
    emit(&format_cart(&cart));
    Ok(())
}

/// Remove a row.
///
/// # Errors
///
/// Returns `CommandError::RowNotFound` if the cart has no such row.
pub fn remove(state: &AppState, uid: &str) -> Result<(), CommandError> {
    let mut cart = state.cart();
    let uid = existing_row(&cart, uid)?;
    cart.remove_item(&uid);
    emit(&format_cart(&cart));
    Ok(())
}

/// Empty the cart.
pub fn clear(state: &AppState) {
    let mut cart = state.cart();
    cart.clear();
    emit(&format_cart(&cart));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_state;

    #[tokio::test]
    async fn test_add_persists_across_opens() {
        let tmp = tempfile::tempdir().unwrap();

        let state = test_state(tmp.path());
        add(&state, ProductId::new(2), Some(" M "), 2).await.unwrap();
        add(&state, ProductId::new(4), None, 1).await.unwrap();
        drop(state);

        let reopened = test_state(tmp.path());
        let cart = reopened.cart();
        let uids: Vec<&str> = cart.items().iter().map(|i| i.uid.as_str()).collect();
        assert_eq!(uids, ["2-M", "4-One Size"]);
        assert_eq!(cart.count(), 3);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        assert!(matches!(
            add(&state, ProductId::new(999), None, 1).await,
            Err(CommandError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_remove_require_existing_row() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        add(&state, ProductId::new(1), Some("L"), 1).await.unwrap();

        assert!(matches!(
            update(&state, "1-M", 2),
            Err(CommandError::RowNotFound(_))
        ));
        update(&state, "1-L", 0).unwrap();
        assert_eq!(state.cart().count(), 1);

        remove(&state, "1-L").unwrap();
        assert!(state.cart().state().is_empty());
        assert!(matches!(remove(&state, "1-L"), Err(CommandError::RowNotFound(_))));
    }

    #[tokio::test]
    async fn test_format_cart() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_state(tmp.path());
        assert_eq!(format_cart(&state.cart()), "Your cart is empty.");

        add(&state, ProductId::new(9), None, 2).await.unwrap();
        let out = format_cart(&state.cart());
        assert!(out.contains("Subtotal: $39.98"));
        assert!(out.contains("Shipping: $12.00"));
        assert!(out.ends_with("Total:    $51.98"));
    }
}
