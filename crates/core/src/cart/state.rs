//! The cart aggregate and its reducer.

use crate::product::Product;
use crate::types::Price;

use super::line_item::{LineItem, LineItemUid, Variant};
use super::summary::OrderSummary;

/// Quantity ceiling used when neither the product nor the existing row
/// knows its stock.
///
/// This is an arbitrary safety limit, not a business rule.
pub const FALLBACK_STOCK_CAP: u32 = 99;

/// A mutation of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add `quantity` units of a product, merging with an existing row.
    Add { product: Product, quantity: u32 },
    /// Remove a row.
    Remove { uid: LineItemUid },
    /// Overwrite a row's quantity, floored at 1.
    UpdateQuantity { uid: LineItemUid, quantity: i64 },
    /// Remove every row.
    Clear,
}

/// The cart: ordered line items, unique by uid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from previously stored rows.
    ///
    /// Rows keep their order. A repeated uid keeps only its first row and a
    /// zero quantity is raised to 1, so a hand-edited slot cannot break the
    /// cart's invariants.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut state = Self::new();
        for mut item in items {
            if state.get(&item.uid).is_some() {
                continue;
            }
            item.quantity = item.quantity.max(1);
            state.items.push(item);
        }
        state
    }

    /// Apply an action, returning the next state.
    #[must_use]
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::Add { product, quantity } => self.add(&product, quantity),
            CartAction::Remove { uid } => self.items.retain(|item| item.uid != uid),
            CartAction::UpdateQuantity { uid, quantity } => {
                if let Some(item) = self.get_mut(&uid) {
                    item.quantity = floor_quantity(quantity);
                }
            }
            CartAction::Clear => self.items.clear(),
        }
        self
    }

    fn add(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        let uid = LineItemUid::new(product.id, &Variant::for_product(product));

        if let Some(existing) = self.get_mut(&uid) {
            let cap = product
                .known_stock()
                .or_else(|| existing.stock.filter(|&stock| stock > 0))
                .unwrap_or(FALLBACK_STOCK_CAP);
            existing.quantity = existing.quantity.saturating_add(quantity).min(cap);
        } else {
            self.items.push(LineItem::from_product(product, quantity));
        }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart, returning its rows.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Look up a row by uid.
    #[must_use]
    pub fn get(&self, uid: &LineItemUid) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.uid == uid)
    }

    fn get_mut(&mut self, uid: &LineItemUid) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.uid == uid)
    }

    /// Number of distinct rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all rows.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity`, unrounded.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Subtotal, shipping and total for display.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::for_cart(self)
    }
}

fn floor_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: i32, cents: i64, stock: Option<u32>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Tops".to_string(),
            image: format!("/images/{id}.jpg"),
            price: Price::from_cents(cents),
            stock,
            description: String::new(),
            size: None,
            selected_size: None,
        }
    }

    fn add(state: CartState, product: &Product, quantity: u32) -> CartState {
        state.apply(CartAction::Add {
            product: product.clone(),
            quantity,
        })
    }

    #[test]
    fn test_add_new_item() {
        let state = add(CartState::new(), &product(1, 1000, Some(5)), 2);

        assert_eq!(state.len(), 1);
        let item = &state.items()[0];
        assert_eq!(item.uid, "1-default");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.name, "Product 1");
        assert_eq!(item.stock, Some(5));
    }

    #[test]
    fn test_add_same_product_merges_and_caps_at_stock() {
        let tee = product(1, 1000, Some(5));
        let state = add(add(CartState::new(), &tee, 2), &tee, 4);

        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_merge_below_cap_sums() {
        let tee = product(1, 1000, Some(10));
        let state = add(add(CartState::new(), &tee, 2), &tee, 3);

        assert_eq!(state.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_distinct_sizes_are_distinct_rows() {
        let tee = product(1, 1000, None);
        let state = add(CartState::new(), &tee.clone().with_selected_size("M"), 1);
        let state = add(state, &tee.with_selected_size("L"), 1);

        let uids: Vec<&str> = state.items().iter().map(|i| i.uid.as_str()).collect();
        assert_eq!(uids, ["1-M", "1-L"]);
    }

    #[test]
    fn test_add_product_size_field_is_variant() {
        let mut tee = product(1, 1000, None);
        tee.size = Some("S".to_string());
        let state = add(CartState::new(), &tee, 1);

        assert_eq!(state.items()[0].uid, "1-S");
        assert_eq!(state.items()[0].variant.as_str(), "S");
    }

    #[test]
    fn test_add_without_size_uses_default_variant() {
        let state = add(CartState::new(), &product(2, 500, None), 1);
        assert_eq!(state.items()[0].uid, "2-default");
    }

    #[test]
    fn test_cap_falls_back_to_item_stock() {
        let first = product(1, 1000, Some(3));
        let without_stock = product(1, 1000, None);
        let state = add(add(CartState::new(), &first, 2), &without_stock, 5);

        assert_eq!(state.items()[0].quantity, 3);
    }

    #[test]
    fn test_cap_falls_back_to_ninety_nine() {
        let tee = product(1, 1000, None);
        let state = add(add(CartState::new(), &tee, 60), &tee, 60);

        assert_eq!(state.items()[0].quantity, FALLBACK_STOCK_CAP);
    }

    #[test]
    fn test_zero_stock_is_treated_as_unknown() {
        let tee = product(1, 1000, Some(0));
        let state = add(add(CartState::new(), &tee, 1), &tee, 1);

        assert_eq!(state.items()[0].quantity, 2);
    }

    #[test]
    fn test_first_add_is_not_capped() {
        // Only the merge path applies the stock ceiling.
        let state = add(CartState::new(), &product(1, 1000, Some(2)), 7);
        assert_eq!(state.items()[0].quantity, 7);
    }

    #[test]
    fn test_add_zero_quantity_adds_one() {
        let state = add(CartState::new(), &product(1, 1000, None), 0);
        assert_eq!(state.items()[0].quantity, 1);
    }

    #[test]
    fn test_metadata_is_not_refreshed_on_merge() {
        let tee = product(1, 1000, Some(10));
        let mut repriced = tee.clone();
        repriced.price = Price::from_cents(9999);
        repriced.name = "Renamed".to_string();

        let state = add(add(CartState::new(), &tee, 1), &repriced, 1);
        assert_eq!(state.items()[0].price, Price::from_cents(1000));
        assert_eq!(state.items()[0].name, "Product 1");
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let state = add(CartState::new(), &product(1, 1000, Some(5)), 3);
        let uid = LineItemUid::from("1-default");

        let state = state.apply(CartAction::UpdateQuantity {
            uid: uid.clone(),
            quantity: 0,
        });
        assert_eq!(state.items()[0].quantity, 1);

        let state = state.apply(CartAction::UpdateQuantity { uid, quantity: -5 });
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_ignores_stock_cap() {
        let state = add(CartState::new(), &product(1, 1000, Some(5)), 1);
        let state = state.apply(CartAction::UpdateQuantity {
            uid: "1-default".into(),
            quantity: 40,
        });

        assert_eq!(state.items()[0].quantity, 40);
    }

    #[test]
    fn test_update_unknown_uid_is_noop() {
        let before = add(CartState::new(), &product(1, 1000, None), 1);
        let after = before.clone().apply(CartAction::UpdateQuantity {
            uid: "9-default".into(),
            quantity: 4,
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove() {
        let state = add(CartState::new(), &product(1, 1000, None), 1);
        let state = add(state, &product(2, 500, None), 1);

        let state = state.apply(CartAction::Remove {
            uid: "1-default".into(),
        });
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].uid, "2-default");
    }

    #[test]
    fn test_remove_unknown_uid_is_noop() {
        let before = add(CartState::new(), &product(1, 1000, None), 1);
        let after = before.clone().apply(CartAction::Remove {
            uid: "nonexistent".into(),
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_count_and_subtotal() {
        let state = add(CartState::new(), &product(1, 1000, None), 2);
        let state = add(state, &product(2, 500, None), 3);

        assert_eq!(state.count(), 5);
        assert_eq!(state.subtotal(), Price::from_cents(3500));
    }

    #[test]
    fn test_clear() {
        let state = add(CartState::new(), &product(1, 1000, None), 2);
        let state = state.apply(CartAction::Clear);

        assert!(state.is_empty());
        assert_eq!(state.count(), 0);
        assert_eq!(state.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_from_items_keeps_order_and_repairs_rows() {
        let a = LineItem::from_product(&product(1, 1000, None), 2);
        let b = LineItem::from_product(&product(2, 500, None), 0);
        let dup = LineItem::from_product(&product(1, 1000, None), 7);

        let state = CartState::from_items([a.clone(), b, dup]);
        assert_eq!(state.len(), 2);
        assert_eq!(state.items()[0], a);
        assert_eq!(state.items()[1].quantity, 1);
    }
}
