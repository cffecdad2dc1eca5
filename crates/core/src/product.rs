//! Catalog product records.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as supplied by the catalog.
///
/// `size` is the product's own variant dimension, if it has one;
/// `selected_size` is set by the shopper before adding to the cart and takes
/// precedence over `size` when the cart computes the line item variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub price: Price,
    /// Units in stock, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl Product {
    /// Return this product with a shopper-selected size attached.
    #[must_use]
    pub fn with_selected_size(mut self, size: impl Into<String>) -> Self {
        self.selected_size = Some(size.into());
        self
    }

    /// Known stock, treating zero as unknown.
    ///
    /// A zero stock count carries no usable ceiling for the cart, so it falls
    /// through to the next cap candidate.
    #[must_use]
    pub fn known_stock(&self) -> Option<u32> {
        self.stock.filter(|&stock| stock > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        let json = r#"{
            "id": 4,
            "name": "Canvas Tote",
            "category": "Accessories",
            "image": "/images/tote.jpg",
            "price": 24.5,
            "stock": 12,
            "description": "Heavy cotton tote."
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.price, Price::from_cents(2450));
        assert_eq!(product.stock, Some(12));
        assert!(product.size.is_none());
        assert!(product.selected_size.is_none());
    }

    #[test]
    fn test_selected_size_uses_camel_case() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Tee","category":"Tops","price":"10","selectedSize":"M"}"#,
        )
        .unwrap();
        assert_eq!(product.selected_size.as_deref(), Some("M"));
        assert_eq!(product.stock, None);
    }

    #[test]
    fn test_known_stock_ignores_zero() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Tee","category":"Tops","price":"10","stock":0}"#,
        )
        .unwrap();
        assert_eq!(product.known_stock(), None);
    }
}
