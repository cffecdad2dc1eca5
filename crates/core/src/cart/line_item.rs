//! Line items and their identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{Price, ProductId};

/// The purchasable sub-selection of a product (currently its size).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variant(String);

impl Variant {
    /// Sentinel for products without a variant dimension.
    pub const DEFAULT: &'static str = "default";

    /// Resolve the variant for a product being added to the cart.
    ///
    /// The first non-empty of `selected_size` and `size` wins; otherwise
    /// the variant is [`Variant::DEFAULT`].
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        [product.selected_size.as_deref(), product.size.as_deref()]
            .into_iter()
            .flatten()
            .find(|size| !size.is_empty())
            .map_or_else(Self::default, |size| Self(size.to_owned()))
    }

    /// Returns the variant as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the `"default"` sentinel.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Composite identity of a cart row: `"{product_id}-{variant}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemUid(String);

impl LineItemUid {
    /// Compute the uid for a product and variant.
    #[must_use]
    pub fn new(product_id: ProductId, variant: &Variant) -> Self {
        Self(format!("{product_id}-{variant}"))
    }

    /// Returns the uid as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineItemUid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LineItemUid {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl PartialEq<str> for LineItemUid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LineItemUid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single row in the cart.
///
/// Descriptive and pricing fields are copied from the product when the row is
/// first created and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub uid: LineItemUid,
    pub product_id: ProductId,
    #[serde(alias = "size")]
    pub variant: Variant,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    pub quantity: u32,
}

impl LineItem {
    /// Build a new row from a product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        let variant = Variant::for_product(product);
        Self {
            uid: LineItemUid::new(product.id, &variant),
            product_id: product.id,
            variant,
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price,
            stock: product.stock,
            quantity,
        }
    }

    /// `price * quantity` for this row.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}
