//! Shop listing filters: category, price range and sort order.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use urban_store_core::{Price, Product};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Filter applied to products already fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// `None` or [`ALL_CATEGORIES`] matches every category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Price,
    /// Inclusive upper price bound.
    pub max_price: Price,
    pub sort: SortOrder,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            min_price: Price::ZERO,
            max_price: Price::new(Decimal::ONE_THOUSAND),
            sort: SortOrder::Featured,
        }
    }
}

impl ProductFilter {
    /// Whether a product passes the category and price checks.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let in_category = self
            .category
            .as_deref()
            .is_none_or(|category| category == ALL_CATEGORIES || category == product.category);
        let in_price = product.price >= self.min_price && product.price <= self.max_price;
        in_category && in_price
    }

    /// Keep matching products and sort them. Sorting is stable, so equal
    /// prices keep catalog order.
    #[must_use]
    pub fn apply(&self, products: impl IntoIterator<Item = Product>) -> Vec<Product> {
        let mut kept: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            SortOrder::Featured => {}
            SortOrder::PriceAsc => kept.sort_by_key(|p| p.price),
            SortOrder::PriceDesc => kept.sort_by_key(|p| std::cmp::Reverse(p.price)),
        }
        kept
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything_in_order() {
        let catalog = Catalog::bundled().unwrap();
        let filtered = ProductFilter::default().apply(catalog.products().to_vec());
        assert_eq!(filtered, catalog.products());
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::bundled().unwrap();
        let filter = ProductFilter {
            category: Some("Footwear".to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(
            names(&filter.apply(catalog.products().to_vec())),
            ["Trail Runner Sneakers", "Leather Chelsea Boots"]
        );

        let all = ProductFilter {
            category: Some(ALL_CATEGORIES.to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(all.apply(catalog.products().to_vec()).len(), catalog.len());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = Catalog::bundled().unwrap();
        let filter = ProductFilter {
            min_price: Price::from_cents(2400),
            max_price: Price::from_cents(3650),
            ..ProductFilter::default()
        };
        assert_eq!(
            names(&filter.apply(catalog.products().to_vec())),
            ["Essential Crew Tee", "Canvas Field Tote"]
        );
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = Catalog::bundled().unwrap();
        let accessories = |sort| ProductFilter {
            category: Some("Accessories".to_string()),
            sort,
            ..ProductFilter::default()
        };

        assert_eq!(
            names(&accessories(SortOrder::PriceAsc).apply(catalog.products().to_vec())),
            ["Ribbed Beanie", "Canvas Field Tote", "Everyday Crossbody Bag"]
        );
        assert_eq!(
            names(&accessories(SortOrder::PriceDesc).apply(catalog.products().to_vec())),
            ["Everyday Crossbody Bag", "Canvas Field Tote", "Ribbed Beanie"]
        );
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert_eq!("featured".parse::<SortOrder>().unwrap(), SortOrder::Featured);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
