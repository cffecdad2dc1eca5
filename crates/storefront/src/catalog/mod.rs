//! Catalog query service over a static product list.
//!
//! The catalog is read-only. [`CatalogService`] wraps a [`Catalog`] with an
//! artificial delay on the fetch calls so the storefront behaves like it is
//! talking to a remote API; the delay can be set to zero.
//!
//! # Example
//!
//! ```rust,ignore
//! let service = CatalogService::new(Catalog::bundled()?, Duration::from_millis(400));
//!
//! let page = service.fetch_products(0, 6).await;
//! let product = service.fetch_product_by_id(ProductId::new(3)).await;
//! let related = service.recommended_products("Tops", ProductId::new(2), 4);
//! ```

mod filter;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use urban_store_core::{Product, ProductId};

pub use filter::{ALL_CATEGORIES, ProductFilter, SortOrder};

/// Products per page when the caller does not say.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Recommendations returned when the caller does not say.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

const BUNDLED_CATALOG: &str = include_str!("../../data/products.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a JSON array of products.
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("Duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// One page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Index of the following page, `None` on the last page.
    pub next_page: Option<usize>,
    /// Number of products in the whole catalog.
    pub total: usize,
}

/// An ordered, immutable product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateId(dup.id));
        }
        Ok(Self { products })
    }

    /// The catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled data is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse a catalog from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Slice out page `page` (zero-based) of `per_page` products.
    ///
    /// A `per_page` of zero is treated as [`DEFAULT_PAGE_SIZE`]. Pages past
    /// the end are empty.
    #[must_use]
    pub fn page(&self, page: usize, per_page: usize) -> ProductPage {
        let per_page = if per_page == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            per_page
        };
        let total = self.products.len();
        let start = page.saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);

        ProductPage {
            items: self.products.get(start..end).unwrap_or_default().to_vec(),
            next_page: (end < total).then(|| page + 1),
            total,
        }
    }

    /// Find a product by id.
    #[must_use]
    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in `category` other than `exclude`, in catalog order.
    #[must_use]
    pub fn recommended(&self, category: &str, exclude: ProductId, limit: usize) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category == category && p.id != exclude)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Distinct category names in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }
}

/// Async facade over a [`Catalog`] with simulated network latency.
///
/// Cheap to clone.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl CatalogService {
    /// Wrap a catalog. Listing waits `latency`, single lookups half of it.
    #[must_use]
    pub fn new(catalog: Catalog, latency: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            latency,
        }
    }

    /// Wrap a catalog with no artificial delay.
    #[must_use]
    pub fn without_latency(catalog: Catalog) -> Self {
        Self::new(catalog, Duration::ZERO)
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    async fn delay(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// Fetch one page of products.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_products(&self, page: usize, per_page: usize) -> ProductPage {
        Self::delay(self.latency).await;
        self.catalog.page(page, per_page)
    }

    /// Fetch a single product.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_product_by_id(&self, id: ProductId) -> Option<Product> {
        Self::delay(self.latency / 2).await;
        self.catalog.by_id(id).cloned()
    }

    /// Same-category products excluding `exclude_id`, at most `limit`.
    #[must_use]
    pub fn recommended_products(
        &self,
        category: &str,
        exclude_id: ProductId,
        limit: usize,
    ) -> Vec<Product> {
        self.catalog.recommended(category, exclude_id, limit)
    }

    /// Distinct category names in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }
}
