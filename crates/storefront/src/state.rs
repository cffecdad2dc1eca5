//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart_store::CartStore;
use crate::catalog::{Catalog, CatalogError, CatalogService};
use crate::config::StorefrontConfig;
use crate::storage::{CartPersistence, FileStorage};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single cart store
/// for this storefront; handlers reach the cart only through
/// [`AppState::cart`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogService,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create application state from already-built parts.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: CatalogService, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Build the catalog and the file-backed cart described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog cannot be loaded. A missing
    /// or unreadable cart slot is not an error.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StartupError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::bundled()?,
        };
        tracing::info!(products = catalog.len(), "Catalog loaded");

        let catalog = CatalogService::new(catalog, config.catalog_latency);
        let cart = CartStore::open(CartPersistence::new(
            FileStorage::new(&config.data_dir),
            config.cart_storage_key.clone(),
        ));

        Ok(Self::new(config, catalog, cart))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Lock the cart store.
    ///
    /// Cart operations are synchronous; never hold the guard across an
    /// `.await`.
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_from_config_uses_file_storage() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_dir: tmp.path().to_path_buf(),
            catalog_latency: Duration::ZERO,
            ..StorefrontConfig::default()
        };

        let state = AppState::from_config(config).unwrap();
        let product = state.catalog().catalog().products()[0].clone();
        state.cart().add_item(&product, 1);

        assert!(tmp.path().join("urban-store-cart.json").exists());
        assert_eq!(state.clone().cart().count(), 1);
    }

    #[test]
    fn test_from_config_missing_catalog() {
        let config = StorefrontConfig {
            catalog_path: Some("/nonexistent/catalog.json".into()),
            ..StorefrontConfig::default()
        };
        assert!(matches!(
            AppState::from_config(config),
            Err(StartupError::Catalog(_))
        ));
    }
}
