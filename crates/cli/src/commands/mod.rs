//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;

use std::time::Duration;

use thiserror::Error;
use urban_store_core::ProductId;
use urban_store_storefront::config::{ConfigError, StorefrontConfig};
use urban_store_storefront::forms::FieldError;
use urban_store_storefront::state::{AppState, StartupError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog or cart could not be opened.
    #[error(transparent)]
    Startup(#[from] StartupError),

    /// No product with this ID.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No cart row with this identifier.
    #[error("No cart row '{0}'")]
    RowNotFound(String),

    /// Listing options are inconsistent.
    #[error("Invalid listing options: {0}")]
    InvalidListing(String),

    /// Checkout details failed validation.
    #[error("Checkout rejected: {0}")]
    Checkout(String),

    /// Contact form failed validation.
    #[error("Message not sent: {0}")]
    Contact(String),
}

/// Open the catalog and cart the storefront would serve.
///
/// # Errors
///
/// Returns an error if the environment or the catalog is invalid.
pub fn open_state() -> Result<AppState, CommandError> {
    let config = StorefrontConfig::from_env()?;
    open_state_with(config)
}

/// Open state from an explicit configuration. Catalog latency is disabled.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn open_state_with(config: StorefrontConfig) -> Result<AppState, CommandError> {
    let config = StorefrontConfig {
        catalog_latency: Duration::ZERO,
        ..config
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening storefront data");
    Ok(AppState::from_config(config)?)
}

/// Render field errors as `field: message` pairs.
fn describe_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Print lines of command output.
#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn test_state(dir: &std::path::Path) -> AppState {
    open_state_with(StorefrontConfig {
        data_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    })
    .unwrap()
}
