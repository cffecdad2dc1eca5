//! Integration tests for Urban Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p urban-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart survives restarts through file slots
//! - `storefront_api` - Shopping flows through the HTTP router
//!
//! Each [`TestContext`] owns a temporary data directory, so tests never
//! touch a real cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use urban_store_storefront::config::StorefrontConfig;
use urban_store_storefront::routes;
use urban_store_storefront::state::{AppState, StartupError};

/// A storefront data directory that lives as long as the context.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a context with an empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// The data directory holding cart slots.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this context's data directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.dir.path().to_path_buf(),
            catalog_latency: Duration::ZERO,
            ..StorefrontConfig::default()
        }
    }

    /// Open the storefront state as a fresh process would.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn open(&self) -> Result<AppState, StartupError> {
        AppState::from_config(self.config())
    }

    /// Open the storefront and build its router.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn app(&self) -> Result<Router, StartupError> {
        Ok(routes::app(self.open()?))
    }
}

/// Send one request to the router and decode the JSON response.
///
/// A non-JSON or empty body decodes as `Value::Null`.
///
/// # Errors
///
/// Returns an error if the request cannot be built or the body cannot be read.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), Box<dyn std::error::Error>> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, value))
}
