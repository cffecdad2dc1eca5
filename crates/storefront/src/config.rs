//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding the cart slot (default: .urban-store)
//! - `CART_STORAGE_KEY` - Name of the cart slot (default: urban-store-cart)
//! - `CATALOG_PATH` - JSON product catalog to serve instead of the bundled one
//! - `CATALOG_LATENCY_MS` - Simulated catalog latency in milliseconds (default: 400)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::storage::{DEFAULT_CART_KEY, validate_key};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = ".urban-store";
const DEFAULT_CATALOG_LATENCY_MS: u64 = 400;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for durable storage slots
    pub data_dir: PathBuf,
    /// Name of the slot holding the cart
    pub cart_storage_key: String,
    /// Catalog file; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Simulated latency for catalog listing (lookups wait half)
    pub catalog_latency: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_storage_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
            catalog_latency: Duration::from_millis(DEFAULT_CATALOG_LATENCY_MS),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = parse_or(&get, "STOREFRONT_HOST", defaults.host)?;
        let port = parse_or(&get, "STOREFRONT_PORT", defaults.port)?;
        let data_dir = get("STOREFRONT_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let cart_storage_key = get("CART_STORAGE_KEY").unwrap_or(defaults.cart_storage_key);
        validate_key(&cart_storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let catalog_path = get("CATALOG_PATH").map(PathBuf::from);
        let latency_ms = parse_or(&get, "CATALOG_LATENCY_MS", DEFAULT_CATALOG_LATENCY_MS)?;

        let sentry_sample_rate = parse_rate(&get, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?;
        let sentry_traces_sample_rate = parse_rate(
            &get,
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
        )?;

        Ok(Self {
            host,
            port,
            data_dir,
            cart_storage_key,
            catalog_path,
            catalog_latency: Duration::from_millis(latency_ms),
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or(get, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
