//! Durable key-value storage for the cart.
//!
//! # Layers
//!
//! - [`SlotStorage`] - raw string slots addressed by key (the equivalent of
//!   browser local storage)
//! - [`MemoryStorage`] / [`FileStorage`] - the two slot backends
//! - [`CartPersistence`] - binds a backend to one named slot and
//!   (de)serializes the cart record `{ "items": [...] }`
//!
//! Storage failures are reported as [`StorageError`]; it is up to the caller
//! whether they are fatal. The cart store treats them as best-effort.

mod cart;
mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

pub use cart::{CartPersistence, DEFAULT_CART_KEY, decode_cart, encode_cart};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur while reading or writing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would exceed the backend's size limit.
    #[error("Storage quota exceeded writing slot {key}: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The key cannot be mapped onto the backend.
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    /// The slot value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A store of named string slots.
///
/// Writes replace the whole slot (last write wins).
pub trait SlotStorage: Send + Sync {
    /// Read a slot. Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Check that a slot key is safe to use as a file name.
///
/// Keys are non-empty, at most 128 characters of ASCII alphanumerics, `-`,
/// `_` and `.`, and may not start with a dot.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
