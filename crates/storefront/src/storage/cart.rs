//! The persisted cart slot.

use serde::{Deserialize, Serialize};
use urban_store_core::{CartState, LineItem};

use super::{SlotStorage, StorageError};

/// Slot key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "urban-store-cart";

/// On-disk shape of the cart slot. Only `items` is persisted.
#[derive(Serialize)]
struct PersistedCartRef<'a> {
    items: &'a [LineItem],
}

#[derive(Deserialize)]
struct PersistedCart {
    items: Vec<LineItem>,
}

/// Serialize a cart into its slot representation.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_cart(state: &CartState) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&PersistedCartRef {
        items: state.items(),
    })?)
}

/// Parse a slot value back into a cart.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the value is not a cart record.
pub fn decode_cart(value: &str) -> Result<CartState, StorageError> {
    let persisted: PersistedCart = serde_json::from_str(value)?;
    Ok(CartState::from_items(persisted.items))
}

/// A slot backend bound to the cart's slot key.
pub struct CartPersistence {
    storage: Box<dyn SlotStorage>,
    key: String,
}

impl std::fmt::Debug for CartPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartPersistence {
    /// Bind `storage` to the slot `key`.
    pub fn new(storage: impl SlotStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    /// The slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the slot, distinguishing "never written" from failures.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be read or decoded.
    pub fn try_load(&self) -> Result<Option<CartState>, StorageError> {
        self.storage
            .read(&self.key)?
            .map(|value| decode_cart(&value))
            .transpose()
    }

    /// Read the slot, falling back to an empty cart.
    ///
    /// Missing, unreadable or malformed slots all yield an empty cart; the
    /// latter two are logged.
    #[must_use]
    pub fn load(&self) -> CartState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(slot = %self.key, "No saved cart, starting empty");
                CartState::new()
            }
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "Saved cart unreadable, starting empty");
                CartState::new()
            }
        }
    }

    /// Write the full cart to the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub fn save(&self, state: &CartState) -> Result<(), StorageError> {
        let value = encode_cart(state)?;
        self.storage.write(&self.key, &value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use urban_store_core::{CartAction, Price, Product, ProductId};

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: i32, size: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Tops".to_string(),
            image: String::new(),
            price: Price::from_cents(1999),
            stock: Some(8),
            description: String::new(),
            size: None,
            selected_size: size.map(String::from),
        }
    }

    fn sample_cart() -> CartState {
        [
            (product(3, Some("M")), 2),
            (product(1, None), 1),
            (product(3, Some("L")), 4),
        ]
        .into_iter()
        .fold(CartState::new(), |state, (product, quantity)| {
            state.apply(CartAction::Add { product, quantity })
        })
    }

    #[test]
    fn test_encode_has_only_items_field() {
        let value: serde_json::Value =
            serde_json::from_str(&encode_cart(&sample_cart()).unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["items"].as_array().unwrap().len(), 3);
        assert_eq!(object["items"][0]["uid"], "3-M");
        assert_eq!(object["items"][0]["productId"], 3);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let cart = sample_cart();
        let restored = decode_cart(&encode_cart(&cart).unwrap()).unwrap();

        assert_eq!(restored, cart);
        let uids: Vec<&str> = restored.items().iter().map(|i| i.uid.as_str()).collect();
        assert_eq!(uids, ["3-M", "1-default", "3-L"]);
    }

    #[test]
    fn test_load_missing_slot_is_empty() {
        let persistence = CartPersistence::new(MemoryStorage::new(), DEFAULT_CART_KEY);
        assert!(persistence.try_load().unwrap().is_none());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_slot_is_empty() {
        let storage = MemoryStorage::new().with_slot(DEFAULT_CART_KEY, "{not json");
        let persistence = CartPersistence::new(storage, DEFAULT_CART_KEY);

        assert!(persistence.try_load().is_err());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let storage = MemoryStorage::new().with_slot(DEFAULT_CART_KEY, "{\"lines\":[]}");
        let persistence = CartPersistence::new(storage, DEFAULT_CART_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_writes_to_named_slot() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = CartPersistence::new(Arc::clone(&storage), "custom-slot");

        persistence.save(&sample_cart()).unwrap();

        assert!(storage.read(DEFAULT_CART_KEY).unwrap().is_none());
        let raw = storage.read("custom-slot").unwrap().unwrap();
        assert_eq!(decode_cart(&raw).unwrap(), sample_cart());
    }
}
