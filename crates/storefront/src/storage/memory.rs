//! In-process slot storage.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{SlotStorage, StorageError};

/// Slots held in a map, optionally limited to a total byte quota.
///
/// The quota counts key and value bytes across all slots, the way browser
/// local storage does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Unlimited storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once `quota` bytes would be in use.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: Mutex::default(),
            quota: Some(quota),
        }
    }

    /// Seed a slot before handing the storage to a store.
    #[must_use]
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
