//! File-backed slot storage.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::{SlotStorage, StorageError, validate_key};

/// Slots stored as `<dir>/<key>.json`.
///
/// Each write goes to its own temporary file in the same directory which is
/// then renamed over the slot, so a crash mid-write leaves the previous value
/// intact and concurrent writers (the storefront and the CLI) never share a
/// temporary path.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if the key is not a safe file name.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl SlotStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(key))?;

        // Dropped (and deleted) on any error below
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_error(key))?;
        tmp.write_all(value.as_bytes()).map_err(io_error(key))?;
        tmp.persist(&path).map_err(|e| io_error(key)(e.error))?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        assert_eq!(storage.read("urban-store-cart").unwrap(), None);
        storage.write("urban-store-cart", "{\"items\":[]}").unwrap();

        assert_eq!(
            storage.read("urban-store-cart").unwrap().as_deref(),
            Some("{\"items\":[]}")
        );
        assert!(tmp.path().join("nested/urban-store-cart.json").exists());
        assert_eq!(fs::read_dir(tmp.path().join("nested")).unwrap().count(), 1);
    }

    #[test]
    fn test_concurrent_writers_never_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let large = "a".repeat(400 * 1024);
        let small = "b".repeat(50 * 1024);

        std::thread::scope(|scope| {
            for value in [&large, &small] {
                let storage = FileStorage::new(tmp.path());
                scope.spawn(move || {
                    for _ in 0..100 {
                        storage.write("urban-store-cart", value).unwrap();
                    }
                });
            }
        });

        let stored = FileStorage::new(tmp.path())
            .read("urban-store-cart")
            .unwrap()
            .unwrap();
        assert!(stored == large || stored == small);

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["urban-store-cart.json"]);
    }

    #[test]
    fn test_rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path());
        let err = storage.write("../outside", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[test]
    fn test_write_into_file_path_fails_with_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let storage = FileStorage::new(&blocker);
        let err = storage.write("urban-store-cart", "x").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
