use std::collections::HashMap;
use std::sync::Mutex;

use trolley_core::{CartStorage, StorageError};

/// Process-local store for tests and embedded use. Shared across owners via
/// `Arc<InMemoryCartStorage>`, which also implements `CartStorage`.
#[derive(Debug, Default)]
pub struct InMemoryCartStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for InMemoryCartStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Read("storage mutex poisoned".to_owned()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Write("storage mutex poisoned".to_owned()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use trolley_core::CartStorage;

    use super::InMemoryCartStorage;

    #[test]
    fn get_of_an_absent_key_is_none() {
        let storage = InMemoryCartStorage::new();
        assert_eq!(storage.get("trolley:cart").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips_and_overwrites() {
        let storage = InMemoryCartStorage::new();

        storage.set("trolley:cart", "[]").unwrap();
        storage.set("trolley:cart", "[9]").unwrap();
        assert_eq!(storage.get("trolley:cart").unwrap().as_deref(), Some("[9]"));
    }
}
