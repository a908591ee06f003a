//! In-memory value-table repository for testing.
//!
//! Tables are kept as MessagePack bytes keyed by path, so a save/load cycle
//! goes through the same encoding as the file adapter without touching disk.

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    adapters::msgpack_repository::{from_map, to_map},
    error::Error,
    ports::ValueTableRepository,
    td_lambda::ValueStore,
};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use ttt_td::{adapters::InMemoryRepository, ports::ValueTableRepository, td_lambda::ValueStore};
///
/// let repo = InMemoryRepository::new();
/// assert!(repo.load(Path::new("table"), 0.2)?.is_none());
///
/// repo.save(&ValueStore::new(0.2, 0.0), Path::new("table"))?;
/// assert_eq!(repo.load(Path::new("table"), 0.2)?.map(|s| s.len()), Some(1));
/// # Ok::<(), ttt_td::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables currently stored
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(&storage_key(path))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn storage_key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl ValueTableRepository for InMemoryRepository {
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(&to_map(store)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize value table for in-memory storage".to_string(),
                message: e.to_string(),
            }
        })?;

        self.lock().insert(storage_key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path, initial_value: f64) -> Result<Option<ValueStore>> {
        let storage = self.lock();
        let Some(bytes) = storage.get(&storage_key(path)) else {
            return Ok(None);
        };

        let map: BTreeMap<String, f64> =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize value table from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        from_map(map, initial_value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::BoardState;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let mut store = ValueStore::new(0.2, 0.0);
        store.set_value(&BoardState::from_key("X--------").unwrap(), 0.3);
        let path = Path::new("table");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&store, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        let loaded = repo.load(path, 0.2).unwrap().unwrap();
        assert_eq!(loaded.sorted_entries(), store.sorted_entries());
    }

    #[test]
    fn test_clear_removes_all() {
        let repo = InMemoryRepository::new();
        let store = ValueStore::new(0.2, 0.0);

        repo.save(&store, Path::new("t1")).unwrap();
        repo.save(&store, Path::new("t2")).unwrap();
        assert_eq!(repo.count(), 2);

        repo.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let path = Path::new("shared");

        repo1.save(&ValueStore::new(0.2, 0.0), path).unwrap();

        assert!(repo2.load(path, 0.2).unwrap().is_some());
        assert_eq!(repo2.count(), 1);
    }
}
