//! MessagePack implementation of the value-table repository.
//!
//! The table is stored as a single map from state key to value, using
//! rmp_serde for compact binary serialization.

use std::{collections::BTreeMap, fs::File, io, path::Path};

use crate::{
    Result,
    adapters::csv_repository::decode_entry,
    error::Error,
    ports::ValueTableRepository,
    td_lambda::ValueStore,
};

/// MessagePack-based value-table repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

/// Key-ordered map of the store, the shape written to MessagePack
pub(crate) fn to_map(store: &ValueStore) -> BTreeMap<String, f64> {
    store.sorted_entries().into_iter().collect()
}

/// Rebuild a store from a decoded map; rows are numbered in key order.
pub(crate) fn from_map(map: BTreeMap<String, f64>, initial_value: f64) -> Result<ValueStore> {
    let mut entries = Vec::with_capacity(map.len());
    for (index, (key, value)) in map.into_iter().enumerate() {
        entries.push(decode_entry(index + 1, &key, value)?);
    }
    Ok(ValueStore::from_values(initial_value, entries))
}

impl ValueTableRepository for MsgPackRepository {
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, &to_map(store)).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize value table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load(&self, path: &Path, initial_value: f64) -> Result<Option<ValueStore>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open file {path:?}"),
                    source,
                });
            }
        };

        let map: BTreeMap<String, f64> =
            rmp_serde::decode::from_read(file).map_err(|e| Error::SerializationContext {
                operation: "deserialize value table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        from_map(map, initial_value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::tictactoe::BoardState;

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("table.msgpack");

        let mut store = ValueStore::new(0.2, 0.0);
        store.set_value(&BoardState::from_key("----X----").unwrap(), 0.61);

        let repo = MsgPackRepository::new();
        repo.save(&store, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path, 0.2).expect("Failed to load");

        assert_eq!(loaded.unwrap().sorted_entries(), store.sorted_entries());
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = MsgPackRepository::new();
        let result = repo.load(&temp_dir.path().join("missing.msgpack"), 0.2);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("corrupt.msgpack");
        std::fs::write(&file_path, b"not messagepack").unwrap();

        let result = MsgPackRepository::new().load(&file_path, 0.2);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_key_in_map_is_rejected() {
        let map = BTreeMap::from([("XX".to_string(), 0.5)]);
        let err = from_map(map, 0.2).unwrap_err();
        assert!(matches!(err, Error::MalformedEntry { row: 1, .. }));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let store = ValueStore::new(0.2, 0.0);
        let result = repo.save(&store, Path::new("/invalid_dir_12345/file.msgpack"));
        assert!(result.is_err());
    }
}
