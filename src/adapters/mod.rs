//! Adapters implementing domain ports.
//!
//! File-backed tables pick their format from the path: a `.msgpack`
//! extension selects MessagePack, anything else the flat CSV rows.

pub mod csv_repository;
pub mod in_memory_repository;
pub mod msgpack_repository;

use std::path::Path;

pub use csv_repository::CsvRepository;
pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::{Result, ports::ValueTableRepository, td_lambda::ValueStore};

/// On-disk format of a value table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    MsgPack,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("msgpack") => TableFormat::MsgPack,
            _ => TableFormat::Csv,
        }
    }
}

impl ValueTableRepository for TableFormat {
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()> {
        match self {
            TableFormat::Csv => CsvRepository.save(store, path),
            TableFormat::MsgPack => MsgPackRepository.save(store, path),
        }
    }

    fn load(&self, path: &Path, initial_value: f64) -> Result<Option<ValueStore>> {
        match self {
            TableFormat::Csv => CsvRepository.load(path, initial_value),
            TableFormat::MsgPack => MsgPackRepository.load(path, initial_value),
        }
    }
}
