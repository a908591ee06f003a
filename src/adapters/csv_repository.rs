//! Flat CSV implementation of the value-table repository.
//!
//! One `key,value` row per state, no header row. The key is the 9-character
//! state string and the value a decimal float.

use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use crate::{
    Result,
    error::Error,
    ports::ValueTableRepository,
    td_lambda::ValueStore,
    tictactoe::BoardState,
};

/// CSV-based value-table repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use ttt_td::{
///     adapters::CsvRepository,
///     ports::ValueTableRepository,
///     td_lambda::{TdConfig, Trainer},
/// };
///
/// let repo = CsvRepository::new();
/// let trainer = Trainer::new(TdConfig::default());
/// let store = trainer.new_store();
///
/// repo.save(&store, Path::new("TicTacToe_parameters"))?;
/// let loaded = repo.load(Path::new("TicTacToe_parameters"), 0.2)?;
/// assert!(loaded.is_some());
/// # Ok::<(), ttt_td::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRepository;

impl CsvRepository {
    pub fn new() -> Self {
        Self
    }

    /// Write `store` as CSV rows, sorted by key.
    pub fn write_to<W: Write>(&self, store: &ValueStore, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for (key, value) in store.sorted_entries() {
            csv_writer.write_record([key, value.to_string()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Parse CSV rows into a store. Any malformed row fails the whole read.
    pub fn read_from<R: Read>(&self, reader: R, initial_value: f64) -> Result<ValueStore> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let row = index + 1;
            let record = record?;
            if record.len() != 2 {
                return Err(Error::MalformedEntry {
                    row,
                    reason: format!("expected 2 columns, found {}", record.len()),
                });
            }
            entries.push(parse_entry(row, &record[0], &record[1])?);
        }

        Ok(ValueStore::from_values(initial_value, entries))
    }
}

/// Parse one CSV row; `row` is 1-based.
fn parse_entry(row: usize, key: &str, value: &str) -> Result<(BoardState, f64)> {
    let value: f64 = value.trim().parse().map_err(|_| Error::MalformedEntry {
        row,
        reason: format!("value '{value}' is not a number"),
    })?;
    decode_entry(row, key, value)
}

/// Validate one persisted `(key, value)` pair; `row` is 1-based.
pub(crate) fn decode_entry(row: usize, key: &str, value: f64) -> Result<(BoardState, f64)> {
    let state = BoardState::from_key(key).map_err(|e| Error::MalformedEntry {
        row,
        reason: e.to_string(),
    })?;
    if !value.is_finite() {
        return Err(Error::MalformedEntry {
            row,
            reason: format!("value {value} is not finite"),
        });
    }
    Ok((state, value))
}

impl ValueTableRepository for CsvRepository {
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        self.write_to(store, file)
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
        self.read_from(file, initial_value).map(Some)
    }
}
