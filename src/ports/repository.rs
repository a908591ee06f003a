//! Repository port for value-table persistence.

use std::path::Path;

use crate::{Result, td_lambda::ValueStore};

/// Port for persisting and loading the learned value table.
///
/// Only values are persisted. Eligibility traces are zero between episodes,
/// so a loaded store starts with every trace at zero.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use ttt_td::{ports::ValueTableRepository, td_lambda::TdConfig};
///
/// fn load_or_fresh<R: ValueTableRepository>(
///     repo: &R,
///     path: &Path,
///     config: &TdConfig,
/// ) -> ttt_td::Result<bool> {
///     Ok(repo.load(path, config.initial_value())?.is_some())
/// }
/// ```
pub trait ValueTableRepository {
    /// Save every `(state, value)` entry of `store` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written or the table
    /// cannot be serialized.
    fn save(&self, store: &ValueStore, path: &Path) -> Result<()>;

    /// Load a table from `path`.
    ///
    /// `initial_value` becomes the default for states the table has never
    /// seen. A missing table is `Ok(None)`; the caller trains from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error if the table exists but cannot be read, or if any
    /// entry is malformed. A partial table is never returned.
    fn load(&self, path: &Path, initial_value: f64) -> Result<Option<ValueStore>>;
}
