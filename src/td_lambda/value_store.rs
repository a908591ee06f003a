//! State-value and eligibility-trace tables

use std::collections::HashMap;

use crate::tictactoe::BoardState;

/// Tabular state values with their eligibility traces.
///
/// Both tables share one domain: every state inserted through a lazy read
/// gets the default value and a zero trace together.
#[derive(Debug, Clone)]
pub struct ValueStore {
    values: HashMap<BoardState, f64>,
    traces: HashMap<BoardState, f64>,
    /// Value given to states seen for the first time
    initial_value: f64,
}

impl ValueStore {
    /// Create a store whose only entry is the empty board, valued at
    /// `tie_value`.
    pub fn new(initial_value: f64, tie_value: f64) -> Self {
        let mut store = Self::empty(initial_value);
        store.values.insert(BoardState::new(), tie_value);
        store.traces.insert(BoardState::new(), 0.0);
        store
    }

    fn empty(initial_value: f64) -> Self {
        Self {
            values: HashMap::new(),
            traces: HashMap::new(),
            initial_value,
        }
    }

    /// Rebuild a store from persisted values. Every trace starts at zero.
    pub fn from_values<I>(initial_value: f64, entries: I) -> Self
    where
        I: IntoIterator<Item = (BoardState, f64)>,
    {
        let mut store = Self::empty(initial_value);
        for (state, value) in entries {
            store.values.insert(state, value);
            store.traces.insert(state, 0.0);
        }
        store
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Make sure `state` has entries in both tables
    pub fn ensure(&mut self, state: &BoardState) {
        if !self.values.contains_key(state) {
            self.values.insert(*state, self.initial_value);
            self.traces.insert(*state, 0.0);
        }
    }

    /// Value of `state`, inserting the default on first access
    pub fn value_of(&mut self, state: &BoardState) -> f64 {
        self.ensure(state);
        self.values[state]
    }

    /// Value of `state` without inserting
    pub fn value(&self, state: &BoardState) -> Option<f64> {
        self.values.get(state).copied()
    }

    pub fn set_value(&mut self, state: &BoardState, value: f64) {
        self.ensure(state);
        self.values.insert(*state, value);
    }

    /// Trace of `state`, inserting the defaults on first access
    pub fn trace_of(&mut self, state: &BoardState) -> f64 {
        self.ensure(state);
        self.traces.get(state).copied().unwrap_or(0.0)
    }

    /// Trace of `state` without inserting
    pub fn trace(&self, state: &BoardState) -> Option<f64> {
        self.traces.get(state).copied()
    }

    pub fn set_trace(&mut self, state: &BoardState, trace: f64) {
        self.ensure(state);
        self.traces.insert(*state, trace);
    }

    pub fn contains(&self, state: &BoardState) -> bool {
        self.values.contains_key(state)
    }

    /// Number of states in the table
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(state, value)` entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&BoardState, f64)> + '_ {
        self.values.iter().map(|(state, &value)| (state, value))
    }

    /// Entries sorted by state key, for stable output
    pub fn sorted_entries(&self) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self
            .values
            .iter()
            .map(|(state, &value)| (state.key(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ValueStore {
        ValueStore::new(0.2, 0.0)
    }

    #[test]
    fn test_new_store_holds_empty_board_at_tie_value() {
        let store = store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.value(&BoardState::new()), Some(0.0));
        assert_eq!(store.trace(&BoardState::new()), Some(0.0));
    }

    #[test]
    fn test_lazy_default_on_first_read() {
        let mut store = store();
        let state = BoardState::from_key("X--------").unwrap();

        assert!(!store.contains(&state));
        assert_eq!(store.value_of(&state), 0.2);
        assert!(store.contains(&state));
        assert_eq!(store.trace(&state), Some(0.0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_value_of_is_idempotent() {
        let mut store = store();
        let state = BoardState::from_key("X0-------").unwrap();

        let first = store.value_of(&state);
        let second = store.value_of(&state);
        assert_eq!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_trace_read_inserts_value_too() {
        let mut store = store();
        let state = BoardState::from_key("----X----").unwrap();

        assert_eq!(store.trace_of(&state), 0.0);
        assert_eq!(store.value(&state), Some(0.2));
    }

    #[test]
    fn test_setters_do_not_reset_each_other() {
        let mut store = store();
        let state = BoardState::from_key("----X----").unwrap();

        store.set_trace(&state, 1.0);
        store.set_value(&state, 0.7);
        assert_eq!(store.trace(&state), Some(1.0));
        assert_eq!(store.value(&state), Some(0.7));
    }

    #[test]
    fn test_from_values_zeroes_traces() {
        let state = BoardState::from_key("X--------").unwrap();
        let store = ValueStore::from_values(0.2, [(state, 0.9)]);

        assert_eq!(store.value(&state), Some(0.9));
        assert_eq!(store.trace(&state), Some(0.0));
        assert!(!store.contains(&BoardState::new()));
    }

    #[test]
    fn test_sorted_entries() {
        let mut store = store();
        store.value_of(&BoardState::from_key("X--------").unwrap());
        store.value_of(&BoardState::from_key("-X-------").unwrap());

        let keys: Vec<String> = store.sorted_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["---------", "-X-------", "X--------"]);
    }
}
