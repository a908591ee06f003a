//! Shared helpers for the integration tests.

#![allow(dead_code)]

use ttt_td::{
    BoardState,
    td_lambda::{TdConfig, Trainer, ValueStore},
};

/// Parse a sequence of state keys into boards.
pub fn boards(keys: &[&str]) -> Vec<BoardState> {
    keys.iter()
        .map(|key| BoardState::from_key(key).expect("valid state key"))
        .collect()
}

/// A seeded trainer and the store it produced after `episodes` self-play games.
pub fn trained(seed: u64, episodes: usize) -> (Trainer, ValueStore) {
    let mut trainer = Trainer::new(TdConfig::default()).with_seed(seed);
    let mut store = trainer.new_store();
    for _ in 0..episodes {
        trainer
            .play_episode(&mut store)
            .expect("self-play episode completes");
    }
    (trainer, store)
}

/// Store entries as `(key, value bits)` so two tables compare exactly.
pub fn exact_entries(store: &ValueStore) -> Vec<(String, u64)> {
    store
        .sorted_entries()
        .into_iter()
        .map(|(key, value)| (key, value.to_bits()))
        .collect()
}
