//! ε-greedy move selection over successor states

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    td_lambda::value_store::ValueStore,
    tictactoe::BoardState,
};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Chooses the next board among the legal successors of the current one.
///
/// With probability `1 - ε` (or always, when forced greedy) the choice is
/// restricted to the successors of maximal value; otherwise every successor
/// is a candidate. The final pick among candidates is uniform.
#[derive(Debug, Clone)]
pub struct Policy {
    epsilon: f64,
    rng: StdRng,
}

impl Policy {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    /// Pick the next board after `state`.
    ///
    /// Every successor receives a value-table entry as a side effect; no
    /// value is changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] when `state` is full.
    pub fn decide(
        &mut self,
        store: &mut ValueStore,
        state: &BoardState,
        forced_greedy: bool,
    ) -> Result<BoardState> {
        let possible = state.legal_successors();
        if possible.is_empty() {
            return Err(Error::NoLegalMove { state: state.key() });
        }

        let values: Vec<f64> = possible.iter().map(|s| store.value_of(s)).collect();

        let exploit = forced_greedy || self.rng.random::<f64>() > self.epsilon;
        let candidates: Vec<BoardState> = if exploit {
            let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            possible
                .iter()
                .zip(&values)
                .filter(|&(_, &value)| !(value < max_value))
                .map(|(s, _)| *s)
                .collect()
        } else {
            possible
        };

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::NoLegalMove { state: state.key() })
    }
}
