//! End-of-episode TD(λ) sweep
//!
//! The sweep walks the finished episode from the first board to the last.
//! At step `i` (running from 2 to `n + 1` over a history of `n` boards) the
//! board `h[i - 2]` gets its trace re-armed to 1 and a temporal difference is
//! formed:
//!
//! ```text
//! i >= n : TD = reward * (-1)^(1 + n - i) - V(h[i-2])
//! i <  n : TD = γ * V(h[i])               - V(h[i-2])
//! ```
//!
//! Every board of the history is then moved by `α * TD * e(s)` and its trace
//! multiplied by `-λγ`. The bootstrap looks two plies ahead, at the same
//! player's next board, and the alternating sign on both the terminal reward
//! and the trace decay encodes that consecutive boards belong to opposite
//! players sharing one table. All traces of the episode end at zero.
//!
//! Every board is corrected at every step, so the sweep is quadratic in the
//! episode length. That is the update the agent is trained with; do not
//! replace it with the incremental textbook form.

use crate::{
    error::{Error, Result},
    td_lambda::{TdConfig, value_store::ValueStore},
    tictactoe::BoardState,
};

/// Apply the TD(λ) sweep for one finished episode.
///
/// `history` runs from the empty board to the terminal board and every
/// entry must already be in `store`.
///
/// # Errors
///
/// Returns [`Error::EmptyEpisode`] for an empty history and
/// [`Error::UnknownState`] when a board has no table entry. Both are
/// internal consistency failures; the store is left untouched.
pub fn apply_episode_update(
    store: &mut ValueStore,
    history: &[BoardState],
    reward: f64,
    config: &TdConfig,
) -> Result<()> {
    if history.is_empty() {
        return Err(Error::EmptyEpisode);
    }
    if let Some(missing) = history.iter().find(|s| !store.contains(s)) {
        return Err(Error::UnknownState {
            state: missing.key(),
        });
    }

    let n = history.len();
    let decay = config.trace_decay();

    for i in 2..=n + 1 {
        let current = &history[i - 2];
        store.set_trace(current, 1.0);

        let td = if i >= n {
            let sign = if (1 + n - i).is_multiple_of(2) {
                1.0
            } else {
                -1.0
            };
            reward * sign - store.value_of(current)
        } else {
            config.gamma * store.value_of(&history[i]) - store.value_of(current)
        };

        for state in history {
            let trace = store.trace_of(state);
            let value = store.value_of(state);
            store.set_value(state, value + config.alpha * td * trace);
            store.set_trace(state, trace * decay);
        }
    }

    for state in history {
        store.set_trace(state, 0.0);
    }

    Ok(())
}
