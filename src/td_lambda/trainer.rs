//! Self-play episodes and the end-of-game update

use crate::{
    error::Result,
    td_lambda::{
        TdConfig,
        episode::{CompletedEpisode, Episode},
        policy::Policy,
        update::apply_episode_update,
        value_store::ValueStore,
    },
    tictactoe::{BoardState, GameOutcome, Outcome, evaluate_terminal},
};

/// Drives episodes against a [`ValueStore`] lent by the caller.
///
/// The trainer owns the policy and its random source, never the table:
/// the same store is passed to every training episode and every match.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TdConfig,
    policy: Policy,
}

impl Trainer {
    pub fn new(config: TdConfig) -> Self {
        Self {
            policy: Policy::new(config.epsilon),
            config,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.policy = self.policy.with_seed(seed);
        self
    }

    pub fn config(&self) -> &TdConfig {
        &self.config
    }

    /// A store seeded the way this trainer's parameters expect
    pub fn new_store(&self) -> ValueStore {
        ValueStore::new(self.config.initial_value(), self.config.tie_value)
    }

    /// Record `next` as the latest board of `episode` and check for the end.
    ///
    /// On a win or tie the terminal board (line-marked on a win) replaces
    /// the last history entry, the TD(λ) sweep runs over the whole history,
    /// and the finished game is returned; `episode` then restarts from the
    /// empty board.
    pub fn advance(
        &self,
        store: &mut ValueStore,
        episode: &mut Episode,
        next: BoardState,
    ) -> Result<Option<CompletedEpisode>> {
        store.ensure(&next);
        episode.push(next);

        let evaluation = evaluate_terminal(&next);
        let Some(outcome) = GameOutcome::from_evaluation(&evaluation) else {
            return Ok(None);
        };

        store.ensure(&evaluation.state);
        episode.replace_last(evaluation.state);

        let reward = match evaluation.outcome {
            Outcome::Win => self.config.win_value,
            Outcome::Tie | Outcome::Ongoing => self.config.tie_value,
        };
        apply_episode_update(store, episode.history(), reward, &self.config)?;

        Ok(Some(CompletedEpisode {
            history: episode.take_history(),
            outcome,
        }))
    }

    /// Ask the policy for the board after `state` without recording it
    pub fn choose(
        &mut self,
        store: &mut ValueStore,
        state: &BoardState,
        greedy: bool,
    ) -> Result<BoardState> {
        self.policy.decide(store, state, greedy)
    }

    /// Let the policy play one move of `episode`, then check for the end.
    pub fn play_move(
        &mut self,
        store: &mut ValueStore,
        episode: &mut Episode,
        greedy: bool,
    ) -> Result<Option<CompletedEpisode>> {
        let next = self.choose(store, &episode.current(), greedy)?;
        self.advance(store, episode, next)
    }

    /// Play one exploratory self-play game to the end.
    pub fn play_episode(&mut self, store: &mut ValueStore) -> Result<CompletedEpisode> {
        let mut episode = Episode::new();
        store.ensure(&episode.current());
        loop {
            if let Some(completed) = self.play_move(store, &mut episode, false)? {
                return Ok(completed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_runs_to_terminal() {
        let mut trainer = Trainer::new(TdConfig::default()).with_seed(7);
        let mut store = trainer.new_store();

        let completed = trainer.play_episode(&mut store).unwrap();
        assert_eq!(completed.history[0], BoardState::new());
        assert!(completed.plies() >= 5 && completed.plies() <= 9);
        assert!(evaluate_terminal(&completed.terminal_state()).is_terminal());
        for state in &completed.history {
            assert!(store.contains(state));
            assert_eq!(store.trace(state), Some(0.0));
        }
    }

    #[test]
    fn test_win_replaces_last_entry_with_marked_board() {
        let trainer = Trainer::new(TdConfig::default());
        let mut store = trainer.new_store();
        let mut episode = Episode::new();

        let mut completed = None;
        for pos in [0, 3, 1, 4, 2] {
            let next = episode.current().make_move(pos).unwrap();
            completed = trainer.advance(&mut store, &mut episode, next).unwrap();
        }

        let completed = completed.expect("top row completes the game");
        assert_eq!(completed.terminal_state().key(), "WWW00----");
        assert_eq!(completed.outcome, GameOutcome::Win(crate::tictactoe::Player::X));
        assert_eq!(completed.history.len(), 6);
        assert!(store.value(&completed.terminal_state()).unwrap() > store.initial_value());
        assert_eq!(episode, Episode::new());
    }

    #[test]
    fn test_ongoing_game_is_not_updated() {
        let trainer = Trainer::new(TdConfig::default());
        let mut store = trainer.new_store();
        let mut episode = Episode::new();

        let next = episode.current().make_move(4).unwrap();
        let result = trainer.advance(&mut store, &mut episode, next).unwrap();
        assert!(result.is_none());
        assert_eq!(store.value(&next), Some(0.2));
        assert_eq!(episode.plies(), 1);
    }

    #[test]
    fn test_same_seed_gives_identical_tables() {
        let run = |seed| {
            let mut trainer = Trainer::new(TdConfig::default()).with_seed(seed);
            let mut store = trainer.new_store();
            for _ in 0..200 {
                trainer.play_episode(&mut store).unwrap();
            }
            store.sorted_entries()
        };

        let first = run(2024);
        let second = run(2024);
        assert_eq!(first.len(), second.len());
        for ((k1, v1), (k2, v2)) in first.iter().zip(&second) {
            assert_eq!(k1, k2);
            assert_eq!(v1.to_bits(), v2.to_bits());
        }
    }
}
