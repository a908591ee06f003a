//! Episode history

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BoardState, GameOutcome};

/// Boards visited by the game in progress, starting from the empty board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    history: Vec<BoardState>,
}

impl Episode {
    pub fn new() -> Self {
        let mut history = Vec::with_capacity(10);
        history.push(BoardState::new());
        Self { history }
    }

    /// The board the next move is played on
    pub fn current(&self) -> BoardState {
        self.history.last().copied().unwrap_or_default()
    }

    pub fn history(&self) -> &[BoardState] {
        &self.history
    }

    /// Number of moves played so far
    pub fn plies(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub(crate) fn push(&mut self, state: BoardState) {
        self.history.push(state);
    }

    /// Swap the last board for its line-marked terminal version
    pub(crate) fn replace_last(&mut self, state: BoardState) {
        if let Some(last) = self.history.last_mut() {
            *last = state;
        }
    }

    /// Hand the history over and start again from the empty board
    pub(crate) fn take_history(&mut self) -> Vec<BoardState> {
        std::mem::replace(self, Episode::new()).history
    }
}

impl Default for Episode {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished game after its TD(λ) update has been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedEpisode {
    pub history: Vec<BoardState>,
    pub outcome: GameOutcome,
}

impl CompletedEpisode {
    /// The terminal board, with the winning line marked on a win
    pub fn terminal_state(&self) -> BoardState {
        self.history.last().copied().unwrap_or_default()
    }

    /// Number of moves in the game
    pub fn plies(&self) -> usize {
        self.history.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_episode_starts_on_empty_board() {
        let episode = Episode::new();
        assert_eq!(episode.history(), &[BoardState::new()]);
        assert_eq!(episode.current(), BoardState::new());
        assert_eq!(episode.plies(), 0);
    }

    #[test]
    fn test_take_history_restarts() {
        let mut episode = Episode::new();
        let next = BoardState::new().make_move(4).unwrap();
        episode.push(next);
        assert_eq!(episode.current(), next);

        let taken = episode.take_history();
        assert_eq!(taken.len(), 2);
        assert_eq!(episode, Episode::new());
    }

    #[test]
    fn test_replace_last() {
        let mut episode = Episode::new();
        episode.push(BoardState::from_key("XXX00----").unwrap());
        episode.replace_last(BoardState::from_key("WWW00----").unwrap());
        assert_eq!(episode.current().key(), "WWW00----");
        assert_eq!(episode.plies(), 1);
    }
}
