//! Game-level results and player roles

use serde::{Deserialize, Serialize};

use super::{
    board::{BoardState, Player},
    terminal::{Outcome, TerminalEvaluation},
};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Interpret a terminal evaluation. Returns `None` while the game is on.
    ///
    /// The winner is the player who made the last move, which the marked
    /// board still encodes through its ply count.
    pub fn from_evaluation(evaluation: &TerminalEvaluation) -> Option<Self> {
        match evaluation.outcome {
            Outcome::Win => Some(GameOutcome::Win(last_mover(&evaluation.state))),
            Outcome::Tie => Some(GameOutcome::Draw),
            Outcome::Ongoing => None,
        }
    }
}

fn last_mover(state: &BoardState) -> Player {
    state.to_move().opponent()
}

/// Who controls a symbol in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Human,
    Agent,
}

/// A symbol bound to a role for the length of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Participant {
    pub symbol: Player,
    pub role: Role,
}

impl Participant {
    pub fn new(symbol: Player, role: Role) -> Self {
        Self { symbol, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::evaluate_terminal;

    #[test]
    fn test_winner_is_last_mover() {
        // X moved last (5 plies)
        let board = BoardState::from_key("XXX00----").unwrap();
        let outcome = GameOutcome::from_evaluation(&evaluate_terminal(&board));
        assert_eq!(outcome, Some(GameOutcome::Win(Player::X)));

        // 0 moved last (6 plies)
        let board = BoardState::from_key("XX-000X--").unwrap();
        let outcome = GameOutcome::from_evaluation(&evaluate_terminal(&board));
        assert_eq!(outcome, Some(GameOutcome::Win(Player::O)));
    }

    #[test]
    fn test_draw_and_ongoing() {
        let full = BoardState::from_key("X0X0X00X0").unwrap();
        assert_eq!(
            GameOutcome::from_evaluation(&evaluate_terminal(&full)),
            Some(GameOutcome::Draw)
        );

        let open = BoardState::from_key("X--------").unwrap();
        assert_eq!(GameOutcome::from_evaluation(&evaluate_terminal(&open)), None);
    }
}
