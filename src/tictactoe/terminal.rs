//! Terminal-state detection and winning-line marking

use serde::{Deserialize, Serialize};

use super::{BoardState, Cell, LineAnalyzer};

/// Result of scanning a board for the end of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Tie,
    Ongoing,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// Outcome of a terminal scan together with the (possibly marked) board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalEvaluation {
    pub outcome: Outcome,
    /// The scanned board, with the winning line overwritten by
    /// [`Cell::Winner`] when `outcome` is [`Outcome::Win`]
    pub state: BoardState,
}

impl TerminalEvaluation {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}

/// Scan rows, columns and diagonals of `state`.
///
/// The first completed line is overwritten with the winner marker. A full
/// board without a line is a tie and comes back unchanged. Evaluating an
/// already-marked board returns the same win and the same board.
///
/// # Examples
///
/// ```
/// use ttt_td::tictactoe::{BoardState, Outcome, evaluate_terminal};
///
/// let board = BoardState::from_key("XXX00----").unwrap();
/// let evaluation = evaluate_terminal(&board);
/// assert_eq!(evaluation.outcome, Outcome::Win);
/// assert_eq!(evaluation.state.key(), "WWW00----");
/// ```
pub fn evaluate_terminal(state: &BoardState) -> TerminalEvaluation {
    if let Some(line) = LineAnalyzer::completed_line(&state.cells) {
        let mut marked = *state;
        for idx in line {
            marked.cells[idx] = Cell::Winner;
        }
        return TerminalEvaluation {
            outcome: Outcome::Win,
            state: marked,
        };
    }

    let outcome = if state.is_full() {
        Outcome::Tie
    } else {
        Outcome::Ongoing
    };

    TerminalEvaluation {
        outcome,
        state: *state,
    }
}
