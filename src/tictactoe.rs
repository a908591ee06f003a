//! Tic-Tac-Toe board, state keys and terminal detection

pub mod board;
pub mod game;
pub mod lines;
pub mod terminal;

pub use board::{BoardState, CELL_COUNT, Cell, Player};
pub use game::{GameOutcome, Participant, Role};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use terminal::{Outcome, TerminalEvaluation, evaluate_terminal};
