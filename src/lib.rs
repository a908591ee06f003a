//! Self-play TD(λ) Tic-Tac-Toe
//!
//! This crate provides:
//! - Tic-Tac-Toe boards with a 9-character state key and terminal detection
//!   that marks the winning line
//! - A tabular TD(λ) learner shared by both players, trained by self-play
//! - Human-versus-agent matches that keep updating the table
//! - Value-table persistence (CSV, MessagePack, in-memory)
//! - A training pipeline with pluggable observers and a `ttt-td` CLI

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod td_lambda;
pub mod tictactoe;

pub use error::{Error, Result};
pub use session::{MatchResult, MatchSession, TurnReport};
pub use td_lambda::{TdConfig, Trainer, ValueStore};
pub use tictactoe::{BoardState, Cell, Player};
