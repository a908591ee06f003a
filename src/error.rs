//! Error types for the TD(λ) Tic-Tac-Toe crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is occupied or out of bounds")]
    InvalidMove { position: usize },

    #[error("no legal move: the board '{state}' is already full")]
    NoLegalMove { state: String },

    #[error("game already over")]
    GameOver,

    #[error("state key has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidKeyLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("episode history has no states")]
    EmptyEpisode,

    #[error("internal consistency error: state '{state}' is missing from the value table")]
    UnknownState { state: String },

    #[error("malformed table entry on row {row}: {reason}")]
    MalformedEntry { row: usize, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
