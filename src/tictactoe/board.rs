//! Board state representation and the state-key codec

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
///
/// `Winner` only appears on terminal states, where it overwrites the three
/// cells of the completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
    Winner,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => '0',
            Cell::Winner => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            '0' | 'O' | 'o' => Some(Cell::O),
            'W' | 'w' => Some(Cell::Winner),
            _ => None,
        }
    }

    /// Whether the cell holds any mark (a player symbol or the winner marker)
    pub fn is_occupied(self) -> bool {
        self != Cell::Empty
    }
}

/// A player symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().to_char()
    }
}

/// A complete board configuration.
///
/// The player to move is never stored: it is derived from the ply count,
/// with X moving on even counts. Two boards with the same cells are the same
/// key in the value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
}

impl BoardState {
    /// Create a new empty board
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Parse a board from its 9-character key.
    ///
    /// Accepts `-`/`.` for empty cells, `X`, `0`/`O` and `W`.
    ///
    /// # Errors
    ///
    /// Returns error if the key does not hold exactly 9 characters or any
    /// character is not a valid cell symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use ttt_td::tictactoe::{BoardState, Cell};
    ///
    /// let board = BoardState::from_key("X0-------").unwrap();
    /// assert_eq!(board.cells[1], Cell::O);
    /// assert_eq!(board.key(), "X0-------");
    /// ```
    pub fn from_key(key: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = key.trim().chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidKeyLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: key.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: key.to_string(),
            })?;
        }

        Ok(BoardState { cells })
    }

    /// The 9-character key used by the value table and the persisted file
    pub fn key(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Number of non-empty cells
    pub fn ply_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// The player whose symbol the next move places
    pub fn to_move(&self) -> Player {
        if self.ply_count().is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Whether any cell carries the winner marker
    pub fn has_winner_marker(&self) -> bool {
        self.cells.contains(&Cell::Winner)
    }

    /// Get all empty positions
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place the mover's symbol on an empty cell and return the new board
    #[must_use = "make_move returns a new board state; this one is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        if pos >= CELL_COUNT || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = self.to_move().to_cell();
        Ok(next)
    }

    /// Every board reachable with one move, in cell order.
    ///
    /// Empty only when the board is full.
    pub fn legal_successors(&self) -> Vec<BoardState> {
        let piece = self.to_move().to_cell();
        self.empty_positions()
            .into_iter()
            .map(|pos| {
                let mut next = *self;
                next.cells[pos] = piece;
                next
            })
            .collect()
    }

    /// Find the position where two board states differ (for inferring moves)
    pub fn find_changed_position(&self, other: &BoardState) -> Option<usize> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .position(|(a, b)| a != b)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
