//! Winning line analysis for Tic-Tac-Toe

use super::Cell;

/// Winning line indices on the 3x3 board, in scan order: row i then
/// column i for each i, then the two diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [0, 3, 6],
    [3, 4, 5],
    [1, 4, 7],
    [6, 7, 8],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First line (in scan order) holding three identical non-empty symbols.
    ///
    /// A line already overwritten with the winner marker still counts, which
    /// keeps terminal evaluation idempotent.
    pub fn completed_line(cells: &[Cell; 9]) -> Option<[usize; 3]> {
        WINNING_LINES
            .iter()
            .copied()
            .find(|&[a, b, c]| {
                cells[a].is_occupied() && cells[a] == cells[b] && cells[b] == cells[c]
            })
    }
}
