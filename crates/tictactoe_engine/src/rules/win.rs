//! Win detection logic for tic-tac-toe.

use super::super::types::{Board, Mark, Square, WinningLine};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Lines are scanned rows, then columns, then diagonals; the first complete
/// line is returned and scanning stops.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, WinningLine)> {
    for line in WinningLine::ALL {
        let [a, b, c] = line.positions();
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return sq.mark().map(|mark| (mark, line));
        }
    }

    None
}
