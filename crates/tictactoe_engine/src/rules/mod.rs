//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The engine calls
//! [`evaluate`] after every placement; the pieces are public so they can be
//! tested and reused on their own.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::GameStatus;
use super::types::Board;
use tracing::instrument;

/// Derives the game status from a board.
///
/// The first complete line in scan order wins; otherwise a full board is a
/// draw; otherwise the game is still in progress.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some((winner, line)) = check_winner(board) {
        return GameStatus::Won { winner, line };
    }
    if is_full(board) {
        return GameStatus::Draw;
    }
    GameStatus::InProgress
}
