//! Random-move computer opponent.

use super::{Board, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Computer opponent that picks uniformly among the empty squares.
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// Creates an opponent seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic opponent.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks an empty square, or `None` if the board is full.
    #[instrument(skip(self, board))]
    pub fn pick(&mut self, board: &Board) -> Option<Position> {
        let open = Position::valid_moves(board);
        if open.is_empty() {
            return None;
        }
        let pos = open[self.rng.random_range(0..open.len())];
        debug!(position = %pos, open = open.len(), "Computer chose position");
        Some(pos)
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Square};

    #[test]
    fn test_picks_only_empty_squares() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::Center, Position::BottomRight] {
            board.set(pos, Square::Occupied(Mark::X));
        }
        let mut opponent = RandomOpponent::new();
        for _ in 0..100 {
            let pos = opponent.pick(&board).expect("open squares remain");
            assert!(board.is_empty(pos), "{pos} is occupied");
        }
    }

    #[test]
    fn test_full_board_yields_nothing() {
        let mut board = Board::new();
        for pos in Position::ALL {
            board.set(pos, Square::Occupied(Mark::O));
        }
        assert_eq!(RandomOpponent::new().pick(&board), None);
    }

    #[test]
    fn test_single_open_square_is_forced() {
        let mut board = Board::new();
        for pos in Position::ALL {
            if pos != Position::MiddleRight {
                board.set(pos, Square::Occupied(Mark::X));
            }
        }
        assert_eq!(
            RandomOpponent::with_seed(7).pick(&board),
            Some(Position::MiddleRight)
        );
    }

    #[test]
    fn test_seeded_opponents_agree() {
        let board = Board::new();
        let mut a = RandomOpponent::with_seed(42);
        let mut b = RandomOpponent::with_seed(42);
        for _ in 0..20 {
            assert_eq!(a.pick(&board), b.pick(&board));
        }
    }

    #[test]
    fn test_every_open_square_is_reachable() {
        let board = Board::new();
        let mut opponent = RandomOpponent::with_seed(1);
        let mut seen = [false; 9];
        for _ in 0..500 {
            if let Some(pos) = opponent.pick(&board) {
                seen[pos.to_index()] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
