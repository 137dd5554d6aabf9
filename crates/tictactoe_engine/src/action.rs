//! Moves, placement results and rejection reasons.
//!
//! A rejected move never changes the game. The error only tells the caller
//! why nothing happened.

use super::{GameStatus, Mark, Position};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// The position where the mark was placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// The result of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    action: Move,
    status: GameStatus,
}

impl Placement {
    pub(crate) fn new(action: Move, status: GameStatus) -> Self {
        Self { action, status }
    }

    /// The move that was applied.
    pub fn action(&self) -> Move {
        self.action
    }

    /// The mark that was placed.
    pub fn mark(&self) -> Mark {
        self.action.mark
    }

    /// Where the mark was placed.
    pub fn position(&self) -> Position {
        self.action.position
    }

    /// Game status after the placement.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if this placement ended the game (won or drawn).
    pub fn ended(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A deferred computer move, issued when the computer becomes due to play.
///
/// The ticket is bound to the game and the turn it was issued in. Resolving
/// it after a restart, a mode change or a later move does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputerTicket {
    generation: u64,
    turn: usize,
    delay: Duration,
}

impl ComputerTicket {
    pub(crate) fn new(generation: u64, turn: usize, delay: Duration) -> Self {
        Self {
            generation,
            turn,
            delay,
        }
    }

    /// The game generation this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of moves on the board when the ticket was issued.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// How long the host should wait before resolving the ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is not a board cell.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The mark to move belongs to the computer, not the human.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Mark),

    /// A computer move was requested when the computer is not due to play.
    #[display("The computer is not due to move")]
    NotComputerTurn,

    /// The ticket was issued for an earlier game.
    #[display("Computer move belongs to an earlier game")]
    StaleTicket,

    /// No empty squares remain.
    #[display("No open squares")]
    NoOpenSquares,
}

impl std::error::Error for MoveError {}
