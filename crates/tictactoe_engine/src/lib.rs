//! Tic-tac-toe game engine.
//!
//! A headless state machine over a 3x3 board with two modes: two humans
//! taking turns, or a human (X) against a computer (O) that picks a random
//! empty square.
//!
//! # Architecture
//!
//! - **Types**: board, marks, modes, status and winning lines
//! - **Rules**: pure win/draw evaluation
//! - **Engine**: the [`GameEngine`] state machine, including the deferred
//!   computer move
//! - **Invariants**: properties checked after every placement in debug builds
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameStatus, Mark, Mode};
//!
//! let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
//! for index in [0, 4, 1, 5, 2] {
//!     engine.place_mark(index).unwrap();
//! }
//! assert_eq!(engine.status().winner(), Some(Mark::X));
//! assert_eq!(engine.status().winning_line().unwrap().indices(), [0, 1, 2]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod opponent;
mod position;
mod snapshot;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{ComputerTicket, Move, MoveError, Placement};
pub use engine::{DEFAULT_COMPUTER_DELAY, GameEngine};
pub use opponent::RandomOpponent;
pub use position::Position;
pub use snapshot::GameSnapshot;
pub use types::{Board, GameStatus, Mark, Mode, Square, WinningLine};
