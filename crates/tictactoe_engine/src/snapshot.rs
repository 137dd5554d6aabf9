//! Serializable view of the engine for presentation layers.

use super::{GameEngine, GameStatus, Mark, Mode, Move, Square};
use serde::Serialize;

/// Everything a presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Cells in row-major order; `None` is empty.
    pub board: [Option<Mark>; 9],
    /// Mark to move.
    pub current_player: Mark,
    /// Active mode.
    pub mode: Mode,
    /// Game status.
    pub status: GameStatus,
    /// Indices of the winning line, when won.
    pub winning_line: Option<[usize; 3]>,
    /// True while the computer's reply is pending.
    pub awaiting_computer: bool,
    /// Moves played so far.
    pub history: Vec<Move>,
}

impl From<&GameEngine> for GameSnapshot {
    fn from(engine: &GameEngine) -> Self {
        let squares = *engine.board().squares();
        Self {
            board: squares.map(Square::mark),
            current_player: engine.current_player(),
            mode: engine.mode(),
            status: engine.status(),
            winning_line: engine.status().winning_line().map(|line| line.indices()),
            awaiting_computer: engine.is_awaiting_computer(),
            history: engine.history().to_vec(),
        }
    }
}

impl GameEngine {
    /// Captures the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}
