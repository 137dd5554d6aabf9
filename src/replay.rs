//! Headless replay of a move list.
//!
//! Feeds cell indices through a fresh engine the same way the terminal UI
//! would, answering each human move immediately when the computer is due.

use crate::status::status_message;
use derive_more::{Display, Error};
use serde::Serialize;
use tictactoe_engine::{GameEngine, GameSnapshot, MoveError};
use tracing::{debug, info, instrument, warn};

/// A move list could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid move '{}': expected a cell index 0-8", token)]
pub struct ParseMovesError {
    /// The offending token.
    pub token: String,
}

/// Parses `"0,4,1"` (commas and/or whitespace) into cell indices.
///
/// Indices outside 0-8 parse fine; the engine rejects them.
pub fn parse_moves(input: &str) -> Result<Vec<usize>, ParseMovesError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<usize>().map_err(|_| ParseMovesError {
                token: token.to_string(),
            })
        })
        .collect()
}

/// A move the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedMove {
    /// Requested cell index.
    pub index: usize,
    /// Why it was refused.
    pub reason: String,
}

impl RejectedMove {
    fn new(index: usize, error: MoveError) -> Self {
        Self {
            index,
            reason: error.to_string(),
        }
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Final engine state.
    pub snapshot: GameSnapshot,
    /// Moves that were skipped.
    pub rejected: Vec<RejectedMove>,
}

impl ReplayReport {
    /// Plain-text rendering: board, then status.
    pub fn render(&self, engine: &GameEngine) -> String {
        let mut out = engine.board().display();
        out.push_str("\n\n");
        out.push_str(&status_message(engine));
        if let Some(line) = engine.status().winning_line() {
            out.push_str(&format!(" (line {:?})", line.indices()));
        }
        for rejected in &self.rejected {
            out.push_str(&format!("\nskipped {}: {}", rejected.index, rejected.reason));
        }
        out
    }
}

/// Plays `moves` on `engine` as human input.
///
/// Rejected moves are recorded and skipped. In player-vs-computer mode the
/// computer replies straight after each accepted human move.
#[instrument(skip(engine, moves), fields(mode = %engine.mode(), moves = moves.len()))]
pub fn replay(engine: &mut GameEngine, moves: &[usize]) -> ReplayReport {
    let mut rejected = Vec::new();

    for &index in moves {
        match engine.place_mark(index) {
            Ok(placement) => {
                debug!(action = %placement.action(), "Replayed move");
                if let Some(ticket) = engine.schedule_computer_move() {
                    match engine.resolve_computer_move(ticket) {
                        Ok(reply) => debug!(action = %reply.action(), "Computer replied"),
                        Err(e) => warn!(error = %e, "Computer reply failed"),
                    }
                }
            }
            Err(e) => rejected.push(RejectedMove::new(index, e)),
        }
    }

    info!(status = %engine.status(), rejected = rejected.len(), "Replay finished");
    ReplayReport {
        snapshot: engine.snapshot(),
        rejected,
    }
}
