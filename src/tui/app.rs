//! Application state and logic.

use super::input::{Command, command_for, move_cursor};
use crate::status::status_message;
use crossterm::event::KeyCode;
use tictactoe_engine::{ComputerTicket, GameEngine, Mode, Position};
use tracing::{debug, info};

/// Main application state.
///
/// Owns the engine; every gesture goes through [`App::handle_key`] and every
/// deferred computer move through [`App::handle_computer_move`].
pub struct App {
    engine: GameEngine,
    cursor: Position,
    should_quit: bool,
}

impl App {
    /// Creates a new application around an engine.
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            cursor: Position::Center,
            should_quit: false,
        }
    }

    /// Gets the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Gets the highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Status line for the current state.
    pub fn status_message(&self) -> String {
        status_message(&self.engine)
    }

    /// Handles a key press.
    ///
    /// Returns a ticket when the key produced a human move that leaves the
    /// computer to reply; the caller schedules it.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<ComputerTicket> {
        let command = command_for(key)?;
        debug!(?command, "Handling command");

        match command {
            Command::Quit => {
                info!("User quit");
                self.should_quit = true;
                None
            }
            Command::Restart => {
                self.engine.restart();
                None
            }
            Command::SelectMode(mode) => {
                self.select_mode(mode);
                None
            }
            Command::ToggleMode => {
                self.select_mode(self.engine.mode().toggled());
                None
            }
            Command::MoveCursor(key) => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
            Command::PlaceAtCursor => self.place(self.cursor),
            Command::Place(pos) => {
                self.cursor = pos;
                self.place(pos)
            }
        }
    }

    /// Resolves a deferred computer move. Stale or unneeded tickets are ignored.
    pub fn handle_computer_move(&mut self, ticket: ComputerTicket) {
        match self.engine.resolve_computer_move(ticket) {
            Ok(placement) => {
                debug!(action = %placement.action(), "Computer moved");
            }
            Err(e) => {
                debug!(error = %e, "Computer move dropped");
            }
        }
    }

    fn select_mode(&mut self, mode: Mode) {
        info!(%mode, "Mode selected");
        self.engine.set_mode(mode);
    }

    fn place(&mut self, pos: Position) -> Option<ComputerTicket> {
        match self.engine.place_mark(pos.to_index()) {
            Ok(placement) if placement.ended() => None,
            Ok(_) => self.engine.schedule_computer_move(),
            Err(e) => {
                debug!(error = %e, position = %pos, "Input ignored");
                None
            }
        }
    }
}
