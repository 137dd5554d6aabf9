//! The game engine: a state machine over a single board.
//!
//! ```text
//!   new_game ──> InProgress ──place_mark──> InProgress
//!                    │
//!                    └──place_mark──> Won | Draw ──new_game──> InProgress
//! ```
//!
//! In [`Mode::PlayerVsComputer`] the human's move is followed by a deferred
//! computer move. The engine hands out a [`ComputerTicket`] through
//! [`GameEngine::schedule_computer_move`]; the host waits out the ticket's
//! delay and passes it back to [`GameEngine::resolve_computer_move`], which
//! re-checks the live state before moving.

use super::action::{ComputerTicket, Move, MoveError, Placement};
use super::invariants::assert_invariants;
use super::opponent::RandomOpponent;
use super::rules;
use super::types::{Board, GameStatus, Mark, Mode, Square};
use super::Position;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Pause before the computer replies, so its move reads as a separate turn.
pub const DEFAULT_COMPUTER_DELAY: Duration = Duration::from_millis(750);

/// Tic-tac-toe game engine.
#[derive(Debug, Clone)]
pub struct GameEngine {
    pub(crate) board: Board,
    pub(crate) current_player: Mark,
    pub(crate) mode: Mode,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<Move>,
    awaiting_computer: bool,
    generation: u64,
    computer_delay: Duration,
    opponent: RandomOpponent,
}

impl GameEngine {
    /// Creates an engine with a fresh game in the given mode.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        Self::with_opponent(mode, RandomOpponent::new())
    }

    /// Creates an engine whose computer opponent uses the given generator.
    pub fn with_opponent(mode: Mode, opponent: RandomOpponent) -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            mode,
            status: GameStatus::InProgress,
            history: Vec::new(),
            awaiting_computer: false,
            generation: 0,
            computer_delay: DEFAULT_COMPUTER_DELAY,
            opponent,
        }
    }

    /// Sets the delay carried by computer tickets.
    pub fn with_computer_delay(mut self, delay: Duration) -> Self {
        self.computer_delay = delay;
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts a new game in the given mode, abandoning any game in progress.
    ///
    /// Tickets issued before the reset become stale.
    #[instrument(skip(self), fields(previous = ?self.status))]
    pub fn new_game(&mut self, mode: Mode) {
        self.board = Board::new();
        self.current_player = Mark::X;
        self.mode = mode;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.awaiting_computer = false;
        self.generation = self.generation.wrapping_add(1);
        info!(%mode, generation = self.generation, "New game");
    }

    /// Restarts in the current mode.
    pub fn restart(&mut self) {
        self.new_game(self.mode);
    }

    /// Switches mode. Always restarts the game.
    pub fn set_mode(&mut self, mode: Mode) {
        self.new_game(mode);
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Places the current player's mark at `index` (0-8).
    ///
    /// Only human turns are accepted here; the computer moves through
    /// [`request_computer_move`](Self::request_computer_move). A rejected
    /// move leaves the engine untouched.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfRange`] if `index` is not a board cell
    /// - [`MoveError::GameOver`] if the game is won or drawn
    /// - [`MoveError::NotYourTurn`] if the computer is to move
    /// - [`MoveError::SquareOccupied`] if the cell is taken
    #[instrument(skip(self), fields(player = %self.current_player, mode = %self.mode))]
    pub fn place_mark(&mut self, index: usize) -> Result<Placement, MoveError> {
        let result = self.check_human_move(index);
        match result {
            Ok(pos) => Ok(self.apply(pos)),
            Err(e) => {
                debug!(error = %e, "Move rejected");
                Err(e)
            }
        }
    }

    fn check_human_move(&self, index: usize) -> Result<Position, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.mode.is_human(self.current_player) {
            return Err(MoveError::NotYourTurn(self.current_player));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        Ok(pos)
    }

    /// Places a computer mark on a random empty square, immediately.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game is won or drawn
    /// - [`MoveError::NotComputerTurn`] outside player-vs-computer or on the
    ///   human's turn
    /// - [`MoveError::NoOpenSquares`] if the board is full
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn request_computer_move(&mut self) -> Result<Placement, MoveError> {
        if self.status.is_terminal() {
            debug!("Computer move skipped: game over");
            return Err(MoveError::GameOver);
        }
        if !self.is_computer_turn() {
            debug!(player = %self.current_player, "Computer move skipped: not its turn");
            return Err(MoveError::NotComputerTurn);
        }
        let pos = self
            .opponent
            .pick(&self.board)
            .ok_or(MoveError::NoOpenSquares)?;
        self.awaiting_computer = false;
        Ok(self.apply(pos))
    }

    /// Issues a ticket for the computer's reply if the computer is due.
    ///
    /// At most one ticket is outstanding per turn: while one is pending this
    /// returns `None`. [`is_awaiting_computer`](Self::is_awaiting_computer)
    /// reports true until it is resolved so the host can gate input.
    #[instrument(skip(self))]
    pub fn schedule_computer_move(&mut self) -> Option<ComputerTicket> {
        if self.awaiting_computer || self.status.is_terminal() || !self.is_computer_turn() {
            return None;
        }
        self.awaiting_computer = true;
        let turn = self.history.len();
        let ticket = ComputerTicket::new(self.generation, turn, self.computer_delay);
        debug!(
            generation = self.generation,
            turn,
            delay_ms = self.computer_delay.as_millis() as u64,
            "Computer move scheduled"
        );
        Some(ticket)
    }

    /// Fires a deferred computer move.
    ///
    /// The ticket must belong to the current game and turn, and the computer
    /// must still be due to move in the state as it is now.
    ///
    /// # Errors
    ///
    /// [`MoveError::StaleTicket`] if the game was reset or a move was made
    /// since the ticket was issued, otherwise the errors of
    /// [`request_computer_move`](Self::request_computer_move).
    #[instrument(
        skip(self, ticket),
        fields(ticket = ticket.generation(), turn = ticket.turn(), current = self.generation)
    )]
    pub fn resolve_computer_move(
        &mut self,
        ticket: ComputerTicket,
    ) -> Result<Placement, MoveError> {
        if ticket.generation() != self.generation {
            debug!("Discarding computer move from an earlier game");
            return Err(MoveError::StaleTicket);
        }
        if ticket.turn() != self.history.len() {
            debug!(moves = self.history.len(), "Discarding computer move from an earlier turn");
            return Err(MoveError::StaleTicket);
        }
        self.awaiting_computer = false;
        self.request_computer_move()
    }

    fn apply(&mut self, pos: Position) -> Placement {
        let mark = self.current_player;
        self.board.set(pos, Square::Occupied(mark));
        self.history.push(Move::new(mark, pos));
        self.status = rules::evaluate(&self.board);

        if self.status.is_terminal() {
            info!(status = %self.status, moves = self.history.len(), "Game over");
        } else {
            self.current_player = mark.opponent();
        }

        assert_invariants(self);
        debug!(%mark, position = %pos, "Mark placed");
        Placement::new(Move::new(mark, pos), self.status)
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move (or, once terminal, the mark that moved last).
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True while a computer ticket is outstanding.
    pub fn is_awaiting_computer(&self) -> bool {
        self.awaiting_computer
    }

    /// Counter bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Delay carried by computer tickets.
    pub fn computer_delay(&self) -> Duration {
        self.computer_delay
    }

    /// True if the mark to move belongs to the computer.
    pub fn is_computer_turn(&self) -> bool {
        self.mode.computer_mark() == Some(self.current_player)
    }

    /// True if a human may place a mark right now.
    pub fn accepts_input(&self) -> bool {
        !self.status.is_terminal() && !self.is_computer_turn()
    }

    /// Returns the empty squares.
    pub fn open_positions(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
