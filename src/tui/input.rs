//! Keyboard input mapping.

use crossterm::event::KeyCode;
use tictactoe_engine::{Mode, Position};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the application.
    Quit,
    /// Start over in the current mode.
    Restart,
    /// Switch to the given mode (restarts).
    SelectMode(Mode),
    /// Switch to the other mode (restarts).
    ToggleMode,
    /// Move the cursor with an arrow key.
    MoveCursor(KeyCode),
    /// Place a mark under the cursor.
    PlaceAtCursor,
    /// Place a mark at a keypad position (1-9).
    Place(Position),
}

/// Maps a key to a command.
pub fn command_for(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('p') => Some(Command::SelectMode(Mode::PlayerVsPlayer)),
        KeyCode::Char('c') => Some(Command::SelectMode(Mode::PlayerVsComputer)),
        KeyCode::Tab => Some(Command::ToggleMode),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::PlaceAtCursor),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Command::MoveCursor(key))
        }
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|d| (1..=9).contains(d))
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(Command::Place),
        _ => None,
    }
}

/// Moves cursor based on arrow keys. Edges do not wrap.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };
    target
        .and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}
