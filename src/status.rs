//! Status line text shown to players.

use tictactoe_engine::{GameEngine, GameStatus};

/// Describes whose turn it is, or how the game ended.
pub fn status_message(engine: &GameEngine) -> String {
    match engine.status() {
        GameStatus::InProgress if engine.is_computer_turn() => format!(
            "Player {}'s Turn (Computer is thinking...)",
            engine.current_player()
        ),
        GameStatus::InProgress => format!("Player {}'s Turn", engine.current_player()),
        GameStatus::Won { winner, .. } => format!("Player {} Wins!", winner),
        GameStatus::Draw => "Game Ended in a Draw!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::{Mode, RandomOpponent};

    #[test]
    fn test_turn_messages() {
        let mut engine =
            GameEngine::with_opponent(Mode::PlayerVsComputer, RandomOpponent::with_seed(5));
        assert_eq!(status_message(&engine), "Player X's Turn");

        engine.place_mark(4).unwrap();
        assert_eq!(
            status_message(&engine),
            "Player O's Turn (Computer is thinking...)"
        );
    }

    #[test]
    fn test_pvp_never_mentions_computer() {
        let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
        engine.place_mark(4).unwrap();
        assert_eq!(status_message(&engine), "Player O's Turn");
    }

    #[test]
    fn test_terminal_messages() {
        let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
        for index in [0, 4, 1, 5, 2] {
            engine.place_mark(index).unwrap();
        }
        assert_eq!(status_message(&engine), "Player X Wins!");

        engine.restart();
        for index in [0, 1, 2, 3, 4, 8, 5, 6, 7] {
            engine.place_mark(index).unwrap();
        }
        assert_eq!(status_message(&engine), "Game Ended in a Draw!");
    }
}
