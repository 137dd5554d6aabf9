//! Tests for key handling and the deferred computer move.

use crossterm::event::KeyCode;
use std::time::Duration;
use tictactoe::tui::{App, AppEvent, Orchestrator};
use tictactoe_engine::{GameEngine, Mark, Mode, Position, RandomOpponent, Square};
use tokio::time::Instant;

fn pvc_app(seed: u64) -> App {
    App::new(GameEngine::with_opponent(
        Mode::PlayerVsComputer,
        RandomOpponent::with_seed(seed),
    ))
}

#[test]
fn test_keypad_places_and_moves_cursor() {
    let mut app = App::new(GameEngine::new(Mode::PlayerVsPlayer));
    assert!(app.handle_key(KeyCode::Char('1')).is_none());
    assert_eq!(app.cursor(), Position::TopLeft);
    assert_eq!(app.engine().board().get(Position::TopLeft), Square::Occupied(Mark::X));
}

#[test]
fn test_arrows_and_enter() {
    let mut app = App::new(GameEngine::new(Mode::PlayerVsPlayer));
    app.handle_key(KeyCode::Up);
    app.handle_key(KeyCode::Right);
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.engine().board().get(Position::TopRight), Square::Occupied(Mark::X));
    assert_eq!(app.engine().current_player(), Mark::O);
}

#[test]
fn test_mode_keys_restart_game() {
    let mut app = App::new(GameEngine::new(Mode::PlayerVsPlayer));
    app.handle_key(KeyCode::Char('5'));
    app.handle_key(KeyCode::Char('c'));
    assert_eq!(app.engine().mode(), Mode::PlayerVsComputer);
    assert!(app.engine().history().is_empty());

    app.handle_key(KeyCode::Tab);
    assert_eq!(app.engine().mode(), Mode::PlayerVsPlayer);
}

#[test]
fn test_quit_keys() {
    let mut app = App::new(GameEngine::new(Mode::PlayerVsPlayer));
    app.handle_key(KeyCode::Esc);
    assert!(app.should_quit());
}

#[test]
fn test_human_move_in_pvc_returns_ticket() {
    let mut app = pvc_app(1);
    let ticket = app.handle_key(KeyCode::Char('5')).unwrap();
    assert_eq!(ticket.delay(), Duration::from_millis(750));
    assert!(app.engine().is_awaiting_computer());
    assert_eq!(app.status_message(), "Player O's Turn (Computer is thinking...)");

    // Board is gated while the computer thinks.
    assert!(app.handle_key(KeyCode::Char('1')).is_none());
    assert_eq!(app.engine().history().len(), 1);

    app.handle_computer_move(ticket);
    assert_eq!(app.engine().history().len(), 2);
    assert_eq!(app.status_message(), "Player X's Turn");
}

/// Plays the lowest open cell each human turn, answering the computer at
/// once. Returns the ticket produced by the human move that ended the game,
/// or `None` if the computer made the final move.
fn play_out(app: &mut App) -> Option<Option<tictactoe_engine::ComputerTicket>> {
    while !app.engine().status().is_terminal() {
        let cell = app.engine().open_positions()[0].to_index();
        let key = KeyCode::Char(char::from_digit(cell as u32 + 1, 10).unwrap());
        let ticket = app.handle_key(key);
        if app.engine().status().is_terminal() {
            return Some(ticket);
        }
        app.handle_computer_move(ticket.expect("computer due after a non-final move"));
    }
    None
}

#[test]
fn test_game_ending_human_move_schedules_nothing() {
    let mut human_finished = 0;
    for seed in 0..30 {
        let mut app = pvc_app(seed);
        if let Some(ticket) = play_out(&mut app) {
            human_finished += 1;
            assert!(ticket.is_none(), "seed {seed}");
            assert!(!app.engine().is_awaiting_computer());
            assert!(!app.engine().accepts_input());
        }
    }
    assert!(human_finished > 0);
}

#[test]
fn test_human_win_in_pvc() {
    // X takes the left column while the computer is kept busy elsewhere.
    for seed in 0..30 {
        let mut app = pvc_app(seed);
        let mut ticket = None;
        for cell in [0, 3, 6] {
            if !app.engine().board().is_empty(Position::from_index(cell).unwrap()) {
                break;
            }
            ticket = app.handle_key(KeyCode::Char(char::from_digit(cell as u32 + 1, 10).unwrap()));
            if app.engine().status().is_terminal() {
                break;
            }
            app.handle_computer_move(ticket.unwrap());
        }
        if app.engine().status().winner() == Some(Mark::X) {
            assert!(ticket.is_none(), "seed {seed}");
            assert_eq!(app.status_message(), "Player X Wins!");
            return;
        }
    }
    panic!("no seed let X complete the left column");
}

#[tokio::test(start_paused = true)]
async fn test_computer_moves_after_delay() {
    let mut orchestrator = Orchestrator::new(pvc_app(3));
    let tx = orchestrator.sender();

    tx.send(AppEvent::Key(KeyCode::Char('5'))).unwrap();
    let start = Instant::now();
    assert!(orchestrator.next().await);
    assert_eq!(orchestrator.app().engine().history().len(), 1);

    assert!(orchestrator.next().await);
    assert!(start.elapsed() >= Duration::from_millis(750));
    let engine = orchestrator.app().engine();
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.history()[1].mark, Mark::O);
    assert!(!engine.is_awaiting_computer());
}

#[tokio::test(start_paused = true)]
async fn test_restart_during_delay_discards_computer_move() {
    let mut orchestrator = Orchestrator::new(pvc_app(3));
    let tx = orchestrator.sender();

    tx.send(AppEvent::Key(KeyCode::Char('5'))).unwrap();
    assert!(orchestrator.next().await);
    tx.send(AppEvent::Key(KeyCode::Char('r'))).unwrap();
    assert!(orchestrator.next().await);

    // The stale ticket still fires but must not touch the new game.
    assert!(orchestrator.next().await);
    let engine = orchestrator.app().engine();
    assert!(engine.history().is_empty());
    assert_eq!(engine.current_player(), Mark::X);
    assert!(engine.accepts_input());
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_loop() {
    let mut orchestrator = Orchestrator::new(App::new(GameEngine::new(Mode::PlayerVsPlayer)));
    orchestrator.sender().send(AppEvent::Key(KeyCode::Char('q'))).unwrap();
    assert!(!orchestrator.next().await);
}
