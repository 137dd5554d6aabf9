//! Behavioural tests for the game engine.

use tictactoe_engine::{
    GameEngine, GameStatus, Mark, Mode, MoveError, Position, RandomOpponent, Square, rules,
};

fn play(engine: &mut GameEngine, moves: &[usize]) {
    for &index in moves {
        engine.place_mark(index).expect("legal move");
    }
}

fn empty_indices(engine: &GameEngine) -> Vec<usize> {
    engine
        .open_positions()
        .into_iter()
        .map(Position::to_index)
        .collect()
}

#[test]
fn test_top_row_win_scenario() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 4, 1, 5]);

    let placement = engine.place_mark(2).expect("winning move");
    assert!(placement.ended());

    match engine.status() {
        GameStatus::Won { winner, line } => {
            assert_eq!(winner, Mark::X);
            assert_eq!(line.indices(), [0, 1, 2]);
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert_eq!(empty_indices(&engine), vec![3, 6, 7, 8]);
    // No switch after a terminal move.
    assert_eq!(engine.current_player(), Mark::X);
}

#[test]
fn test_draw_scenario() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 1, 2, 3, 4, 8, 5, 6]);
    assert_eq!(engine.status(), GameStatus::InProgress);

    let placement = engine.place_mark(7).expect("last move");
    assert!(placement.ended());
    assert_eq!(engine.status(), GameStatus::Draw);
    assert!(engine.open_positions().is_empty());
}

#[test]
fn test_middle_row_completes_before_board_fills() {
    // X@0 O@1 X@3 O@2 X@4 O@6 X@5 gives X the middle row on its fourth move,
    // so the remaining O@7 and X@8 are refused.
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 1, 3, 2, 4, 6]);

    let placement = engine.place_mark(5).expect("winning move");
    assert!(placement.ended());
    assert_eq!(engine.status().winner(), Some(Mark::X));
    assert_eq!(engine.status().winning_line().map(|l| l.indices()), Some([3, 4, 5]));
    assert_eq!(engine.place_mark(7), Err(MoveError::GameOver));
    assert_eq!(engine.place_mark(8), Err(MoveError::GameOver));
}

#[test]
fn test_evaluate_reports_first_row() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 3, 1, 4, 2]);
    assert_eq!(
        rules::evaluate(engine.board()).winning_line().map(|l| l.indices()),
        Some([0, 1, 2])
    );
}

#[test]
fn test_occupied_square_is_rejected() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[4]);
    let before = engine.snapshot();

    assert_eq!(
        engine.place_mark(4),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_out_of_range_is_rejected() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    let before = engine.snapshot();
    assert_eq!(engine.place_mark(9), Err(MoveError::OutOfRange(9)));
    assert_eq!(engine.place_mark(usize::MAX), Err(MoveError::OutOfRange(usize::MAX)));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_no_moves_after_game_over() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 4, 1, 5, 2]);
    let before = engine.snapshot();

    for index in [3, 6, 7, 8] {
        assert_eq!(engine.place_mark(index), Err(MoveError::GameOver));
    }
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_new_game_resets_from_any_state() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 4, 1, 5, 2]);
    engine.new_game(Mode::PlayerVsPlayer);
    assert_fresh(&engine, Mode::PlayerVsPlayer);

    play(&mut engine, &[4, 0]);
    engine.new_game(Mode::PlayerVsComputer);
    assert_fresh(&engine, Mode::PlayerVsComputer);

    engine.new_game(Mode::PlayerVsComputer);
    assert_fresh(&engine, Mode::PlayerVsComputer);
}

fn assert_fresh(engine: &GameEngine, mode: Mode) {
    assert!(engine.board().squares().iter().all(|s| *s == Square::Empty));
    assert_eq!(engine.current_player(), Mark::X);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.mode(), mode);
    assert!(engine.history().is_empty());
    assert!(!engine.is_awaiting_computer());
}

#[test]
fn test_set_mode_restarts_mid_game() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[4, 0, 8]);
    engine.set_mode(Mode::PlayerVsComputer);
    assert_fresh(&engine, Mode::PlayerVsComputer);
}

#[test]
fn test_computer_reply_takes_one_open_square() {
    for seed in 0..25 {
        let mut engine =
            GameEngine::with_opponent(Mode::PlayerVsComputer, RandomOpponent::with_seed(seed));
        let placement = engine.place_mark(4).expect("human move");
        assert!(!placement.ended());
        let open_before = empty_indices(&engine);

        let reply = engine.request_computer_move().expect("computer move");
        assert_eq!(reply.mark(), Mark::O);
        assert!(open_before.contains(&reply.position().to_index()));
        assert_eq!(engine.board().count(Mark::O), 1);
        assert_eq!(engine.board().count(Mark::X), 1);
        assert_eq!(engine.current_player(), Mark::X);
    }
}

#[test]
fn test_computer_does_nothing_after_game_over() {
    let mut engine =
        GameEngine::with_opponent(Mode::PlayerVsComputer, RandomOpponent::with_seed(9));
    // Drive to a terminal state through the public API.
    while !engine.status().is_terminal() {
        let index = engine.open_positions()[0].to_index();
        let placement = engine.place_mark(index).expect("human move");
        if !placement.ended() {
            engine.request_computer_move().expect("computer move");
        }
    }
    let before = engine.snapshot();
    assert_eq!(engine.request_computer_move(), Err(MoveError::GameOver));
    assert_eq!(engine.schedule_computer_move(), None);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_mark_counts_stay_balanced() {
    for seed in 0..50 {
        let mut engine =
            GameEngine::with_opponent(Mode::PlayerVsComputer, RandomOpponent::with_seed(seed));
        let mut human = RandomOpponent::with_seed(seed + 1000);
        while !engine.status().is_terminal() {
            let pos = human.pick(engine.board()).expect("open square");
            engine.place_mark(pos.to_index()).expect("human move");
            let (x, o) = (engine.board().count(Mark::X), engine.board().count(Mark::O));
            assert!(x == o || x == o + 1, "x={x} o={o}");

            if let Some(ticket) = engine.schedule_computer_move() {
                engine.resolve_computer_move(ticket).expect("computer move");
                let (x, o) = (engine.board().count(Mark::X), engine.board().count(Mark::O));
                assert!(x == o || x == o + 1, "x={x} o={o}");
            }
        }
    }
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
    play(&mut engine, &[0, 4, 1, 5, 2]);

    let json = serde_json::to_value(engine.snapshot()).expect("serializable");
    assert_eq!(json["board"][0], "X");
    assert!(json["board"][3].is_null());
    assert_eq!(json["mode"], "player-vs-player");
    assert_eq!(json["winning_line"], serde_json::json!([0, 1, 2]));
    assert_eq!(json["awaiting_computer"], false);
    assert_eq!(json["history"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_mode_parses_short_and_long_names() {
    assert_eq!("pvp".parse::<Mode>().ok(), Some(Mode::PlayerVsPlayer));
    assert_eq!("PVC".parse::<Mode>().ok(), Some(Mode::PlayerVsComputer));
    assert_eq!(
        "player-vs-computer".parse::<Mode>().ok(),
        Some(Mode::PlayerVsComputer)
    );
    assert!("solo".parse::<Mode>().is_err());
    assert_eq!(Mode::PlayerVsComputer.to_string(), "Player vs Computer");
}
