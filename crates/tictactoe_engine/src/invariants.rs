//! Invariants of a running game.
//!
//! Each invariant is a small type implementing [`Invariant`]. Tuples of
//! invariants form an [`InvariantSet`] so they can be checked together.
//! The engine checks [`EngineInvariants`] after every accepted placement in
//! debug builds.

use super::{GameEngine, Mark, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// X has as many marks as O, or exactly one more.
pub struct BalancedMarks;

impl Invariant<GameEngine> for BalancedMarks {
    fn holds(engine: &GameEngine) -> bool {
        let x = engine.board().count(Mark::X);
        let o = engine.board().count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

/// History reads X, O, X, ... and the player to move follows from it.
///
/// After a terminal move the player who made it stays current.
pub struct AlternatingTurns;

impl Invariant<GameEngine> for AlternatingTurns {
    fn holds(engine: &GameEngine) -> bool {
        let history = engine.history();
        let alternates = history
            .iter()
            .enumerate()
            .all(|(i, m)| m.mark == if i % 2 == 0 { Mark::X } else { Mark::O });
        if !alternates {
            return false;
        }

        let expected = match history.last() {
            None => Mark::X,
            Some(last) if engine.status().is_terminal() => last.mark,
            Some(last) => last.mark.opponent(),
        };
        engine.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

/// Every occupied square was put there by exactly one move in the history.
pub struct HistoryMatchesBoard;

impl Invariant<GameEngine> for HistoryMatchesBoard {
    fn holds(engine: &GameEngine) -> bool {
        let mut replayed = [Square::Empty; 9];
        for m in engine.history() {
            let slot = &mut replayed[m.position.to_index()];
            if *slot != Square::Empty {
                return false;
            }
            *slot = Square::Occupied(m.mark);
        }
        &replayed == engine.board().squares()
    }

    fn description() -> &'static str {
        "Board matches the move history"
    }
}

/// All engine invariants as a composable set.
pub type EngineInvariants = (BalancedMarks, AlternatingTurns, HistoryMatchesBoard);

/// Panics in debug builds if any engine invariant is violated.
pub(crate) fn assert_invariants(engine: &GameEngine) {
    if cfg!(debug_assertions)
        && let Err(violations) = EngineInvariants::check_all(engine)
    {
        panic!("Engine invariants violated: {violations:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mode, Move, Position};

    #[test]
    fn test_fresh_engine_holds() {
        let engine = GameEngine::new(Mode::PlayerVsPlayer);
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_holds_after_moves() {
        let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
        for index in [4, 0, 8] {
            engine.place_mark(index).expect("legal move");
        }
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_holds_after_win() {
        let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
        for index in [0, 4, 1, 5, 2] {
            engine.place_mark(index).expect("legal move");
        }
        assert!(engine.status().is_terminal());
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_detects_corrupted_board() {
        let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
        engine.place_mark(4).expect("legal move");
        engine
            .board
            .set(Position::TopLeft, Square::Occupied(Mark::X));

        let violations = EngineInvariants::check_all(&engine).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert!(descriptions.contains(&<BalancedMarks as Invariant<GameEngine>>::description()));
        assert!(descriptions.contains(
            &<HistoryMatchesBoard as Invariant<GameEngine>>::description()
        ));
    }

    #[test]
    fn test_detects_same_player_twice() {
        let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
        engine.place_mark(4).expect("legal move");
        engine.history.push(Move::new(Mark::X, Position::TopLeft));
        assert!(!AlternatingTurns::holds(&engine));
    }
}
