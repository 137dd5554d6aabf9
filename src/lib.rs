//! Tic-tac-toe for the terminal.
//!
//! Game rules live in the [`tictactoe_engine`] crate; this crate wires the
//! engine to a ratatui front end, a TOML config layer and a headless replay
//! command.
//!
//! # Architecture
//!
//! - **Config**: [`GameConfig`] loaded from `tictactoe.toml` plus CLI overrides
//! - **TUI**: key events and delayed computer moves funnel through one event loop
//! - **Replay**: feeds a move list through the engine without a terminal
//!
//! # Example
//!
//! ```
//! use tictactoe::{parse_moves, replay};
//! use tictactoe_engine::{GameEngine, Mark, Mode};
//!
//! let mut engine = GameEngine::new(Mode::PlayerVsPlayer);
//! let moves = parse_moves("0,3,1,4,2").unwrap();
//! let report = replay(&mut engine, &moves);
//! assert_eq!(engine.status().winner(), Some(Mark::X));
//! assert!(report.rejected.is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod replay;
mod status;
pub mod tui;

pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig};
pub use replay::{ParseMovesError, RejectedMove, ReplayReport, parse_moves, replay};
pub use status::status_message;
