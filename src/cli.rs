//! Command-line interface for tictactoe.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::Mode;

/// Tic-tac-toe in the terminal, against a friend or a random computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal UI
    Play(PlayArgs),

    /// Replay a move list without a terminal and print the result
    Replay(ReplayArgs),
}

/// Options for `play`.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Starting mode: pvp or pvc
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Pause before the computer replies, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to config file (defaults to tictactoe.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Options for `replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Cell indices 0-8, separated by commas or spaces
    pub moves: String,

    /// Mode to replay in: pvp or pvc
    #[arg(short, long, default_value = "pvp")]
    pub mode: Mode,

    /// Seed for the computer opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}
