//! Tictactoe - terminal entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, PlayArgs, ReplayArgs};
use tictactoe::{GameConfig, parse_moves, replay, tui};
use tictactoe_engine::{GameEngine, RandomOpponent};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => run_play(args).await,
        Command::Replay(args) => run_replay(args),
    }
}

/// Run the interactive terminal UI
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = GameConfig::load(args.config.as_deref())?.with_overrides(
        args.mode,
        args.delay_ms,
        args.seed,
    );
    tui::run_tui(config).await
}

/// Replay a move list headlessly
fn run_replay(args: ReplayArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let moves = parse_moves(&args.moves)?;
    info!(count = moves.len(), "Parsed move list");

    let opponent = match args.seed {
        Some(seed) => RandomOpponent::with_seed(seed),
        None => RandomOpponent::new(),
    };
    let mut engine = GameEngine::with_opponent(args.mode, opponent);
    let report = replay(&mut engine, &moves);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render(&engine));
    }
    Ok(())
}
