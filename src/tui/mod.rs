//! Terminal UI for tic-tac-toe.

mod app;
mod input;
mod orchestrator;
mod ui;

pub use app::App;
pub use input::{Command, command_for, move_cursor};
pub use orchestrator::{AppEvent, ComputerScheduler, Orchestrator};
pub use ui::draw;

use crate::config::GameConfig;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Log to file so output does not tear the screen
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(mode = %config.mode(), delay_ms = config.computer_delay_ms(), "Starting tic-tac-toe TUI");

    let mut terminal = setup_terminal()?;
    install_panic_hook();

    let mut orchestrator = Orchestrator::new(App::new(config.build_engine()));
    let reader = spawn_key_reader(orchestrator.sender());

    let res = run_loop(&mut terminal, &mut orchestrator).await;

    // Dropping the orchestrator closes the channel and stops the reader.
    drop(orchestrator);
    if let Err(e) = reader.await {
        warn!(error = %e, "Key reader task failed");
    }

    // Drop the hook before leaving so later panics print normally.
    let _ = std::panic::take_hook();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Enters raw mode and the alternate screen.
///
/// Raw mode is undone if a later step fails.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    or_restore(execute!(stdout, EnterAlternateScreen), restore_terminal)?;
    let terminal = or_restore(Terminal::new(CrosstermBackend::new(stdout)), restore_terminal)?;
    Ok(terminal)
}

/// Runs `restore` when a setup step failed.
fn or_restore<T, E>(
    step: std::result::Result<T, E>,
    restore: impl FnOnce(),
) -> std::result::Result<T, E> {
    if step.is_err() {
        restore();
    }
    step
}

/// Best-effort terminal reset for error and panic paths.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to leave raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

/// Restores the terminal before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

#[instrument(skip_all)]
async fn run_loop(terminal: &mut Tui, orchestrator: &mut Orchestrator) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, orchestrator.app()))?;
        if !orchestrator.next().await {
            return Ok(());
        }
    }
}

/// Reads crossterm events on a blocking thread and forwards them.
fn spawn_key_reader(tx: mpsc::UnboundedSender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    error!(error = %e, "Failed to poll terminal events");
                    return;
                }
            }
            let forwarded = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(AppEvent::Key(key.code))
                }
                Ok(Event::Resize(..)) => tx.send(AppEvent::Redraw),
                Ok(_) => Ok(()),
                Err(e) => {
                    error!(error = %e, "Failed to read terminal event");
                    return;
                }
            };
            if forwarded.is_err() {
                break;
            }
        }
        debug!("Key reader stopped");
    })
}
