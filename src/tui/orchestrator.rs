//! Event loop plumbing between input, timers and the app.

use super::app::App;
use crossterm::event::KeyCode;
use tictactoe_engine::ComputerTicket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Messages delivered to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed.
    Key(KeyCode),
    /// A scheduled computer move is due.
    ComputerMoveDue(ComputerTicket),
    /// Something outside the app changed (e.g. terminal resize).
    Redraw,
}

/// Turns computer tickets into delayed [`AppEvent::ComputerMoveDue`] events.
#[derive(Debug, Clone)]
pub struct ComputerScheduler {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl ComputerScheduler {
    /// Creates a scheduler that reports back on `tx`.
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Fires the ticket after its delay.
    #[instrument(skip(self), fields(generation = ticket.generation()))]
    pub fn schedule(&self, ticket: ComputerTicket) -> JoinHandle<()> {
        debug!(delay_ms = ticket.delay().as_millis() as u64, "Scheduling computer move");
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ticket.delay()).await;
            if tx.send(AppEvent::ComputerMoveDue(ticket)).is_err() {
                debug!("Event loop gone, computer move dropped");
            }
        })
    }
}

/// Owns the app and serializes every event against it.
pub struct Orchestrator {
    app: App,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    scheduler: ComputerScheduler,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(app: App) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let scheduler = ComputerScheduler::new(event_tx.clone());
        Self {
            app,
            event_tx,
            event_rx,
            scheduler,
        }
    }

    /// Sender for input sources.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    /// Gets the app.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Applies one event.
    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if let Some(ticket) = self.app.handle_key(key) {
                    self.scheduler.schedule(ticket);
                }
            }
            AppEvent::ComputerMoveDue(ticket) => self.app.handle_computer_move(ticket),
            AppEvent::Redraw => {}
        }
    }

    /// Waits for the next event and applies it.
    ///
    /// Returns `false` once the app should stop.
    pub async fn next(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle(event);
                if self.app.should_quit() {
                    info!("Event loop stopping");
                    return false;
                }
                true
            }
            None => false,
        }
    }
}
