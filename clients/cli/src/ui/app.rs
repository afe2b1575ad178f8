//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::Event as DashboardEvent;
use crate::network::Gateway;
use crate::runtime::spawn_snapshot_fetch;
use crate::ui::dashboard::{
    DashboardState, InputOutcome, handle_key, handle_mouse, render_dashboard,
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// Application state
pub struct App {
    /// Everything the dashboard shows.
    state: DashboardState,

    /// Issues snapshot fetches for committed cards.
    gateway: Gateway,

    /// Receives events from background fetch tasks.
    event_receiver: mpsc::Receiver<DashboardEvent>,

    /// Broadcasts shutdown signal to background tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        gateway: Gateway,
        event_receiver: mpsc::Receiver<DashboardEvent>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            state: DashboardState::new(environment, Instant::now(), ui_config),
            gateway,
            event_receiver,
            shutdown_sender,
        }
    }
}

/// Runs the dashboard in a loop until the user quits.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.state.add_event(event);
        }
        app.state.update();

        for ticket in app.state.take_snapshot_requests() {
            spawn_snapshot_fetch(
                app.gateway.clone(),
                ticket,
                app.shutdown_sender.subscribe(),
            );
        }

        terminal.draw(|f| render_dashboard(f, &app.state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                // Skip events that are not KeyEventKind::Press
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if handle_key(&mut app.state, key) == InputOutcome::Quit {
                    // Send shutdown signal to background tasks
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                handle_mouse(
                    &mut app.state,
                    mouse,
                    Rect::new(0, 0, size.width, size.height),
                );
            }
            _ => {}
        }
    }
}
