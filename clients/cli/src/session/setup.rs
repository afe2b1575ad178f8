//! Session setup and initialization

use crate::api::ApiClient;
use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::{Event, EventSender};
use crate::network::Gateway;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Receives events from background fetch tasks
    pub event_receiver: mpsc::Receiver<Event>,
    /// Shutdown sender to stop all background tasks
    pub shutdown_sender: broadcast::Sender<()>,
    /// Fail-soft access to the data API
    pub gateway: Gateway,
    /// The API deployment in use
    pub environment: Environment,
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the HTTP client for the chosen environment
/// 2. Sets up the event and shutdown channels
/// 3. Returns session data for mode-specific handling
///
/// No request is issued here; each mode starts its own fetches.
pub fn setup_session(config: &Config, environment: Environment) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(environment.clone(), config.request_timeout())?;

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);
    let gateway = Gateway::new(Arc::new(client), EventSender::new(event_sender));

    Ok(SessionData {
        event_receiver,
        shutdown_sender,
        gateway,
        environment,
    })
}
