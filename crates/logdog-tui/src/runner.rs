//! Main TUI runner - entry point and event loop

use std::path::PathBuf;
use std::sync::Arc;

use logdog_adb::{Device, DeviceBridge, StreamConfig, StreamManager};
use logdog_app::config::{save_preferences, Preferences};
use logdog_app::message::Message;
use logdog_app::signals;
use logdog_app::state::AppState;
use logdog_core::prelude::*;
use logdog_core::{StreamEvent, TailSize};
use tokio::sync::{mpsc, Mutex};

use crate::actions::{self, SharedManager};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::{event, process, render, terminal};

/// Everything the binary resolved before the terminal is taken over
#[derive(Debug, Clone, Default)]
pub struct Startup {
    /// Preferences as loaded from disk
    pub prefs: Preferences,
    /// Directory to save preferences into on exit
    pub config_dir: Option<PathBuf>,
    /// Follow only this application
    pub app_id: Option<String>,
    /// Device chosen on the command line or resolved up front
    pub device: Option<String>,
    pub tail: TailSize,
    pub max_entries: usize,
    /// Devices to pick from before streaming; empty to start right away
    pub choose_from: Vec<Device>,
}

/// Run the TUI until the user quits.
///
/// Returns the error that ended the session, if any, for the caller to
/// print once the terminal is restored.
pub async fn run<B>(bridge: B, startup: Startup) -> Result<Option<String>>
where
    B: DeviceBridge + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut effective = startup.prefs.clone();
    effective.tail_size = startup.tail.as_i64();
    effective.max_entries = startup.max_entries;
    let mut state = AppState::new(&effective, startup.app_id.clone());

    // Unified message channel (signal handler, background tasks)
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    // Ordered line batches and status changes from the stream manager
    let (event_tx, event_rx) = mpsc::channel::<StreamEvent>(256);

    let signal_listener = signals::spawn_signal_handler(msg_tx.clone());

    let config = StreamConfig {
        app_id: startup.app_id.clone(),
        device: startup.device.clone(),
        tail: startup.tail,
    };
    let manager: SharedManager<B> =
        Arc::new(Mutex::new(StreamManager::new(bridge, config, event_tx)));

    if startup.choose_from.is_empty() {
        actions::spawn_stream_start(None, Arc::clone(&manager), msg_tx.clone());
    } else {
        state.show_device_selector(startup.choose_from.clone());
    }

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_mouse_capture() {
        warn!("Mouse support unavailable: {}", e);
    }
    let mut clipboard = SystemClipboard::new();

    let result = run_loop(
        &mut term,
        &mut state,
        msg_rx,
        event_rx,
        &msg_tx,
        &manager,
        &mut clipboard,
    );

    // Stop streaming before the terminal is handed back
    signal_listener.abort();
    manager.lock().await.stop().await;

    if let Err(e) = terminal::disable_mouse_capture() {
        debug!("Could not disable mouse capture: {}", e);
    }
    ratatui::restore();

    if let Some(dir) = &startup.config_dir {
        let prefs = state.preferences(&startup.prefs);
        if let Err(e) = save_preferences(dir, &prefs) {
            warn!("Failed to save preferences: {}", e);
        }
    }

    result.map(|()| state.exit_error.take())
}

/// Main event loop
fn run_loop<B>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    mut event_rx: mpsc::Receiver<StreamEvent>,
    msg_tx: &mpsc::Sender<Message>,
    manager: &SharedManager<B>,
    clipboard: &mut dyn Clipboard,
) -> Result<()>
where
    B: DeviceBridge + Sync + 'static,
{
    while !state.should_quit() {
        // Process external messages (signal handler, stream start, ...)
        while let Ok(msg) = msg_rx.try_recv() {
            process::process_message(state, msg, msg_tx, manager, clipboard);
        }

        // Process stream events (non-blocking, in arrival order)
        while let Ok(stream_event) = event_rx.try_recv() {
            process::process_message(
                state,
                Message::Stream(stream_event),
                msg_tx,
                manager,
                clipboard,
            );
        }

        if state.should_quit() {
            break;
        }

        // Render
        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            process::process_message(state, message, msg_tx, manager, clipboard);
        }
    }

    Ok(())
}
