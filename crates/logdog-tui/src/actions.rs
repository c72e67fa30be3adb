//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use logdog_adb::{Device, DeviceBridge, StreamManager};
use logdog_app::message::Message;
use logdog_app::UpdateAction;
use logdog_core::prelude::*;
use tokio::sync::{mpsc, Mutex};

use crate::clipboard::Clipboard;

/// The stream manager, shared between the runner and start tasks
pub type SharedManager<B> = Arc<Mutex<StreamManager<B>>>;

/// Execute an action.
///
/// Stream starts run in the background and report back on `msg_tx`.
/// Clipboard writes are quick and run inline; their outcome is returned
/// for the caller to process.
pub fn handle_action<B>(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    manager: &SharedManager<B>,
    clipboard: &mut dyn Clipboard,
) -> Option<Message>
where
    B: DeviceBridge + Sync + 'static,
{
    match action {
        UpdateAction::StartStream { serial } => {
            spawn_stream_start(serial, Arc::clone(manager), msg_tx.clone());
            None
        }
        UpdateAction::CopyToClipboard { text, lines } => {
            Some(copy_to_clipboard(clipboard, &text, lines))
        }
    }
}

fn copy_to_clipboard(clipboard: &mut dyn Clipboard, text: &str, lines: usize) -> Message {
    match clipboard.set(text) {
        Ok(()) => {
            debug!("Copied {} line(s) to clipboard", lines);
            Message::CopyFinished { lines }
        }
        Err(e) => {
            warn!("Clipboard write failed: {}", e);
            Message::CopyFailed {
                error: e.to_string(),
            }
        }
    }
}

/// Start the stream manager on a background task
pub fn spawn_stream_start<B>(
    serial: Option<String>,
    manager: SharedManager<B>,
    msg_tx: mpsc::Sender<Message>,
) where
    B: DeviceBridge + Sync + 'static,
{
    tokio::spawn(async move {
        let message = start_stream(serial, &manager).await;
        if msg_tx.send(message).await.is_err() {
            debug!("Runner gone before stream start finished");
        }
    });
}

async fn start_stream<B>(serial: Option<String>, manager: &SharedManager<B>) -> Message
where
    B: DeviceBridge + Sync + 'static,
{
    let mut manager = manager.lock().await;
    if let Some(serial) = serial {
        manager.set_device(serial);
    }

    if let Err(e) = manager.start().await {
        error!("Failed to start stream: {}", e);
        return Message::StreamStartFailed {
            error: e.to_string(),
            recoverable: e.is_recoverable(),
        };
    }

    let serial = manager.device().await.unwrap_or_default();
    let device = match manager.bridge().list_devices().await {
        Ok(devices) => devices.into_iter().find(|d| d.serial == serial),
        Err(e) => {
            warn!("Could not look up device details: {}", e);
            None
        }
    };
    let device = device.unwrap_or(Device {
        model: serial.clone(),
        status: "device".to_string(),
        serial,
    });
    info!("Stream started on {}", device.display_name());
    Message::StreamStarted { device }
}
