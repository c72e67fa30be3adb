//! Termination signals turned into a quit request
//!
//! Besides SIGINT and SIGTERM this listens for SIGHUP, which arrives when the
//! terminal window running logdog is closed. Quitting through the event loop
//! lets the runner stop logcat and save preferences on the way out.

use std::future::Future;

use logdog_core::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
    Hangup,
}

impl ShutdownSignal {
    pub fn name(self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Hangup => "SIGHUP",
        }
    }
}

/// Listen for termination signals; the first one becomes [`Message::Quit`].
///
/// Abort the returned handle to stop listening.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(forward_first(wait_for_signal(), tx))
}

async fn forward_first<F>(signal: F, tx: mpsc::Sender<Message>)
where
    F: Future<Output = Result<ShutdownSignal>>,
{
    match signal.await {
        Ok(signal) => {
            info!("Received {}, quitting", signal.name());
            if tx.send(Message::Quit).await.is_err() {
                debug!("Event loop gone before {} was handled", signal.name());
            }
        }
        Err(e) => error!("Signal handler error: {}", e),
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("Failed to listen for {name}: {e}")))
    };
    let mut interrupt = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut terminate = listen(SignalKind::terminate(), "SIGTERM")?;
    let mut hangup = listen(SignalKind::hangup(), "SIGHUP")?;

    let received = tokio::select! {
        _ = interrupt.recv() => ShutdownSignal::Interrupt,
        _ = terminate.recv() => ShutdownSignal::Terminate,
        _ = hangup.recv() => ShutdownSignal::Hangup,
    };
    Ok(received)
}

#[cfg(windows)]
async fn wait_for_signal() -> Result<ShutdownSignal> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Failed to listen for Ctrl+C: {e}")))?;
    Ok(ShutdownSignal::Interrupt)
}
