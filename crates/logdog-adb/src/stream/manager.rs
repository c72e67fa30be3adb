//! Stream session lifecycle

use std::sync::Arc;

use logdog_core::prelude::*;
use logdog_core::{StreamEvent, StreamStatus, TailSize};
use tokio::sync::{mpsc, Mutex};

use super::monitor::{self, MonitorCadence};
use super::reader::spawn_reader;
use super::task::{StopSignal, TaskHandle};
use crate::bridge::{DeviceBridge, LogcatArgs};
use crate::devices::resolve_device;

/// Stream session lifecycle.
///
/// ```text
/// Stopped → Starting → Running ⇄ TargetStopped → Reconnecting → Running
///    ▲                                                  │
///    │                                                  ▼
///    └──────────────────── stop() ──────────────────── Failed
/// ```
///
/// `stop()` returns to `Stopped` from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Stopped,
    Starting,
    Running,
    /// The followed application went away
    TargetStopped,
    Reconnecting,
    /// Relaunching logcat failed; the stream is idle until stopped
    Failed,
}

/// What to stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamConfig {
    /// Follow only this application's process
    pub app_id: Option<String>,
    /// adb serial; required when several devices are online
    pub device: Option<String>,
    /// History to replay on the first start
    pub tail: TailSize,
}

/// Mutable session fields, guarded together
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    lifecycle: Lifecycle,
    device: Option<String>,
    pid: Option<u32>,
    reader: Option<TaskHandle>,
}

/// State shared between the manager and its monitor task
pub(crate) struct Shared<B> {
    pub(crate) bridge: B,
    events: mpsc::Sender<StreamEvent>,
    session: Mutex<SessionState>,
}

impl<B: DeviceBridge + Sync + 'static> Shared<B> {
    pub(crate) async fn set_lifecycle(&self, lifecycle: Lifecycle) {
        self.session.lock().await.lifecycle = lifecycle;
    }

    /// Send a status event; returns false if stopped or the consumer is gone
    pub(crate) async fn emit(&self, status: StreamStatus, stop: &mut StopSignal) -> bool {
        debug!("Stream status: {}", status.label());
        tokio::select! {
            biased;
            _ = stop.wait() => false,
            sent = self.events.send(StreamEvent::Status(status)) => sent.is_ok(),
        }
    }

    /// Stop the current reader, then start one for `args`.
    ///
    /// The session lock is held throughout, so two generations never
    /// deliver at the same time.
    pub(crate) async fn replace_reader(&self, args: &LogcatArgs) -> Result<()> {
        let mut session = self.session.lock().await;
        if let Some(old) = session.reader.take() {
            old.shutdown().await;
        }

        debug!("Starting logcat: {}", args.to_args().join(" "));
        let reader = spawn_reader(self.bridge.logcat_command(args), self.events.clone())?;
        session.reader = Some(reader);
        session.pid = args.pid;
        Ok(())
    }

    async fn stop_reader(&self) {
        let reader = self.session.lock().await.reader.take();
        if let Some(reader) = reader {
            reader.shutdown().await;
        }
    }
}

/// Owns the logcat subprocess of one session
pub struct StreamManager<B> {
    shared: Arc<Shared<B>>,
    config: StreamConfig,
    cadence: MonitorCadence,
    monitor: Option<TaskHandle>,
}

impl<B: DeviceBridge + Sync + 'static> StreamManager<B> {
    /// Create a stopped manager. Line batches and status changes are sent
    /// to `events` in production order.
    pub fn new(bridge: B, config: StreamConfig, events: mpsc::Sender<StreamEvent>) -> Self {
        Self {
            shared: Arc::new(Shared {
                bridge,
                events,
                session: Mutex::new(SessionState::default()),
            }),
            config,
            cadence: MonitorCadence::default(),
            monitor: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_cadence(mut self, cadence: MonitorCadence) -> Self {
        self.cadence = cadence;
        self
    }

    /// Choose the device for the next start
    pub fn set_device(&mut self, serial: impl Into<String>) {
        self.config.device = Some(serial.into());
    }

    pub fn bridge(&self) -> &B {
        &self.shared.bridge
    }

    pub async fn lifecycle(&self) -> Lifecycle {
        self.shared.session.lock().await.lifecycle
    }

    /// Current pid of the followed application
    #[cfg(test)]
    pub(crate) async fn current_pid(&self) -> Option<u32> {
        self.shared.session.lock().await.pid
    }

    /// Serial of the device being streamed
    pub async fn device(&self) -> Option<String> {
        self.shared.session.lock().await.device.clone()
    }

    /// Resolve device and target, then start streaming.
    ///
    /// Setup failures are returned here and leave the manager stopped.
    pub async fn start(&mut self) -> Result<()> {
        {
            let mut session = self.shared.session.lock().await;
            if session.lifecycle != Lifecycle::Stopped {
                return Err(Error::AlreadyRunning);
            }
            session.lifecycle = Lifecycle::Starting;
        }

        match self.start_inner().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Stream start failed: {}", e);
                self.shared.stop_reader().await;
                let mut session = self.shared.session.lock().await;
                session.lifecycle = Lifecycle::Stopped;
                session.pid = None;
                Err(e)
            }
        }
    }

    async fn start_inner(&mut self) -> Result<()> {
        let devices = self.shared.bridge.list_devices().await?;
        let serial = resolve_device(&devices, self.config.device.as_deref())?
            .serial
            .clone();

        let pid = match &self.config.app_id {
            Some(app_id) => Some(self.shared.bridge.resolve_pid(&serial, app_id).await?),
            None => None,
        };

        let args = LogcatArgs {
            serial: serial.clone(),
            tail: self.config.tail,
            pid,
        };
        self.shared.replace_reader(&args).await?;

        {
            let mut session = self.shared.session.lock().await;
            session.device = Some(serial.clone());
            session.lifecycle = Lifecycle::Running;
        }
        info!(
            "Streaming from {} (app: {}, pid: {:?})",
            serial,
            self.config.app_id.as_deref().unwrap_or("all"),
            pid
        );

        if let (Some(app_id), Some(pid)) = (self.config.app_id.clone(), pid) {
            let running = StreamEvent::Status(StreamStatus::Running);
            if self.shared.events.send(running).await.is_err() {
                debug!("Stream consumer gone before the first status");
                return Err(Error::ChannelClosed);
            }

            let shared = Arc::clone(&self.shared);
            let cadence = self.cadence;
            self.monitor = Some(TaskHandle::spawn("pid-monitor", move |stop| {
                monitor::run(shared, serial, app_id, pid, cadence, stop)
            }));
        }

        Ok(())
    }

    /// Stop monitoring and streaming. Safe to call more than once.
    ///
    /// Returns only after every background task has exited, so nothing is
    /// sent on the event channel afterwards.
    pub async fn stop(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.shutdown().await;
        }
        self.shared.stop_reader().await;

        let mut session = self.shared.session.lock().await;
        if session.lifecycle != Lifecycle::Stopped {
            info!("Stream stopped (pid: {:?})", session.pid);
        }
        session.lifecycle = Lifecycle::Stopped;
        session.pid = None;
    }
}
