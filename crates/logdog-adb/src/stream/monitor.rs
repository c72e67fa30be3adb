//! Liveness monitoring for the followed application

use std::sync::Arc;
use std::time::Duration;

use logdog_core::prelude::*;
use logdog_core::StreamStatus;

use super::manager::{Lifecycle, Shared};
use super::task::StopSignal;
use crate::bridge::{DeviceBridge, LogcatArgs};

/// Poll intervals for the liveness monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorCadence {
    /// How often a running target is checked
    pub check_interval: Duration,
    /// How often a vanished target is looked up again
    pub reappear_poll: Duration,
}

impl Default for MonitorCadence {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(2),
            reappear_poll: Duration::from_secs(1),
        }
    }
}

/// Failed liveness checks in a row before the target counts as gone
const MAX_CHECK_FAILURES: u32 = 3;

/// What the monitor is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Target alive under `pid`; `failures` counts failed checks in a row
    Watching { pid: u32, failures: u32 },
    /// Target gone; polling for it to come back
    Waiting,
    /// Target back under this pid; logcat must follow it
    Restarting(u32),
}

/// Monitor body. Runs until stopped or until a restart fails.
pub(crate) async fn run<B>(
    shared: Arc<Shared<B>>,
    serial: String,
    app_id: String,
    pid: u32,
    cadence: MonitorCadence,
    mut stop: StopSignal,
) where
    B: DeviceBridge + Sync + 'static,
{
    info!("Monitoring {} (pid {}) on {}", app_id, pid, serial);
    let mut phase = Phase::Watching { pid, failures: 0 };

    loop {
        phase = match phase {
            Phase::Watching { pid, failures } => {
                if sleep_or_stop(cadence.check_interval, &mut stop).await {
                    break;
                }
                match shared.bridge.is_pid_running(&serial, pid).await {
                    Ok(true) => Phase::Watching { pid, failures: 0 },
                    Err(e) if failures + 1 < MAX_CHECK_FAILURES => {
                        warn!("Liveness check for pid {} failed: {}", pid, e);
                        Phase::Watching {
                            pid,
                            failures: failures + 1,
                        }
                    }
                    outcome => {
                        match outcome {
                            Err(e) => warn!("Treating pid {} as gone after failed checks: {}", pid, e),
                            Ok(_) => info!("{} (pid {}) is no longer running", app_id, pid),
                        }
                        shared.set_lifecycle(Lifecycle::TargetStopped).await;
                        if !shared.emit(StreamStatus::Stopped, &mut stop).await {
                            break;
                        }
                        Phase::Waiting
                    }
                }
            }
            Phase::Waiting => {
                if sleep_or_stop(cadence.reappear_poll, &mut stop).await {
                    break;
                }
                match shared.bridge.resolve_pid(&serial, &app_id).await {
                    Ok(new_pid) => Phase::Restarting(new_pid),
                    Err(e) => {
                        trace!("Still waiting for {}: {}", app_id, e);
                        Phase::Waiting
                    }
                }
            }
            Phase::Restarting(new_pid) => {
                info!("{} is back with pid {}, reconnecting", app_id, new_pid);
                shared.set_lifecycle(Lifecycle::Reconnecting).await;
                if !shared.emit(StreamStatus::Reconnecting, &mut stop).await {
                    break;
                }

                match shared.replace_reader(&LogcatArgs::restart(&serial, new_pid)).await {
                    Ok(()) => {
                        shared.set_lifecycle(Lifecycle::Running).await;
                        if !shared.emit(StreamStatus::Running, &mut stop).await {
                            break;
                        }
                        Phase::Watching {
                            pid: new_pid,
                            failures: 0,
                        }
                    }
                    Err(e) => {
                        error!("Reconnecting to {} failed: {}", app_id, e);
                        shared.set_lifecycle(Lifecycle::Failed).await;
                        shared.emit(StreamStatus::Error(e.to_string()), &mut stop).await;
                        break;
                    }
                }
            }
        };
    }

    debug!("Monitor for {} finished", app_id);
}

/// Sleep for `duration`; returns true if a stop arrived first
async fn sleep_or_stop(duration: Duration, stop: &mut StopSignal) -> bool {
    tokio::select! {
        biased;
        _ = stop.wait() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}
