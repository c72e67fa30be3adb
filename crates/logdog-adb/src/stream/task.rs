//! Owned background tasks with a stop-then-wait shutdown

use std::future::Future;

use logdog_core::prelude::*;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Stop request handed to a task body.
///
/// Fires when [`TaskHandle::shutdown`] is called or the handle is dropped.
#[derive(Debug)]
pub(crate) struct StopSignal {
    rx: oneshot::Receiver<()>,
    fired: bool,
}

impl StopSignal {
    /// Resolve once a stop has been requested. Safe to await repeatedly.
    pub async fn wait(&mut self) {
        if self.fired {
            return;
        }
        let _ = (&mut self.rx).await;
        self.fired = true;
    }

    #[cfg(test)]
    pub fn is_stopped(&mut self) -> bool {
        if !self.fired {
            self.fired = !matches!(self.rx.try_recv(), Err(oneshot::error::TryRecvError::Empty));
        }
        self.fired
    }
}

/// A running background task.
///
/// [`shutdown`](TaskHandle::shutdown) consumes the handle, signals the task
/// and waits for it to finish, so once it returns the task can no longer
/// touch any channel it held.
#[derive(Debug)]
pub(crate) struct TaskHandle {
    name: &'static str,
    stop_tx: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl TaskHandle {
    pub fn spawn<F, Fut>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(StopSignal) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, rx) = oneshot::channel();
        let join = tokio::spawn(body(StopSignal { rx, fired: false }));
        debug!("Spawned task '{}'", name);
        Self {
            name,
            stop_tx: Some(stop_tx),
            join: Some(join),
        }
    }

    #[cfg(test)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Signal the task and wait until it has exited
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                warn!("Task '{}' ended abnormally: {}", self.name, e);
            }
        }
        debug!("Task '{}' stopped", self.name);
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        // Dropping the sender wakes the StopSignal; the task winds down detached.
        if self.stop_tx.take().is_some() && self.join.is_some() {
            debug!("Task '{}' dropped without shutdown", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_waits_for_task_exit() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let handle = TaskHandle::spawn("test", move |mut stop| async move {
            stop.wait().await;
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });

        handle.shutdown().await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_signals_stop() {
        let (done_tx, done_rx) = oneshot::channel();
        let handle = TaskHandle::spawn("test", move |mut stop| async move {
            stop.wait().await;
            let _ = done_tx.send(());
        });

        drop(handle);
        let result = tokio::time::timeout(Duration::from_secs(1), done_rx).await;
        assert!(result.is_ok(), "task should observe the dropped handle");
    }

    #[tokio::test]
    async fn test_stop_signal_is_reentrant() {
        let (result_tx, result_rx) = oneshot::channel();
        let handle = TaskHandle::spawn("test", move |mut stop| async move {
            stop.wait().await;
            stop.wait().await;
            let _ = result_tx.send(stop.is_stopped());
        });
        handle.shutdown().await;
        assert_eq!(result_rx.await, Ok(true));
    }

    #[tokio::test]
    async fn test_is_finished() {
        let handle = TaskHandle::spawn("short", |_stop| async {});
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.is_finished());
        assert_eq!(handle.name(), "short");
        handle.shutdown().await;
    }
}
