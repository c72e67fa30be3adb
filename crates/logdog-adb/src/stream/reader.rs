//! One generation of the logcat subprocess and its reader pipeline
//!
//! ```text
//! logcat stdout ──pump──▶ relay (bounded) ──batch stage──▶ consumer channel
//! ```
//!
//! The pump blocks on the relay when the batch stage is behind, which in
//! turn stops draining the pipe and backpressures logcat itself.

use std::process::Stdio;
use std::time::Duration;

use logdog_core::prelude::*;
use logdog_core::StreamEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::batch::{LineBatcher, BATCH_FLUSH_INTERVAL, BATCH_MAX_SIZE};
use super::task::{StopSignal, TaskHandle};

/// Capacity of the relay between the pump and the batch stage
const RELAY_CAPACITY: usize = BATCH_MAX_SIZE * 2;

/// Initial pipe read buffer
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Longest line kept; longer lines are cut at a char boundary
const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// How long the final flush on stop may wait for the consumer
const FINAL_FLUSH_TIMEOUT: Duration = Duration::from_millis(250);

/// Spawn `command` and start delivering its stdout as line batches.
///
/// The returned handle owns the child; shutting it down flushes what was
/// already read, kills the process and waits for both pipeline stages.
pub(crate) fn spawn_reader(
    mut command: Command,
    events: mpsc::Sender<StreamEvent>,
) -> Result<TaskHandle> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::AdbNotFound
            } else {
                Error::process_spawn(e.to_string())
            }
        })?;

    info!("logcat started with PID: {:?}", child.id());

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::process_spawn("logcat stdout was not captured"))?;

    Ok(TaskHandle::spawn("logcat-reader", move |stop| {
        run_reader(child, stdout, events, stop)
    }))
}

enum Delivery {
    Sent,
    Stopped,
    Closed,
}

async fn run_reader(
    mut child: Child,
    stdout: ChildStdout,
    events: mpsc::Sender<StreamEvent>,
    mut stop: StopSignal,
) {
    let (relay_tx, mut relay_rx) = mpsc::channel::<String>(RELAY_CAPACITY);
    let pump = tokio::spawn(pump_lines(stdout, relay_tx));

    let mut batcher = LineBatcher::new();
    let mut ticker = tokio::time::interval(BATCH_FLUSH_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut consumer_open = true;
    loop {
        tokio::select! {
            biased;
            _ = stop.wait() => break,
            line = relay_rx.recv() => match line {
                Some(line) => {
                    if batcher.add(line) {
                        match deliver(&events, &mut batcher, &mut stop).await {
                            Delivery::Sent => {}
                            Delivery::Stopped => break,
                            Delivery::Closed => {
                                consumer_open = false;
                                break;
                            }
                        }
                    }
                }
                None => {
                    info!("logcat output ended");
                    break;
                }
            },
            _ = ticker.tick() => {
                if batcher.has_pending() {
                    match deliver(&events, &mut batcher, &mut stop).await {
                        Delivery::Sent => {}
                        Delivery::Stopped => break,
                        Delivery::Closed => {
                            consumer_open = false;
                            break;
                        }
                    }
                }
            }
        }
    }

    // Lines the pump already handed over still belong to this generation
    while let Ok(line) = relay_rx.try_recv() {
        batcher.add(line);
    }
    if consumer_open && batcher.has_pending() {
        let batch = batcher.flush();
        let count = batch.len();
        match tokio::time::timeout(FINAL_FLUSH_TIMEOUT, events.send(StreamEvent::Lines(batch))).await {
            Ok(Ok(())) => debug!("Final flush delivered {} line(s)", count),
            Ok(Err(_)) => debug!("Consumer gone, dropped {} line(s)", count),
            Err(_) => warn!("Consumer busy, dropped {} line(s) on stop", count),
        }
    }

    drop(relay_rx);
    if let Err(e) = child.kill().await {
        debug!("logcat kill: {}", e);
    }
    if let Err(e) = pump.await {
        warn!("logcat pump ended abnormally: {}", e);
    }
    debug!("logcat reader finished");
}

/// Flush the batch once the consumer has room, unless a stop comes first.
///
/// On stop the lines stay in the batcher for the final flush.
async fn deliver(
    events: &mpsc::Sender<StreamEvent>,
    batcher: &mut LineBatcher,
    stop: &mut StopSignal,
) -> Delivery {
    tokio::select! {
        biased;
        _ = stop.wait() => Delivery::Stopped,
        permit = events.reserve() => match permit {
            Ok(permit) => {
                permit.send(StreamEvent::Lines(batcher.flush()));
                Delivery::Sent
            }
            Err(_) => Delivery::Closed,
        },
    }
}

/// Read stdout line by line into the relay until EOF or the relay closes
async fn pump_lines(stdout: ChildStdout, relay: mpsc::Sender<String>) {
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, stdout);
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(&buf);
                if relay.send(line).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("Error reading logcat output: {}", e);
                break;
            }
        }
    }
    trace!("logcat pump finished");
}

/// Strip the line terminator and decode lossily
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    let mut line = String::from_utf8_lossy(bytes).into_owned();
    if line.len() > MAX_LINE_LENGTH {
        let mut cut = MAX_LINE_LENGTH;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.args(["-c", script]);
        command
    }

    async fn collect_lines(rx: &mut mpsc::Receiver<StreamEvent>, want: usize) -> Vec<Vec<String>> {
        let mut batches = Vec::new();
        let mut total = 0;
        while total < want {
            match tokio::time::timeout(Duration::from_secs(5), rx.recv()).await {
                Ok(Some(StreamEvent::Lines(batch))) => {
                    total += batch.len();
                    batches.push(batch);
                }
                Ok(Some(other)) => panic!("unexpected event {other:?}"),
                Ok(None) | Err(_) => break,
            }
        }
        batches
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(b"hello\n"), "hello");
        assert_eq!(decode_line(b"hello\r\n"), "hello");
        assert_eq!(decode_line(b"no newline"), "no newline");
        assert_eq!(decode_line(b"bad \xff byte\n"), "bad \u{fffd} byte");
    }

    #[tokio::test]
    async fn test_lines_arrive_in_order_and_batched() {
        let (tx, mut rx) = mpsc::channel(16);
        let reader = spawn_reader(
            sh("i=1; while [ $i -le 250 ]; do echo \"line $i\"; i=$((i+1)); done; exec sleep 30"),
            tx,
        )
        .expect("sh must be available");

        let batches = collect_lines(&mut rx, 250).await;
        reader.shutdown().await;

        assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= BATCH_MAX_SIZE));
        let lines: Vec<String> = batches.into_iter().flatten().collect();
        let expected: Vec<String> = (1..=250).map(|i| format!("line {i}")).collect();
        assert_eq!(lines, expected);
    }

    #[tokio::test]
    async fn test_partial_batch_flushed_on_interval() {
        let (tx, mut rx) = mpsc::channel(16);
        let reader = spawn_reader(sh("echo one; echo two; exec sleep 30"), tx).unwrap();

        let batches = collect_lines(&mut rx, 2).await;
        assert_eq!(batches.concat(), vec!["one", "two"]);
        reader.shutdown().await;
    }

    #[tokio::test]
    async fn test_no_events_after_shutdown() {
        let (tx, mut rx) = mpsc::channel(64);
        let reader = spawn_reader(sh("while true; do echo spam; done"), tx).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        reader.shutdown().await;

        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_shutdown_with_stalled_consumer_completes() {
        let (tx, _rx) = mpsc::channel(1);
        let reader = spawn_reader(sh("while true; do echo spam; done"), tx).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        let done = tokio::time::timeout(Duration::from_secs(5), reader.shutdown()).await;
        assert!(done.is_ok(), "shutdown must not hang on a full channel");
    }

    #[tokio::test]
    async fn test_process_exit_ends_reader() {
        let (tx, mut rx) = mpsc::channel(16);
        let reader = spawn_reader(sh("echo only"), tx).unwrap();

        let batches = collect_lines(&mut rx, 1).await;
        assert_eq!(batches.concat(), vec!["only"]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(reader.is_finished());
        reader.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let (tx, _rx) = mpsc::channel(1);
        let err = spawn_reader(Command::new("/nonexistent/logcat-binary"), tx).unwrap_err();
        assert!(matches!(err, Error::AdbNotFound));
    }
}
