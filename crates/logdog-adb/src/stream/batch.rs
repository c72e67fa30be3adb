//! Line batching between the logcat pipe and the consumer

use std::time::Duration;

/// Interval at which a partial batch is flushed (~30fps)
pub(crate) const BATCH_FLUSH_INTERVAL: Duration = Duration::from_millis(33);

/// Maximum batch size before forced flush
pub(crate) const BATCH_MAX_SIZE: usize = 100;

/// Accumulates raw lines until they are flushed as one batch.
///
/// Caps how often the consumer is woken independent of how bursty the
/// producer is.
#[derive(Debug)]
pub(crate) struct LineBatcher {
    pending: Vec<String>,
}

impl Default for LineBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBatcher {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(BATCH_MAX_SIZE),
        }
    }

    /// Add a line; returns true once the batch is full
    pub fn add(&mut self, line: String) -> bool {
        self.pending.push(line);
        self.pending.len() >= BATCH_MAX_SIZE
    }

    /// Take all pending lines
    pub fn flush(&mut self) -> Vec<String> {
        std::mem::replace(&mut self.pending, Vec::with_capacity(BATCH_MAX_SIZE))
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
