//! Logcat stream management
//!
//! [`StreamManager`] owns the logcat subprocess for one session. It resolves
//! the device and target process, delivers output as ordered line batches and,
//! when following an application, restarts logcat whenever the application
//! comes back under a new process id.

mod batch;
mod manager;
mod monitor;
mod reader;
mod task;

pub use manager::{Lifecycle, StreamConfig, StreamManager};
pub use monitor::MonitorCadence;
