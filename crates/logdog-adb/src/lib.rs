//! # logdog-adb - Device Access and Stream Management
//!
//! Everything that talks to `adb`: listing devices, resolving an
//! application to its process id, and running the logcat subprocess behind
//! a [`StreamManager`] that survives application restarts.
//!
//! The [`DeviceBridge`] trait is the seam between the manager and the real
//! `adb` binary ([`AdbBridge`]).

pub mod bridge;
pub mod devices;
pub mod stream;

pub use bridge::{AdbBridge, DeviceBridge, LocalDeviceBridge, LogcatArgs};
pub use devices::{online_devices, parse_devices_output, resolve_device, Device};
pub use stream::{Lifecycle, MonitorCadence, StreamConfig, StreamManager};
