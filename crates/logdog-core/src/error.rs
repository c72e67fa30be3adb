//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    // ─────────────────────────────────────────────────────────────
    // adb/Device Errors
    // ─────────────────────────────────────────────────────────────
    #[error("adb command failed - is Android SDK installed?")]
    AdbNotFound,

    #[error("adb error: {message}")]
    Adb { message: String },

    #[error("no devices found")]
    NoDevices,

    #[error("device {serial} not found")]
    DeviceNotFound { serial: String },

    #[error("device {serial} is not online (status: {status})")]
    DeviceOffline { serial: String, status: String },

    #[error("{count} devices connected - select a device with --device")]
    AmbiguousDevice { count: usize },

    #[error("app not running or package name not found - is '{app_id}' installed and running?")]
    AppNotRunning { app_id: String },

    // ─────────────────────────────────────────────────────────────
    // Stream Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to spawn logcat process: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Stream already running")]
    AlreadyRunning,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    pub fn adb(message: impl Into<String>) -> Self {
        Self::Adb {
            message: message.into(),
        }
    }

    pub fn device_not_found(serial: impl Into<String>) -> Self {
        Self::DeviceNotFound {
            serial: serial.into(),
        }
    }

    pub fn device_offline(serial: impl Into<String>, status: impl Into<String>) -> Self {
        Self::DeviceOffline {
            serial: serial.into(),
            status: status.into(),
        }
    }

    pub fn app_not_running(app_id: impl Into<String>) -> Self {
        Self::AppNotRunning {
            app_id: app_id.into(),
        }
    }

    pub fn process_spawn(reason: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Errors tied to one device or app. Starting on another device may
    /// still work; anything else ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::AppNotRunning { .. }
                | Error::DeviceNotFound { .. }
                | Error::DeviceOffline { .. }
                | Error::Adb { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::app_not_running("com.example.app");
        assert_eq!(
            err.to_string(),
            "app not running or package name not found - is 'com.example.app' installed and running?"
        );

        let err = Error::AdbNotFound;
        assert!(err.to_string().contains("Android SDK"));

        let err = Error::device_offline("emulator-5554", "unauthorized");
        assert!(err.to_string().contains("emulator-5554"));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::app_not_running("x").is_recoverable());
        assert!(Error::device_offline("a", "unauthorized").is_recoverable());
        assert!(!Error::AdbNotFound.is_recoverable());
        assert!(!Error::process_spawn("permission denied").is_recoverable());
        assert!(!Error::ChannelClosed.is_recoverable());
    }

    #[test]
    fn test_result_ext_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "nope",
        ));
        let err = res.context("writing preferences").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
