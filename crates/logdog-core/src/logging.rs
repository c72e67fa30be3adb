//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "logdog.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/logdog/logs/`, never to the terminal,
/// which belongs to the TUI. Log level is controlled by the `LOGDOG_LOG`
/// environment variable.
///
/// # Examples
/// ```bash
/// LOGDOG_LOG=debug logdog --app com.example.app
/// LOGDOG_LOG=logdog_adb=trace logdog
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter = EnvFilter::try_from_env("LOGDOG_LOG").unwrap_or_else(|_| {
        EnvFilter::new("logdog=info,logdog_core=info,logdog_adb=info,logdog_app=info,logdog_tui=info,warn")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("logdog {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Directory holding the daily `logdog.log.<date>` files
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
    base.join("logdog").join("logs")
}
