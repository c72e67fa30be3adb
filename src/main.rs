//! logdog - A terminal viewer for Android logcat streams
//!
//! This is the binary entry point. All logic lives in the library crates.

use clap::Parser;
use logdog_adb::{online_devices, resolve_device, AdbBridge, DeviceBridge};
use logdog_app::config::{load_preferences, preferences_dir};
use logdog_core::prelude::*;
use logdog_core::{logging, TailSize};
use logdog_tui::Startup;

/// logdog - A terminal viewer for Android logcat streams
#[derive(Parser, Debug)]
#[command(name = "logdog", version)]
#[command(about = "A terminal viewer for Android logcat streams", long_about = None)]
struct Args {
    /// Show only logs from this application (package name)
    #[arg(short, long, value_name = "APP_ID")]
    app: Option<String>,

    /// Recent lines to load on start: a count or "all"
    #[arg(short, long, value_name = "N|all")]
    tail: Option<TailSize>,

    /// Serial of the device to stream from
    #[arg(short, long, value_name = "SERIAL")]
    device: Option<String>,

    /// Entries kept in memory (0 = unbounded)
    #[arg(long, value_name = "N")]
    max_entries: Option<usize>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Initialize logging (to file, since the TUI owns the terminal)
    logging::init()?;

    let config_dir = preferences_dir();
    let prefs = config_dir
        .as_deref()
        .map(load_preferences)
        .unwrap_or_default();

    let startup = Startup {
        tail: args.tail.unwrap_or_else(|| prefs.tail()),
        max_entries: args.max_entries.unwrap_or(prefs.max_entries),
        app_id: args.app.clone(),
        prefs,
        config_dir,
        ..Default::default()
    };

    let (bridge, startup) = match prepare(&args, startup).await {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("Startup failed: {}", e);
            report_failure(&e.to_string());
        }
    };

    let exit_error = logdog_tui::run(bridge, startup).await?;
    info!("logdog exiting");

    if let Some(message) = exit_error {
        report_failure(&message);
    }
    Ok(())
}

/// Print the error with a pointer to the log files, then exit 1
fn report_failure(message: &str) -> ! {
    eprintln!("Error: {message}");
    eprintln!("Logs: {}", logging::log_directory().display());
    std::process::exit(1);
}

/// Locate adb and settle the device before the terminal is taken over.
///
/// With `--app` the process id is resolved once here so a typo in the
/// package name fails fast with a readable message.
async fn prepare(args: &Args, mut startup: Startup) -> Result<(AdbBridge, Startup)> {
    let bridge = AdbBridge::locate()?;
    let devices = bridge.list_devices().await?;

    match resolve_device(&devices, args.device.as_deref()) {
        Ok(device) => {
            info!("Using device {}", device.display_name());
            startup.device = Some(device.serial.clone());
            if let Some(app_id) = &args.app {
                let pid = bridge.resolve_pid(&device.serial, app_id).await?;
                info!("{} is running as pid {}", app_id, pid);
            }
        }
        Err(Error::AmbiguousDevice { count }) => {
            info!("{} devices online, asking which one to use", count);
            startup.choose_from = online_devices(&devices);
        }
        Err(e) => return Err(e),
    }

    Ok((bridge, startup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "logdog",
            "-a",
            "com.example.app",
            "--tail",
            "all",
            "-d",
            "emulator-5554",
            "--max-entries",
            "500",
        ]);
        assert_eq!(args.app.as_deref(), Some("com.example.app"));
        assert_eq!(args.tail, Some(TailSize::All));
        assert_eq!(args.device.as_deref(), Some("emulator-5554"));
        assert_eq!(args.max_entries, Some(500));
    }

    #[test]
    fn test_invalid_tail_rejected() {
        assert!(Args::try_parse_from(["logdog", "-t", "lots"]).is_err());
    }

    #[test]
    fn test_defaults_are_unset() {
        let args = Args::parse_from(["logdog"]);
        assert!(args.app.is_none());
        assert!(args.tail.is_none());
        assert!(args.max_entries.is_none());
    }
}
