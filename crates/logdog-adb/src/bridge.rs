//! The seam between the stream manager and the `adb` binary

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use logdog_core::prelude::*;
use logdog_core::TailSize;
use tokio::process::Command;
use tokio::time::timeout;

use crate::devices::{parse_devices_output, Device};

/// Upper bound for short-lived discovery commands
const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Arguments for one logcat invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogcatArgs {
    pub serial: String,
    pub tail: TailSize,
    /// Restrict output to this process
    pub pid: Option<u32>,
}

impl LogcatArgs {
    /// Arguments for restarting against a new process; history is not replayed
    pub fn restart(serial: impl Into<String>, pid: u32) -> Self {
        Self {
            serial: serial.into(),
            tail: TailSize::Count(0),
            pid: Some(pid),
        }
    }

    /// Full argument list after the `adb` program name
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-s".to_string(),
            self.serial.clone(),
            "logcat".to_string(),
            "-v".to_string(),
            "threadtime".to_string(),
        ];
        if let TailSize::Count(n) = self.tail {
            args.push("-T".to_string());
            args.push(n.to_string());
        }
        if let Some(pid) = self.pid {
            args.push(format!("--pid={pid}"));
        }
        args
    }
}

/// Device-side operations the stream manager depends on.
///
/// [`AdbBridge`] talks to a real `adb`; tests substitute a scripted bridge.
#[trait_variant::make(DeviceBridge: Send)]
pub trait LocalDeviceBridge {
    /// List attached devices, online or not
    async fn list_devices(&self) -> Result<Vec<Device>>;

    /// Resolve an application id to its current process id
    async fn resolve_pid(&self, serial: &str, app_id: &str) -> Result<u32>;

    /// Whether a process id is still alive on the device.
    ///
    /// An `Err` means the check itself failed and says nothing about the pid.
    async fn is_pid_running(&self, serial: &str, pid: u32) -> Result<bool>;

    /// Command that streams logcat output on stdout
    fn logcat_command(&self, args: &LogcatArgs) -> Command;
}

/// [`DeviceBridge`] backed by the `adb` executable
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
}

impl AdbBridge {
    /// Find `adb` on `PATH`, then under `$ANDROID_HOME/platform-tools`
    pub fn locate() -> Result<Self> {
        if let Ok(program) = which::which("adb") {
            debug!("Using adb at {}", program.display());
            return Ok(Self { program });
        }

        ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
            .iter()
            .filter_map(std::env::var_os)
            .map(|home| PathBuf::from(home).join("platform-tools").join("adb"))
            .find(|candidate| candidate.is_file())
            .map(|program| {
                debug!("Using adb from SDK at {}", program.display());
                Self { program }
            })
            .ok_or(Error::AdbNotFound)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run a short adb command and return its stdout
    async fn run(&self, args: &[&str]) -> Result<String> {
        trace!("adb {}", args.join(" "));

        let output = timeout(
            COMMAND_TIMEOUT,
            Command::new(&self.program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| Error::adb(format!("'adb {}' timed out", args.join(" "))))?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::AdbNotFound
            } else {
                Error::adb(format!("failed to run adb: {e}"))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::adb(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DeviceBridge for AdbBridge {
    async fn list_devices(&self) -> Result<Vec<Device>> {
        let output = self.run(&["devices", "-l"]).await.map_err(|e| match e {
            Error::Adb { .. } => Error::AdbNotFound,
            other => other,
        })?;
        let devices = parse_devices_output(&output);
        debug!("adb reported {} device(s)", devices.len());
        Ok(devices)
    }

    async fn resolve_pid(&self, serial: &str, app_id: &str) -> Result<u32> {
        let output = self
            .run(&["-s", serial, "shell", "pidof", app_id])
            .await
            .map_err(|e| match e {
                Error::AdbNotFound => Error::AdbNotFound,
                _ => Error::app_not_running(app_id),
            })?;
        parse_pidof_output(&output).ok_or_else(|| Error::app_not_running(app_id))
    }

    async fn is_pid_running(&self, serial: &str, pid: u32) -> Result<bool> {
        let pid = pid.to_string();
        let output = self.run(&["-s", serial, "shell", "ps", "-p", &pid]).await?;
        Ok(ps_output_lists_pid(&output, &pid))
    }

    fn logcat_command(&self, args: &LogcatArgs) -> Command {
        let mut command = Command::new(&self.program);
        command.args(args.to_args());
        command
    }
}

/// First pid printed by `pidof`
pub fn parse_pidof_output(output: &str) -> Option<u32> {
    output
        .split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
}

/// Whether `ps -p PID` output has a row for the pid
pub fn ps_output_lists_pid(output: &str, pid: &str) -> bool {
    output
        .lines()
        .skip(1)
        .any(|row| row.split_whitespace().any(|field| field == pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logcat_args_with_tail_and_pid() {
        let args = LogcatArgs {
            serial: "emulator-5554".into(),
            tail: TailSize::Count(500),
            pid: Some(4242),
        };
        assert_eq!(
            args.to_args(),
            vec!["-s", "emulator-5554", "logcat", "-v", "threadtime", "-T", "500", "--pid=4242"]
        );
    }

    #[test]
    fn test_logcat_args_tail_all_omits_flag() {
        let args = LogcatArgs {
            serial: "x".into(),
            tail: TailSize::All,
            pid: None,
        };
        assert_eq!(args.to_args(), vec!["-s", "x", "logcat", "-v", "threadtime"]);
    }

    #[test]
    fn test_logcat_args_zero_tail_is_explicit() {
        let args = LogcatArgs {
            serial: "x".into(),
            tail: TailSize::Count(0),
            pid: None,
        };
        assert!(args.to_args().windows(2).any(|w| w == ["-T", "0"]));
    }

    #[test]
    fn test_restart_args() {
        let args = LogcatArgs::restart("x", 77);
        assert_eq!(args.tail, TailSize::Count(0));
        assert_eq!(args.pid, Some(77));
    }

    #[test]
    fn test_parse_pidof_output() {
        assert_eq!(parse_pidof_output("12345\n"), Some(12345));
        assert_eq!(parse_pidof_output("12345 678\n"), Some(12345));
        assert_eq!(parse_pidof_output(""), None);
        assert_eq!(parse_pidof_output("not a pid"), None);
    }

    #[test]
    fn test_ps_output_lists_pid() {
        let alive = "USER  PID  PPID  VSZ  RSS WCHAN  ADDR S NAME\nu0_a1 4242 600 123 456 0 0 S com.example\n";
        let dead = "USER  PID  PPID  VSZ  RSS WCHAN  ADDR S NAME\n";
        assert!(ps_output_lists_pid(alive, "4242"));
        assert!(!ps_output_lists_pid(dead, "4242"));
        assert!(!ps_output_lists_pid(alive, "424"));
    }

    #[tokio::test]
    async fn test_missing_program_maps_to_adb_not_found() {
        let bridge = AdbBridge::with_program("/nonexistent/definitely-not-adb");
        let err = DeviceBridge::list_devices(&bridge).await.unwrap_err();
        assert!(matches!(err, Error::AdbNotFound));
    }
}
