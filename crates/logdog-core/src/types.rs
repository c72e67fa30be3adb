//! Core domain type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log severity, ordered from least to most severe.
///
/// `Unknown` is the sentinel for lines that could not be parsed and sorts
/// above `Fatal` so that no severity floor ever hides raw data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Unknown,
}

impl Severity {
    /// Every severity a user can pick as a floor, lowest first
    pub const SELECTABLE: [Severity; 6] = [
        Severity::Verbose,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Map a logcat priority character
    pub fn from_char(c: char) -> Self {
        match c {
            'V' => Severity::Verbose,
            'D' => Severity::Debug,
            'I' => Severity::Info,
            'W' => Severity::Warn,
            'E' => Severity::Error,
            'F' => Severity::Fatal,
            _ => Severity::Unknown,
        }
    }

    /// Single-letter code as shown in the severity column
    pub fn letter(&self) -> char {
        match self {
            Severity::Verbose => 'V',
            Severity::Debug => 'D',
            Severity::Info => 'I',
            Severity::Warn => 'W',
            Severity::Error => 'E',
            Severity::Fatal => 'F',
            Severity::Unknown => '?',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Severity::Verbose => "Verbose",
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warn => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Stable identifier of an entry within the store.
///
/// Ids increase monotonically in arrival order and are never reused, even
/// after the store is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntryId(pub u64);

impl EntryId {
    pub fn next(self) -> Self {
        EntryId(self.0 + 1)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single parsed logcat line. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogEntry {
    /// Source-native timestamp, e.g. `12-14 15:31:12.345`
    pub timestamp: String,
    pub pid: String,
    pub tid: String,
    pub severity: Severity,
    pub tag: String,
    pub message: String,
    /// The line exactly as received
    pub raw: String,
}

impl LogEntry {
    /// Entry for a line that does not have the threadtime shape
    pub fn unparsed(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            severity: Severity::Unknown,
            message: raw.clone(),
            raw,
            ..Default::default()
        }
    }

    /// True when timestamp, pid, tid, tag and severity all match
    pub fn same_origin(&self, other: &LogEntry) -> bool {
        self.timestamp == other.timestamp
            && self.pid == other.pid
            && self.tid == other.tid
            && self.tag == other.tag
            && self.severity == other.severity
    }

    /// Plain one-line form used when copying to the clipboard
    pub fn plain_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.timestamp,
            self.severity.letter(),
            self.tag,
            self.message
        )
    }
}

/// How much history logcat should replay when a stream starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailSize {
    /// Replay the whole buffer
    All,
    /// Replay at most this many recent lines (0 = only new lines)
    Count(usize),
}

impl TailSize {
    pub const DEFAULT: TailSize = TailSize::Count(1000);

    /// Decode the persisted form where `-1` means all. Other negative
    /// values fall back to the default.
    pub fn from_i64(value: i64) -> Self {
        match value {
            -1 => TailSize::All,
            n if n < 0 => TailSize::DEFAULT,
            n => TailSize::Count(n as usize),
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            TailSize::All => -1,
            TailSize::Count(n) => *n as i64,
        }
    }
}

impl Default for TailSize {
    fn default() -> Self {
        TailSize::DEFAULT
    }
}

impl FromStr for TailSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TailSize::All);
        }
        s.parse::<usize>()
            .map(TailSize::Count)
            .map_err(|_| format!("expected a line count or 'all', got '{s}'"))
    }
}

impl fmt::Display for TailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TailSize::All => write!(f, "all"),
            TailSize::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Liveness of the monitored application as seen by the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamStatus {
    Running,
    /// The target process went away; waiting for it to come back
    Stopped,
    Reconnecting,
    /// Reconnection failed; the stream is idle
    Error(String),
}

impl StreamStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StreamStatus::Running => "running",
            StreamStatus::Stopped => "stopped",
            StreamStatus::Reconnecting => "reconnecting",
            StreamStatus::Error(_) => "error",
        }
    }
}

/// Events pushed by the stream manager, in production order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A batch of raw lines
    Lines(Vec<String>),
    Status(StreamStatus),
}
