//! Preferences file loading and saving

use std::path::{Path, PathBuf};

use logdog_core::prelude::*;
use logdog_core::{Severity, TailSize};
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;
use crate::format::{DisplayOptions, DEFAULT_TAG_WIDTH};
use crate::store::DEFAULT_MAX_ENTRIES;

pub const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "logdog";

/// Everything remembered between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub min_severity: Severity,
    pub filters: Vec<FilterSpec>,
    pub show_timestamp: bool,
    pub severity_background: bool,
    pub colored_messages: bool,
    pub wrap_lines: bool,
    pub tag_column_width: usize,
    /// Lines of history replayed on start; -1 replays everything
    pub tail_size: i64,
    /// Retention bound for the entry store; 0 keeps everything
    pub max_entries: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            min_severity: Severity::Verbose,
            filters: Vec::new(),
            show_timestamp: true,
            severity_background: true,
            colored_messages: false,
            wrap_lines: true,
            tag_column_width: DEFAULT_TAG_WIDTH,
            tail_size: TailSize::DEFAULT.as_i64(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Preferences {
    pub fn tail(&self) -> TailSize {
        TailSize::from_i64(self.tail_size)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_timestamp: self.show_timestamp,
            severity_background: self.severity_background,
            colored_messages: self.colored_messages,
            wrap_lines: self.wrap_lines,
            tag_width: self.tag_column_width.max(1),
        }
    }

    /// Copy display toggles back in
    pub fn set_display_options(&mut self, options: &DisplayOptions) {
        self.show_timestamp = options.show_timestamp;
        self.severity_background = options.severity_background;
        self.colored_messages = options.colored_messages;
        self.wrap_lines = options.wrap_lines;
        self.tag_column_width = options.tag_width;
    }
}

/// Default directory holding the preferences file
pub fn preferences_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Load preferences from `dir/config.toml`.
///
/// A missing or unreadable file yields the defaults.
pub fn load_preferences(dir: &Path) -> Preferences {
    let path = dir.join(CONFIG_FILENAME);

    if !path.exists() {
        debug!("No preferences at {:?}, using defaults", path);
        return Preferences::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(prefs) => {
                debug!("Loaded preferences from {:?}", path);
                prefs
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Preferences::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Preferences::default()
        }
    }
}

/// Save preferences to `dir/config.toml`.
///
/// Writes a temp file and renames it over the old one.
pub fn save_preferences(dir: &Path, prefs: &Preferences) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let path = dir.join(CONFIG_FILENAME);
    let temp_path = dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(prefs)
        .map_err(|e| Error::config(format!("Failed to serialize preferences: {}", e)))?;
    let full_content = format!("# logdog preferences\n# Saved on exit\n\n{}", content);

    std::fs::write(&temp_path, &full_content).context("Failed to write temp preferences")?;
    std::fs::rename(&temp_path, &path).context("Failed to replace preferences")?;

    info!("Saved preferences to {:?}", path);
    Ok(())
}
