//! User preferences persisted between runs
//!
//! Stored as TOML at `<config dir>/logdog/config.toml`.

pub mod preferences;

pub use preferences::{
    load_preferences, preferences_dir, save_preferences, Preferences, CONFIG_FILENAME,
};
