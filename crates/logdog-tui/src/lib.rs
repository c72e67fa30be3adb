//! logdog-tui - Terminal UI for logdog
//!
//! This crate provides the ratatui-based terminal interface. It drives the
//! TEA state from logdog-app and adds terminal rendering, event polling,
//! clipboard access and the stream manager plumbing.

pub mod actions;
pub mod clipboard;
pub mod event;
pub mod layout;
pub mod process;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use clipboard::{Clipboard, SystemClipboard};
pub use runner::{run, Startup};
