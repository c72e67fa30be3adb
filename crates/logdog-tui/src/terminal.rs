//! Terminal setup and restoration

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use logdog_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_mouse_capture();
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Start receiving click and wheel events
pub fn enable_mouse_capture() -> Result<()> {
    execute!(std::io::stdout(), EnableMouseCapture)
        .map_err(|e| Error::terminal(format!("failed to enable mouse capture: {e}")))
}

pub fn disable_mouse_capture() -> Result<()> {
    execute!(std::io::stdout(), DisableMouseCapture)
        .map_err(|e| Error::terminal(format!("failed to disable mouse capture: {e}")))
}
