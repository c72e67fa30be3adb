//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Severity floor, filters, app and device
    pub header: Rect,

    /// Log rows
    pub logs: Rect,

    /// Key hints or the transient status message
    pub footer: Rect,
}

/// Split the terminal into a one-row header, the log area and a one-row footer
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        logs: chunks[1],
        footer: chunks[2],
    }
}
