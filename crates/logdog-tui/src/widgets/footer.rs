//! Footer bar: key hints, prompts and transient status messages

use logdog_app::state::{StatusMessage, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

const NORMAL_HINTS: &str =
    "q: quit | c: clear | v: select | l: log level | f: filter | t/b/m/w: display";
const SELECTION_HINTS: &str = "j/k: extend | c: copy lines | C: copy messages | esc: cancel";
const FILTER_HINTS: &str = "comma-separated, tag: prefix for tags | enter: apply | esc: cancel";
const CLEAR_HINTS: &str = "y: clear | n: cancel | esc: cancel";
const PICKER_HINTS: &str = "v/d/i/w/e/f or j/k + enter: set level | esc: cancel";
const DEVICE_HINTS: &str = "j/k: move | enter: stream from device | q: quit";

pub struct Footer<'a> {
    mode: UiMode,
    status: Option<&'a StatusMessage>,
    filter_input: &'a str,
    /// Selected count while in selection mode
    selection: Option<usize>,
}

impl<'a> Footer<'a> {
    pub fn new(mode: UiMode) -> Self {
        Self {
            mode,
            status: None,
            filter_input: "",
            selection: None,
        }
    }

    pub fn status(mut self, status: Option<&'a StatusMessage>) -> Self {
        self.status = status;
        self
    }

    pub fn filter_input(mut self, text: &'a str) -> Self {
        self.filter_input = text;
        self
    }

    pub fn selection(mut self, selected: Option<usize>) -> Self {
        self.selection = selected;
        self
    }

    fn prompt(label: &'static str, input: Option<&str>, hints: &'static str) -> Line<'static> {
        let mut spans = vec![Span::styled(label, styles::accent_bold())];
        if let Some(input) = input {
            spans.push(Span::styled(input.to_string(), styles::text_primary()));
            spans.push(Span::styled("_", styles::accent()));
        }
        spans.push(Span::styled(format!("  {hints}"), styles::text_muted()));
        Line::from(spans)
    }

    fn build_line(&self) -> Line<'static> {
        match self.mode {
            UiMode::FilterInput => {
                return Self::prompt("filter: ", Some(self.filter_input), FILTER_HINTS)
            }
            UiMode::ClearConfirm => return Self::prompt("clear log?", None, CLEAR_HINTS),
            UiMode::SeverityPicker => return Self::prompt("log level", None, PICKER_HINTS),
            UiMode::DeviceSelect if self.status.is_none() => {
                return Self::prompt("select a device", None, DEVICE_HINTS)
            }
            UiMode::DeviceSelect | UiMode::Normal => {}
        }

        if let Some(status) = self.status {
            let style = if status.is_error {
                styles::status_red()
            } else {
                styles::status_green()
            };
            return Line::from(Span::styled(status.text.clone(), style));
        }

        match self.selection {
            Some(count) => Line::from(vec![
                Span::styled(format!("SELECTION ({count})"), styles::accent_bold()),
                Span::styled(format!(" | {SELECTION_HINTS}"), styles::text_muted()),
            ]),
            None => Line::from(Span::styled(NORMAL_HINTS, styles::text_muted())),
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 2 {
            return;
        }
        let line = self.build_line();
        // One column of left padding
        buf.set_line(area.x + 1, area.y, &line, area.width - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use std::time::Instant;

    fn render(footer: Footer<'_>) -> TestTerminal {
        let mut term = TestTerminal::with_size(100, 1);
        term.render_widget(footer, term.area());
        term
    }

    #[test]
    fn test_normal_hints() {
        let term = render(Footer::new(UiMode::Normal));
        assert!(term.buffer_contains("q: quit"));
        assert!(term.buffer_contains("l: log level"));
    }

    #[test]
    fn test_selection_hints_show_count() {
        let term = render(Footer::new(UiMode::Normal).selection(Some(4)));
        assert!(term.buffer_contains("SELECTION (4)"));
        assert!(term.buffer_contains("C: copy messages"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let status = StatusMessage {
            text: "Copied 3 lines".to_string(),
            is_error: false,
            shown_at: Instant::now(),
        };
        let term = render(Footer::new(UiMode::Normal).status(Some(&status)));
        assert!(term.buffer_contains("Copied 3 lines"));
        assert!(!term.buffer_contains("q: quit"));
    }

    #[test]
    fn test_device_prompt_shows_start_error() {
        let term = render(Footer::new(UiMode::DeviceSelect));
        assert!(term.buffer_contains("select a device"));

        let status = StatusMessage {
            text: "app not running".to_string(),
            is_error: true,
            shown_at: Instant::now(),
        };
        let term = render(Footer::new(UiMode::DeviceSelect).status(Some(&status)));
        assert!(term.buffer_contains("app not running"));
        assert!(!term.buffer_contains("select a device"));
    }

    #[test]
    fn test_filter_prompt_shows_input() {
        let term = render(Footer::new(UiMode::FilterInput).filter_input("tag:Net"));
        assert!(term.buffer_contains("filter: tag:Net_"));
        assert!(term.buffer_contains("enter: apply"));
    }

    #[test]
    fn test_clear_prompt() {
        let term = render(Footer::new(UiMode::ClearConfirm));
        assert!(term.buffer_contains("clear log?"));
        assert!(term.buffer_contains("y: clear"));
    }
}
