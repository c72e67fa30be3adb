//! Severity floor picker overlay

use logdog_app::state::SeverityPickerState;
use logdog_core::Severity;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay::{centered_rect, clear_area};
use crate::theme::styles;

const WIDTH: u16 = 24;

pub struct SeverityPicker<'a> {
    state: &'a SeverityPickerState,
    current: Severity,
}

impl<'a> SeverityPicker<'a> {
    pub fn new(state: &'a SeverityPickerState, current: Severity) -> Self {
        Self { state, current }
    }
}

impl Widget for SeverityPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = Severity::SELECTABLE.len() as u16 + 2;
        let modal = centered_rect(WIDTH, height, area);
        clear_area(buf, modal);

        let block = styles::modal_block(" log level ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let lines: Vec<Line> = Severity::SELECTABLE
            .iter()
            .enumerate()
            .map(|(i, severity)| {
                let cursor = if i == self.state.index { "> " } else { "  " };
                let mut style = Style::default().fg(styles::severity_color(*severity));
                if i == self.state.index {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                let marker = if *severity == self.current { " *" } else { "" };
                Line::from(vec![
                    Span::styled(cursor, styles::accent()),
                    Span::styled(
                        format!("{} {}", severity.letter().to_ascii_lowercase(), severity.name()),
                        style,
                    ),
                    Span::styled(marker, styles::text_muted()),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_lists_all_levels_with_cursor() {
        let state = SeverityPickerState::open_at(Severity::Warn);
        let mut term = TestTerminal::with_size(60, 12);
        term.render_widget(SeverityPicker::new(&state, Severity::Warn), term.area());

        for name in ["Verbose", "Debug", "Info", "Warning", "Error", "Fatal"] {
            assert!(term.buffer_contains(name), "missing {name}");
        }
        assert!(term.buffer_contains("> w Warning *"));
        assert!(term.buffer_contains("log level"));
    }
}
