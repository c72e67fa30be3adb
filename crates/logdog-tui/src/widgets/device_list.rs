//! Device selector overlay shown when several devices are online

use logdog_app::state::DeviceSelectorState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay::{centered_rect, clear_area};
use crate::theme::styles;

const MIN_WIDTH: u16 = 30;

pub struct DeviceList<'a> {
    state: &'a DeviceSelectorState,
}

impl<'a> DeviceList<'a> {
    pub fn new(state: &'a DeviceSelectorState) -> Self {
        Self { state }
    }
}

impl Widget for DeviceList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let names: Vec<String> = self
            .state
            .devices
            .iter()
            .map(|d| d.display_name())
            .collect();
        let widest = names.iter().map(|n| n.len()).max().unwrap_or(0) as u16;
        let width = (widest + 6).max(MIN_WIDTH);
        let height = names.len().max(1) as u16 + 2;

        let modal = centered_rect(width, height, area);
        clear_area(buf, modal);
        let block = styles::modal_block(" select device ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        if names.is_empty() {
            Paragraph::new(Span::styled("no devices", styles::text_muted())).render(inner, buf);
            return;
        }

        let lines: Vec<Line> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                if i == self.state.selected {
                    Line::from(vec![
                        Span::styled("> ", styles::accent()),
                        Span::styled(name, styles::accent().add_modifier(Modifier::BOLD)),
                    ])
                } else {
                    Line::from(vec![Span::raw("  "), Span::styled(name, styles::text_primary())])
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
