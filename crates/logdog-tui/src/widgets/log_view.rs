//! Log view widget
//!
//! Draws the rows of the render cache. Span kinds are mapped to colors here;
//! line content and wrapping were decided by the cache.

use logdog_app::format::{DisplayOptions, RenderLine, SpanKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthChar;

use super::LogViewState;
use crate::theme::styles;

pub struct LogView<'a> {
    lines: &'a [RenderLine],
    options: DisplayOptions,
    /// Shown when there are no lines at all
    empty_message: &'a str,
}

impl<'a> LogView<'a> {
    pub fn new(lines: &'a [RenderLine]) -> Self {
        Self {
            lines,
            options: DisplayOptions::default(),
            empty_message: "Waiting for logs...",
        }
    }

    pub fn options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    fn span_style(&self, kind: SpanKind) -> Style {
        match kind {
            SpanKind::Timestamp => styles::timestamp(),
            SpanKind::Tag { color } => styles::tag(color),
            SpanKind::Severity(severity) => {
                styles::severity_cell(severity, self.options.severity_background)
            }
            SpanKind::Message(severity) => {
                styles::message(severity, self.options.colored_messages)
            }
            SpanKind::Blank => Style::default(),
        }
    }

    /// Styled spans of one row, `skip` display columns cut from the left
    fn build_line(&self, line: &RenderLine, skip: usize) -> Line<'static> {
        let background = styles::line_background(line.background);
        let mut remaining = skip;
        let mut spans = Vec::with_capacity(line.spans.len());

        for span in &line.spans {
            // The row background sits under the span colors
            let style = background.patch(self.span_style(span.kind));
            if remaining == 0 {
                spans.push(Span::styled(span.text.clone(), style));
                continue;
            }
            let mut text = String::new();
            for c in span.text.chars() {
                let width = c.width().unwrap_or(0);
                if remaining == 0 {
                    text.push(c);
                } else if width > remaining {
                    // Wide char cut in half
                    text.push_str(&" ".repeat(width - remaining));
                    remaining = 0;
                } else {
                    remaining -= width;
                }
            }
            if !text.is_empty() {
                spans.push(Span::styled(text, style));
            }
        }

        Line::from(spans).style(background)
    }

    fn line_width(line: &RenderLine) -> usize {
        line.spans
            .iter()
            .map(|s| unicode_width::UnicodeWidthStr::width(s.text.as_str()))
            .sum()
    }

    /// Render the centered placeholder
    fn render_message(message: &str, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let y = area.y + area.height / 2;
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            styles::text_muted().add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

impl StatefulWidget for LogView<'_> {
    type State = LogViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.update_content_size(self.lines.len(), area.height as usize);

        if self.lines.is_empty() {
            Self::render_message(self.empty_message, area, buf);
            return;
        }

        let range = state.visible_range();
        let rows = &self.lines[range];

        // Wrapped rows always fit; only unwrapped rows scroll sideways
        let skip = if self.options.wrap_lines {
            state.h_offset = 0;
            0
        } else {
            let widest = rows.iter().map(Self::line_width).max().unwrap_or(0);
            state.update_horizontal_size(widest, area.width as usize);
            state.h_offset
        };

        for (i, row) in rows.iter().enumerate() {
            let y = area.y + i as u16;
            let row_area = Rect::new(area.x, y, area.width, 1);
            let line = self.build_line(row, skip);
            buf.set_style(row_area, line.style);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}
