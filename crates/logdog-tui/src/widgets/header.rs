//! Header bar: severity floor, filters, followed app and device

use logdog_adb::Device;
use logdog_app::filter::ViewFilter;
use logdog_core::StreamStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

const SEPARATOR: &str = " | ";

pub struct Header<'a> {
    view: &'a ViewFilter,
    app_id: Option<&'a str>,
    stream_status: Option<&'a StreamStatus>,
    device: Option<&'a Device>,
}

impl<'a> Header<'a> {
    pub fn new(view: &'a ViewFilter) -> Self {
        Self {
            view,
            app_id: None,
            stream_status: None,
            device: None,
        }
    }

    /// Followed application and its liveness
    pub fn app(mut self, app_id: Option<&'a str>, status: Option<&'a StreamStatus>) -> Self {
        self.app_id = app_id;
        self.stream_status = status;
        self
    }

    pub fn device(mut self, device: Option<&'a Device>) -> Self {
        self.device = device;
        self
    }

    fn build_line(&self) -> Line<'static> {
        let severity = self.view.min_severity();
        let mut spans = vec![
            Span::styled("log level: ", styles::text_muted()),
            Span::styled(
                format!("{}+", severity.name()),
                Style::default().fg(styles::severity_color(severity)),
            ),
        ];

        let filters = self.view.filters().filters();
        if !filters.is_empty() {
            spans.push(Span::styled(SEPARATOR, styles::text_muted()));
            spans.push(Span::styled("filters: ", styles::text_muted()));
            for (i, filter) in filters.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                let text = if filter.is_tag {
                    format!("tag:{}", filter.pattern)
                } else {
                    filter.pattern.clone()
                };
                spans.push(Span::styled(format!(" {text} "), styles::filter_badge(&text)));
            }
        }

        spans.push(Span::styled(SEPARATOR, styles::text_muted()));
        spans.push(Span::styled("app: ", styles::text_muted()));
        match self.app_id {
            Some(app_id) => {
                spans.push(Span::styled(app_id.to_string(), styles::accent()));
                let (label, style) = match self.stream_status {
                    Some(status) => (status.label(), styles::stream_status(status)),
                    None => ("waiting", styles::text_muted()),
                };
                spans.push(Span::raw(" ("));
                spans.push(Span::styled(label, style));
                spans.push(Span::raw(")"));
            }
            None => spans.push(Span::styled("all", styles::accent())),
        }

        if let Some(device) = self.device {
            spans.push(Span::styled(SEPARATOR, styles::text_muted()));
            spans.push(Span::styled("device: ", styles::text_muted()));
            spans.push(Span::styled(device.model.clone(), styles::accent()));
        }

        Line::from(spans)
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let line = self.build_line();
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
