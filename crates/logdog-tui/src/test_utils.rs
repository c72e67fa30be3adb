//! Test utilities for TUI rendering verification
//!
//! Wraps ratatui's TestBackend so widget and full-frame tests can render
//! and inspect the buffer without a real terminal.

use logdog_adb::Device;
use logdog_app::state::{AppState, LogArea};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 120;
pub const TEST_HEIGHT: u16 = 24;

pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    pub fn render_stateful_widget<W, S>(&mut self, widget: W, area: Rect, state: &mut S)
    where
        W: ratatui::widgets::StatefulWidget<State = S>,
    {
        self.terminal
            .draw(|frame| frame.render_stateful_widget(widget, area, state))
            .expect("Failed to render stateful widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        self.line_content(line).contains(text)
    }

    /// One row with trailing blanks trimmed
    pub fn line_content(&self, line: u16) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        if line < buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, line)].symbol());
            }
        }
        result.trim_end().to_string()
    }

    pub fn content(&self) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_device(serial: &str, model: &str) -> Device {
    Device {
        serial: serial.to_string(),
        model: model.to_string(),
        status: "device".to_string(),
    }
}

/// `count` info lines cycling through three tags
pub fn sample_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("12-14 15:31:12.345  1234  5678 I Tag{}: message {}", i % 3, i))
        .collect()
}

/// State holding `count` sample entries, laid out for the test terminal
pub fn create_test_state(count: usize) -> AppState {
    let mut state = AppState::default();
    state.ingest_lines(sample_lines(count));
    state.set_log_area(LogArea {
        top: 1,
        width: TEST_WIDTH,
        height: TEST_HEIGHT - 2,
    });
    state.refresh_view();
    state
}
