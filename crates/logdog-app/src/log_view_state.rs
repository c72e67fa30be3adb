//! Log view state - scroll position and viewport bounds.
//!
//! Shared by the handler layer (scroll commands, keeping the highlight on
//! screen) and the TUI layer (which reports the viewport size on render).

use std::ops::Range;

// ─────────────────────────────────────────────────────────────────────────────
// LogViewState
// ─────────────────────────────────────────────────────────────────────────────

/// Scroll state of the log area, measured in render lines
#[derive(Debug)]
pub struct LogViewState {
    /// Current vertical scroll offset from top
    pub offset: usize,
    /// Current horizontal scroll offset from left (only used without wrap)
    pub h_offset: usize,
    /// Whether auto-scroll is enabled (follow new content)
    pub auto_scroll: bool,
    /// Total number of lines (set on refresh)
    pub total_lines: usize,
    /// Visible lines (set during render)
    pub visible_lines: usize,
    /// Visible width in columns (set during render)
    pub visible_width: usize,
    /// Widest line in the cache, for h-scroll bounds
    pub max_line_width: usize,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            h_offset: 0,
            auto_scroll: true,
            total_lines: 0,
            visible_lines: 0,
            visible_width: 0,
            max_line_width: 0,
        }
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    /// Line indices currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.visible_lines).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
        self.auto_scroll = false;
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize) {
        let max_offset = self.max_offset();
        self.offset = (self.offset + n).min(max_offset);

        // Re-enable auto-scroll if at bottom
        if self.offset >= max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_scroll = false;
    }

    /// Scroll to bottom and enable auto-scroll
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_scroll = true;
    }

    pub fn page_up(&mut self) {
        let page = self.visible_lines.saturating_sub(2);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_lines.saturating_sub(2);
        self.scroll_down(page);
    }

    /// Update with new content size
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_lines = total;
        self.visible_lines = visible;

        if self.auto_scroll {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll the minimum needed to bring `lines` on screen.
    ///
    /// A range taller than the viewport is aligned to its first line.
    pub fn ensure_lines_visible(&mut self, lines: Range<usize>) {
        if lines.is_empty() || self.visible_lines == 0 {
            return;
        }
        let bottom = self.offset + self.visible_lines;
        if lines.start < self.offset {
            self.offset = lines.start;
        } else if lines.end > bottom {
            let len = lines.end - lines.start;
            self.offset = if len > self.visible_lines {
                lines.start
            } else {
                lines.end - self.visible_lines
            };
        } else {
            return;
        }
        self.offset = self.offset.min(self.max_offset());
        self.auto_scroll = false;
    }

    /// Center `line` when it is off screen. No-op when already visible.
    pub fn center_on_line(&mut self, line: usize) {
        if self.visible_range().contains(&line) {
            return;
        }
        self.offset = line
            .saturating_sub(self.visible_lines / 2)
            .min(self.max_offset());
        self.auto_scroll = false;
    }

    /// Scroll left by n columns
    pub fn scroll_left(&mut self, n: usize) {
        self.h_offset = self.h_offset.saturating_sub(n);
    }

    /// Scroll right by n columns
    pub fn scroll_right(&mut self, n: usize) {
        let max_h_offset = self.max_line_width.saturating_sub(self.visible_width);
        self.h_offset = (self.h_offset + n).min(max_h_offset);
    }

    /// Update horizontal content dimensions
    pub fn update_horizontal_size(&mut self, max_width: usize, visible_width: usize) {
        self.max_line_width = max_width;
        self.visible_width = visible_width;

        // Clamp h_offset if content shrank
        let max_h_offset = max_width.saturating_sub(visible_width);
        if self.h_offset > max_h_offset {
            self.h_offset = max_h_offset;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn view(total: usize, visible: usize) -> LogViewState {
        let mut state = LogViewState::new();
        state.update_content_size(total, visible);
        state
    }

    #[test]
    fn test_auto_scroll_follows_bottom() {
        let mut state = view(100, 10);
        assert_eq!(state.offset, 90);
        state.update_content_size(150, 10);
        assert_eq!(state.offset, 140);
    }

    #[test]
    fn test_scroll_up_disengages_and_bottom_reengages() {
        let mut state = view(100, 10);
        state.scroll_up(5);
        assert!(!state.auto_scroll);
        state.update_content_size(200, 10);
        assert_eq!(state.offset, 85);

        state.scroll_down(1000);
        assert!(state.auto_scroll);
        assert_eq!(state.offset, 190);
    }

    #[test]
    fn test_content_shrink_clamps_offset() {
        let mut state = view(100, 10);
        state.scroll_up(10);
        state.update_content_size(20, 10);
        assert_eq!(state.offset, 10);
        state.update_content_size(5, 10);
        assert_eq!(state.offset, 0);
        assert_eq!(state.visible_range(), 0..5);
    }

    #[test]
    fn test_page_moves_by_viewport_minus_two() {
        let mut state = view(100, 10);
        state.page_up();
        assert_eq!(state.offset, 82);
        state.page_down();
        assert_eq!(state.offset, 90);
    }

    #[test]
    fn test_top_and_bottom() {
        let mut state = view(100, 10);
        state.scroll_to_top();
        assert_eq!(state.offset, 0);
        assert!(!state.auto_scroll);
        state.scroll_to_bottom();
        assert_eq!(state.offset, 90);
        assert!(state.auto_scroll);
    }

    #[test]
    fn test_ensure_lines_visible_is_minimal() {
        let mut state = view(100, 10);
        state.scroll_to_top();

        state.ensure_lines_visible(3..4);
        assert_eq!(state.offset, 0);

        state.ensure_lines_visible(12..14);
        assert_eq!(state.offset, 4);

        state.ensure_lines_visible(2..3);
        assert_eq!(state.offset, 2);

        // taller than the viewport: align to its start
        state.ensure_lines_visible(30..50);
        assert_eq!(state.offset, 30);
    }

    #[test]
    fn test_center_on_line() {
        let mut state = view(100, 10);
        state.scroll_to_top();
        state.center_on_line(50);
        assert_eq!(state.offset, 45);
        assert!(!state.auto_scroll);

        state.center_on_line(48);
        assert_eq!(state.offset, 45);

        state.center_on_line(99);
        assert_eq!(state.offset, 90);
    }

    #[test]
    fn test_horizontal_scroll_bounds() {
        let mut state = view(10, 10);
        state.update_horizontal_size(120, 80);
        state.scroll_right(100);
        assert_eq!(state.h_offset, 40);
        state.update_horizontal_size(90, 80);
        assert_eq!(state.h_offset, 10);
        state.scroll_left(50);
        assert_eq!(state.h_offset, 0);
    }
}
