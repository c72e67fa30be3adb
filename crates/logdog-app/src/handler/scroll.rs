//! Scroll message handlers
//!
//! Handles vertical and horizontal scrolling in the log view.

use crate::state::AppState;

use super::UpdateResult;

pub fn handle_scroll_up(state: &mut AppState, n: usize) -> UpdateResult {
    state.log_view.scroll_up(n);
    UpdateResult::none()
}

pub fn handle_scroll_down(state: &mut AppState, n: usize) -> UpdateResult {
    state.log_view.scroll_down(n);
    UpdateResult::none()
}

pub fn handle_scroll_to_top(state: &mut AppState) -> UpdateResult {
    state.log_view.scroll_to_top();
    UpdateResult::none()
}

/// Jump to the newest line and follow the stream again
pub fn handle_scroll_to_bottom(state: &mut AppState) -> UpdateResult {
    state.refresh_view();
    state.log_view.scroll_to_bottom();
    UpdateResult::none()
}

pub fn handle_page_up(state: &mut AppState) -> UpdateResult {
    state.log_view.page_up();
    UpdateResult::none()
}

pub fn handle_page_down(state: &mut AppState) -> UpdateResult {
    state.log_view.page_down();
    UpdateResult::none()
}

pub fn handle_scroll_left(state: &mut AppState, n: usize) -> UpdateResult {
    state.log_view.scroll_left(n);
    UpdateResult::none()
}

pub fn handle_scroll_right(state: &mut AppState, n: usize) -> UpdateResult {
    state.log_view.scroll_right(n);
    UpdateResult::none()
}
