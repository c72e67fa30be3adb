//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use logdog_core::Severity;
use tracing::debug;

use crate::filter::FilterSet;
use crate::message::Message;
use crate::state::{AppPhase, AppState, SeverityPickerState, UiMode};

use super::{keys::handle_key, navigation, scroll, stream, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Click { row } => match state.ui_mode {
            UiMode::Normal => navigation::handle_click(state, row),
            _ => UpdateResult::none(),
        },

        Message::Tick => {
            state.expire_status(Instant::now());
            if state.redraw.is_due() {
                state.refresh_view();
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Stream Messages
        // ─────────────────────────────────────────────────────────
        Message::Stream(event) => stream::handle_stream_event(state, event),
        Message::StreamStarted { device } => stream::handle_stream_started(state, device),
        Message::StreamStartFailed { error, recoverable } => {
            stream::handle_stream_start_failed(state, error, recoverable)
        }

        // ─────────────────────────────────────────────────────────
        // Scroll Messages
        // ─────────────────────────────────────────────────────────
        Message::ScrollUp(n) => scroll::handle_scroll_up(state, n),
        Message::ScrollDown(n) => scroll::handle_scroll_down(state, n),
        Message::ScrollToTop => scroll::handle_scroll_to_top(state),
        Message::ScrollToBottom => scroll::handle_scroll_to_bottom(state),
        Message::PageUp => scroll::handle_page_up(state),
        Message::PageDown => scroll::handle_page_down(state),
        Message::ScrollLeft(n) => scroll::handle_scroll_left(state, n),
        Message::ScrollRight(n) => scroll::handle_scroll_right(state, n),

        // ─────────────────────────────────────────────────────────
        // Highlight / Selection Messages
        // ─────────────────────────────────────────────────────────
        Message::MoveHighlight(step) => navigation::handle_move_highlight(state, step),
        Message::EnterSelectionMode => navigation::handle_enter_selection_mode(state),
        Message::ExitSelectionMode => navigation::handle_exit_selection_mode(state),
        Message::ExtendSelection(step) => navigation::handle_extend_selection(state, step),
        Message::CopySelection { messages_only } => {
            navigation::handle_copy_selection(state, messages_only)
        }
        Message::CopyFinished { lines } => navigation::handle_copy_finished(state, lines),
        Message::CopyFailed { error } => navigation::handle_copy_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Severity Picker Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenSeverityPicker => {
            state.severity_picker = SeverityPickerState::open_at(state.view.min_severity());
            state.ui_mode = UiMode::SeverityPicker;
            UpdateResult::none()
        }
        Message::SeverityPickerMove(step) => {
            state.severity_picker.move_by(step);
            UpdateResult::none()
        }
        Message::SeverityPickerConfirm => {
            let severity = state.severity_picker.current();
            UpdateResult::message(Message::SetMinSeverity(severity))
        }
        Message::CloseSeverityPicker => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }
        Message::SetMinSeverity(severity) => handle_set_min_severity(state, severity),

        // ─────────────────────────────────────────────────────────
        // Filter Input Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenFilterInput => {
            state.filter_input = state.view.filters().to_text();
            state.ui_mode = UiMode::FilterInput;
            UpdateResult::none()
        }
        Message::FilterInput { text } => {
            state.filter_input = text;
            UpdateResult::none()
        }
        Message::ApplyFilter => handle_apply_filter(state),
        Message::CancelFilterInput => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Clear Messages
        // ─────────────────────────────────────────────────────────
        Message::RequestClear => {
            state.ui_mode = UiMode::ClearConfirm;
            UpdateResult::none()
        }
        Message::ConfirmClear => {
            state.ui_mode = UiMode::Normal;
            state.clear_logs();
            debug!("Logs cleared");
            UpdateResult::none()
        }
        Message::CancelClear => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Display Toggles
        // ─────────────────────────────────────────────────────────
        Message::ToggleTimestamp => {
            state.display.show_timestamp = !state.display.show_timestamp;
            state.refresh_view();
            UpdateResult::none()
        }
        Message::ToggleSeverityBackground => {
            state.display.severity_background = !state.display.severity_background;
            UpdateResult::none()
        }
        Message::ToggleColoredMessages => {
            state.display.colored_messages = !state.display.colored_messages;
            UpdateResult::none()
        }
        Message::ToggleWrap => {
            state.display.wrap_lines = !state.display.wrap_lines;
            if state.display.wrap_lines {
                state.log_view.h_offset = 0;
            }
            state.refresh_view();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Device Selector Messages
        // ─────────────────────────────────────────────────────────
        Message::DeviceSelectorMove(step) => {
            state.device_selector.move_by(step);
            UpdateResult::none()
        }
        Message::SelectDevice => stream::handle_select_device(state),
    }
}

fn handle_set_min_severity(state: &mut AppState, severity: Severity) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    state.view.set_min_severity(severity);
    state.refresh_view();
    debug!("Minimum severity set to {}", severity.name());
    UpdateResult::none()
}

fn handle_apply_filter(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Normal;
    let (filters, rejected) = FilterSet::parse(&state.filter_input);
    if !rejected.is_empty() {
        state.set_status(format!("Invalid pattern: {}", rejected.join(", ")), true);
    }
    state.view.set_filters(filters);
    state.refresh_view();
    UpdateResult::none()
}
