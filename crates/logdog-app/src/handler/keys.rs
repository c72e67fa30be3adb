//! Key event handlers for different UI modes

use logdog_core::Severity;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::selection::Step;
use crate::state::{AppState, UiMode};

/// Columns moved per horizontal scroll key press
const H_SCROLL_STEP: usize = 8;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::SeverityPicker => handle_key_severity_picker(key),
        UiMode::FilterInput => handle_key_filter_input(state, key),
        UiMode::ClearConfirm => handle_key_clear_confirm(key),
        UiMode::DeviceSelect => handle_key_device_select(key),
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    let selecting = state.selection.is_selection_mode();
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Char('l') => Some(Message::OpenSeverityPicker),
        InputKey::Char('f') => Some(Message::OpenFilterInput),

        // Highlight and selection
        InputKey::Char('v') => Some(Message::EnterSelectionMode),
        InputKey::Esc => Some(Message::ExitSelectionMode),
        InputKey::Char('j') | InputKey::Down if selecting => {
            Some(Message::ExtendSelection(Step::Down))
        }
        InputKey::Char('k') | InputKey::Up if selecting => Some(Message::ExtendSelection(Step::Up)),
        InputKey::Char('j') | InputKey::Down => Some(Message::MoveHighlight(Step::Down)),
        InputKey::Char('k') | InputKey::Up => Some(Message::MoveHighlight(Step::Up)),

        // 'c' copies while selecting, otherwise asks to clear
        InputKey::Char('c') if selecting => Some(Message::CopySelection {
            messages_only: false,
        }),
        InputKey::Char('c') => Some(Message::RequestClear),
        InputKey::Char('C') => Some(Message::CopySelection {
            messages_only: true,
        }),

        // Scrolling
        InputKey::Char('g') | InputKey::Home => Some(Message::ScrollToTop),
        InputKey::Char('G') | InputKey::End => Some(Message::ScrollToBottom),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::Left if !state.display.wrap_lines => Some(Message::ScrollLeft(H_SCROLL_STEP)),
        InputKey::Right if !state.display.wrap_lines => {
            Some(Message::ScrollRight(H_SCROLL_STEP))
        }

        // Display toggles
        InputKey::Char('t') => Some(Message::ToggleTimestamp),
        InputKey::Char('b') => Some(Message::ToggleSeverityBackground),
        InputKey::Char('m') => Some(Message::ToggleColoredMessages),
        InputKey::Char('w') => Some(Message::ToggleWrap),

        _ => None,
    }
}

fn handle_key_severity_picker(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseSeverityPicker),
        InputKey::Enter => Some(Message::SeverityPickerConfirm),
        InputKey::Up | InputKey::Char('k') => Some(Message::SeverityPickerMove(Step::Up)),
        InputKey::Down | InputKey::Char('j') => Some(Message::SeverityPickerMove(Step::Down)),
        InputKey::Char(c @ ('v' | 'd' | 'i' | 'w' | 'e' | 'f')) => Some(Message::SetMinSeverity(
            Severity::from_char(c.to_ascii_uppercase()),
        )),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_filter_input(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelFilterInput),
        InputKey::Enter => Some(Message::ApplyFilter),
        InputKey::Backspace => {
            let mut text = state.filter_input.clone();
            text.pop();
            Some(Message::FilterInput { text })
        }
        // Clear all input
        InputKey::CharCtrl('u') => Some(Message::FilterInput {
            text: String::new(),
        }),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char(c) => {
            let mut text = state.filter_input.clone();
            text.push(c);
            Some(Message::FilterInput { text })
        }
        _ => None,
    }
}

fn handle_key_clear_confirm(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') => Some(Message::ConfirmClear),
        InputKey::Char('n' | 'N') | InputKey::Esc | InputKey::Enter => Some(Message::CancelClear),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_device_select(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Enter => Some(Message::SelectDevice),
        InputKey::Up | InputKey::Char('k') => Some(Message::DeviceSelectorMove(Step::Up)),
        InputKey::Down | InputKey::Char('j') => Some(Message::DeviceSelectorMove(Step::Down)),
        _ => None,
    }
}
