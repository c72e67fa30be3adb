//! Highlight, selection and copy handlers

use logdog_core::EntryId;

use crate::selection::Step;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_move_highlight(state: &mut AppState, step: Step) -> UpdateResult {
    let visible = state.visible_entries();
    if let Some(id) = state.selection.move_highlight(step, &visible) {
        state.reveal_entry(id);
    } else {
        state.log_view.auto_scroll = false;
    }
    UpdateResult::none()
}

pub fn handle_enter_selection_mode(state: &mut AppState) -> UpdateResult {
    let visible = state.visible_entries();
    if let Some(anchor) = state.selection.enter_selection_mode(&visible) {
        state.reveal_entry(anchor);
    }
    UpdateResult::none()
}

pub fn handle_exit_selection_mode(state: &mut AppState) -> UpdateResult {
    state.selection.exit_selection_mode();
    state.refresh_view();
    UpdateResult::none()
}

pub fn handle_extend_selection(state: &mut AppState, step: Step) -> UpdateResult {
    let visible = state.visible_entries();
    state.log_view.auto_scroll = false;
    if let Some(id) = state.selection.extend_selection(step, &visible) {
        state.reveal_entry(id);
    } else {
        state.refresh_view();
    }
    UpdateResult::none()
}

/// Click on a log row: highlight it, or extend the selection to it
pub fn handle_click(state: &mut AppState, row: u16) -> UpdateResult {
    let Some(id) = state.entry_at_row(row) else {
        return UpdateResult::none();
    };
    state.log_view.auto_scroll = false;
    if state.selection.is_selection_mode() {
        let visible = state.visible_entries();
        state.selection.extend_selection_to(id, &visible);
    } else {
        state.selection.set_highlight(Some(id));
    }
    state.refresh_view();
    UpdateResult::none()
}

/// Build the clipboard text for the selection, falling back to the
/// highlighted entry.
pub fn handle_copy_selection(state: &mut AppState, messages_only: bool) -> UpdateResult {
    let visible = state.visible_entries();
    let ids = state.selection.selected_in_order(&visible);
    if ids.is_empty() {
        state.set_status("Nothing selected", false);
        return UpdateResult::none();
    }
    let text = copy_text(state, &ids, messages_only);

    if state.selection.is_selection_mode() {
        state.selection.finish_selection();
        state.refresh_view();
    }

    UpdateResult::action(UpdateAction::CopyToClipboard {
        text,
        lines: ids.len(),
    })
}

fn copy_text(state: &AppState, ids: &[EntryId], messages_only: bool) -> String {
    ids.iter()
        .filter_map(|id| state.store.get(*id))
        .map(|entry| {
            if messages_only {
                entry.message.clone()
            } else {
                entry.plain_line()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn handle_copy_finished(state: &mut AppState, lines: usize) -> UpdateResult {
    let noun = if lines == 1 { "line" } else { "lines" };
    state.set_status(format!("Copied {} {}", lines, noun), false);
    UpdateResult::none()
}

pub fn handle_copy_failed(state: &mut AppState, error: String) -> UpdateResult {
    tracing::warn!("Clipboard copy failed: {}", error);
    state.set_status(format!("Copy failed: {}", error), true);
    UpdateResult::none()
}
