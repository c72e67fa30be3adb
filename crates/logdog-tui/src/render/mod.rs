//! Main render/view function (View in TEA pattern)


use super::{layout, widgets};
use logdog_app::state::{AppState, LogArea, UiMode};
use ratatui::Frame;

/// Render the complete UI (View function in TEA)
///
/// Besides drawing, this reports the log area size to the state so the
/// render cache wraps to the current width and scroll bounds stay correct.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let areas = layout::create(area);

    state.set_log_area(LogArea {
        top: areas.logs.y,
        width: areas.logs.width,
        height: areas.logs.height,
    });

    let header = widgets::Header::new(&state.view)
        .app(state.app_id.as_deref(), state.stream_status.as_ref())
        .device(state.device.as_ref());
    frame.render_widget(header, areas.header);

    let empty_message = if state.store.is_empty() {
        "Waiting for logs..."
    } else {
        "No entries match the current level and filters"
    };
    let log_view = widgets::LogView::new(state.render.lines())
        .options(state.display)
        .empty_message(empty_message);
    frame.render_stateful_widget(log_view, areas.logs, &mut state.log_view);

    let selection = state
        .selection
        .is_selection_mode()
        .then(|| state.selection.selected_count());
    let footer = widgets::Footer::new(state.ui_mode)
        .status(state.status_message.as_ref())
        .filter_input(&state.filter_input)
        .selection(selection);
    frame.render_widget(footer, areas.footer);

    // Modal overlays based on UI mode
    match state.ui_mode {
        UiMode::SeverityPicker => {
            let picker =
                widgets::SeverityPicker::new(&state.severity_picker, state.view.min_severity());
            frame.render_widget(picker, areas.logs);
        }
        UiMode::DeviceSelect => {
            frame.render_widget(widgets::DeviceList::new(&state.device_selector), areas.logs);
        }
        UiMode::Normal | UiMode::FilterInput | UiMode::ClearConfirm => {}
    }
}
