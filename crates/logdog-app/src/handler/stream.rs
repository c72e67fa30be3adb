//! Stream manager event handlers

use logdog_adb::Device;
use logdog_core::{StreamEvent, StreamStatus};

use crate::state::{AppPhase, AppState, UiMode};

use super::{UpdateAction, UpdateResult};

pub fn handle_stream_event(state: &mut AppState, event: StreamEvent) -> UpdateResult {
    match event {
        StreamEvent::Lines(lines) => {
            state.ingest_lines(lines);
        }
        StreamEvent::Status(status) => {
            tracing::info!("Stream status: {}", status.label());
            if let StreamStatus::Error(message) = &status {
                state.set_status(format!("Reconnect failed: {}", message), true);
            }
            state.stream_status = Some(status);
        }
    }
    UpdateResult::none()
}

pub fn handle_stream_started(state: &mut AppState, device: Device) -> UpdateResult {
    tracing::info!("Streaming from {}", device.display_name());
    state.device = Some(device);
    if state.stream_status.is_none() {
        state.stream_status = Some(StreamStatus::Running);
    }
    UpdateResult::none()
}

/// A recoverable failure after picking from the device list goes back to
/// the list. Anything else ends the session; the error is printed after
/// the terminal is restored.
pub fn handle_stream_start_failed(
    state: &mut AppState,
    error: String,
    recoverable: bool,
) -> UpdateResult {
    tracing::error!("Failed to start stream: {}", error);
    if recoverable && state.device_selector.devices.len() > 1 {
        state.device = None;
        state.ui_mode = UiMode::DeviceSelect;
        state.set_status(error, true);
        return UpdateResult::none();
    }
    state.exit_error = Some(error);
    state.phase = AppPhase::Quitting;
    UpdateResult::none()
}

pub fn handle_select_device(state: &mut AppState) -> UpdateResult {
    let Some(device) = state.device_selector.selected_device().cloned() else {
        return UpdateResult::none();
    };
    state.ui_mode = UiMode::Normal;
    let serial = device.serial.clone();
    state.device = Some(device);
    UpdateResult::action(UpdateAction::StartStream {
        serial: Some(serial),
    })
}
