//! Message types for the application (TEA pattern)

use logdog_adb::Device;
use logdog_core::{Severity, StreamEvent};

use crate::input_key::InputKey;
use crate::selection::Step;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Left click at an absolute terminal row
    Click { row: u16 },

    /// Tick event for periodic updates
    Tick,

    /// Quit now (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Stream Messages
    // ─────────────────────────────────────────────────────────
    /// Batch of lines or a status change from the stream manager
    Stream(StreamEvent),

    /// The stream manager started on a device
    StreamStarted { device: Device },

    /// The stream manager could not start. `recoverable` failures are tied
    /// to the chosen device, so another device may still work.
    StreamStartFailed { error: String, recoverable: bool },

    // ─────────────────────────────────────────────────────────
    // Scroll Messages
    // ─────────────────────────────────────────────────────────
    ScrollUp(usize),
    ScrollDown(usize),
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,
    ScrollLeft(usize),
    ScrollRight(usize),

    // ─────────────────────────────────────────────────────────
    // Highlight / Selection Messages
    // ─────────────────────────────────────────────────────────
    MoveHighlight(Step),
    EnterSelectionMode,
    /// Leave selection mode, dropping selection and highlight
    ExitSelectionMode,
    ExtendSelection(Step),
    /// Copy selected entries (or the highlight) to the clipboard
    CopySelection { messages_only: bool },
    CopyFinished { lines: usize },
    CopyFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Severity Picker Messages
    // ─────────────────────────────────────────────────────────
    OpenSeverityPicker,
    SeverityPickerMove(Step),
    /// Apply the entry under the picker cursor
    SeverityPickerConfirm,
    CloseSeverityPicker,
    SetMinSeverity(Severity),

    // ─────────────────────────────────────────────────────────
    // Filter Input Messages
    // ─────────────────────────────────────────────────────────
    OpenFilterInput,
    /// Replace the filter input text
    FilterInput { text: String },
    ApplyFilter,
    CancelFilterInput,

    // ─────────────────────────────────────────────────────────
    // Clear Messages
    // ─────────────────────────────────────────────────────────
    RequestClear,
    ConfirmClear,
    CancelClear,

    // ─────────────────────────────────────────────────────────
    // Display Toggles
    // ─────────────────────────────────────────────────────────
    ToggleTimestamp,
    ToggleSeverityBackground,
    ToggleColoredMessages,
    ToggleWrap,

    // ─────────────────────────────────────────────────────────
    // Device Selector Messages
    // ─────────────────────────────────────────────────────────
    DeviceSelectorMove(Step),
    SelectDevice,
}
