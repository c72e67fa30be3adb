//! Application state (Model in TEA pattern)

use std::time::{Duration, Instant};

use logdog_adb::Device;
use logdog_core::{EntryId, Severity, StreamStatus, TailSize};

use crate::config::Preferences;
use crate::filter::{visible_ids, FilterSet, ViewFilter};
use crate::format::DisplayOptions;
use crate::log_view_state::LogViewState;
use crate::redraw::RedrawScheduler;
use crate::render::{RenderCache, RenderInput, RenderUpdate};
use crate::selection::{SelectionState, Step};
use crate::store::EntryStore;

/// How long a footer status message stays up
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Log view
    #[default]
    Normal,
    /// Severity floor picker overlay
    SeverityPicker,
    /// Filter text input
    FilterInput,
    /// "Clear logs?" prompt
    ClearConfirm,
    /// Device list shown before streaming starts
    DeviceSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Transient footer message
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

/// Cursor over [`Severity::SELECTABLE`]
#[derive(Debug, Clone, Default)]
pub struct SeverityPickerState {
    pub index: usize,
}

impl SeverityPickerState {
    pub fn open_at(severity: Severity) -> Self {
        let index = Severity::SELECTABLE
            .iter()
            .position(|s| *s == severity)
            .unwrap_or(0);
        Self { index }
    }

    pub fn move_by(&mut self, step: Step) {
        let last = Severity::SELECTABLE.len() - 1;
        self.index = match step {
            Step::Up => self.index.saturating_sub(1),
            Step::Down => (self.index + 1).min(last),
        };
    }

    pub fn current(&self) -> Severity {
        Severity::SELECTABLE[self.index.min(Severity::SELECTABLE.len() - 1)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceSelectorState {
    pub devices: Vec<Device>,
    pub selected: usize,
}

impl DeviceSelectorState {
    pub fn new(devices: Vec<Device>) -> Self {
        Self {
            devices,
            selected: 0,
        }
    }

    pub fn move_by(&mut self, step: Step) {
        self.selected = match step {
            Step::Up => self.selected.saturating_sub(1),
            Step::Down => (self.selected + 1).min(self.devices.len().saturating_sub(1)),
        };
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.devices.get(self.selected)
    }
}

/// Screen rectangle of the log rows, set by the TUI on each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogArea {
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub phase: AppPhase,

    pub store: EntryStore,
    pub view: ViewFilter,
    pub display: DisplayOptions,
    pub selection: SelectionState,
    pub render: RenderCache,
    pub log_view: LogViewState,
    pub redraw: RedrawScheduler,
    pub log_area: LogArea,

    /// Package whose PID scopes the stream
    pub app_id: Option<String>,
    pub device: Option<Device>,
    pub stream_status: Option<StreamStatus>,
    pub tail: TailSize,

    pub severity_picker: SeverityPickerState,
    pub filter_input: String,
    pub device_selector: DeviceSelectorState,
    pub status_message: Option<StatusMessage>,

    /// Fatal error to report after the terminal is restored
    pub exit_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Preferences::default(), None)
    }
}

impl AppState {
    pub fn new(prefs: &Preferences, app_id: Option<String>) -> Self {
        let filters = FilterSet::from_specs(&prefs.filters);
        Self {
            ui_mode: UiMode::Normal,
            phase: AppPhase::Running,
            store: EntryStore::new(prefs.max_entries),
            view: ViewFilter::new(prefs.min_severity, filters),
            display: prefs.display_options(),
            selection: SelectionState::new(),
            render: RenderCache::new(),
            log_view: LogViewState::new(),
            redraw: RedrawScheduler::default(),
            log_area: LogArea::default(),
            app_id,
            device: None,
            stream_status: None,
            tail: prefs.tail(),
            severity_picker: SeverityPickerState::default(),
            filter_input: String::new(),
            device_selector: DeviceSelectorState::default(),
            status_message: None,
            exit_error: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Configuration to save on exit. Only what the UI can change is
    /// taken from the state; tail and retention stay as in `base`, so
    /// command-line overrides are not persisted.
    pub fn preferences(&self, base: &Preferences) -> Preferences {
        let mut prefs = base.clone();
        prefs.min_severity = self.view.min_severity();
        prefs.filters = self.view.filters().specs();
        prefs.set_display_options(&self.display);
        prefs
    }

    /// Show the device list before streaming
    pub fn show_device_selector(&mut self, devices: Vec<Device>) {
        self.device_selector = DeviceSelectorState::new(devices);
        self.ui_mode = UiMode::DeviceSelect;
    }

    // ─────────────────────────────────────────────────────────
    // Entries and rendering
    // ─────────────────────────────────────────────────────────

    /// Parse and store a batch of raw lines; the view refresh is deferred
    pub fn ingest_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let evicted = self.store.append_lines(lines);
        if evicted > 0 {
            tracing::debug!("Store evicted {} entries", evicted);
        }
        self.redraw.request();
    }

    /// Visible ordering straight from the store and predicate
    pub fn visible_entries(&self) -> Vec<EntryId> {
        visible_ids(&self.store, &self.view)
    }

    /// Bring the render cache and scroll bounds up to date now
    pub fn refresh_view(&mut self) -> RenderUpdate {
        let input = RenderInput {
            store: &self.store,
            view: &self.view,
            options: &self.display,
            width: self.log_area.width as usize,
            selection: &self.selection,
        };
        let update = self.render.update(&input);
        self.log_view
            .update_content_size(self.render.line_count(), self.log_area.height as usize);
        self.redraw.complete();
        update
    }

    /// Record the log area for this frame. A width change re-wraps at once.
    pub fn set_log_area(&mut self, area: LogArea) {
        if self.log_area == area {
            return;
        }
        let width_changed = self.log_area.width != area.width;
        self.log_area = area;
        if width_changed && self.display.wrap_lines {
            self.refresh_view();
        } else {
            self.log_view
                .update_content_size(self.render.line_count(), area.height as usize);
        }
    }

    /// Scroll so the rows of `id` are on screen. Entries far off screen
    /// are centered; near ones get the minimal scroll.
    pub fn reveal_entry(&mut self, id: EntryId) {
        self.refresh_view();
        self.log_view.auto_scroll = false;
        let Some(range) = self.render.range_of(id) else {
            return;
        };
        let visible = self.log_view.visible_range();
        let adjacent = range.end + 1 >= visible.start && range.start <= visible.end;
        if adjacent {
            self.log_view.ensure_lines_visible(range);
        } else {
            self.log_view.center_on_line(range.start);
        }
    }

    /// Entry rendered at an absolute terminal row, if any
    pub fn entry_at_row(&self, row: u16) -> Option<EntryId> {
        let area = self.log_area;
        if row < area.top || row >= area.top.saturating_add(area.height) {
            return None;
        }
        let line = self.log_view.offset + (row - area.top) as usize;
        self.render.entry_at_line(line)
    }

    /// Drop every entry along with selection and highlight
    pub fn clear_logs(&mut self) {
        self.store.clear();
        self.selection.exit_selection_mode();
        self.log_view.scroll_to_bottom();
        self.refresh_view();
    }

    // ─────────────────────────────────────────────────────────
    // Status messages
    // ─────────────────────────────────────────────────────────

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Drop the status message once it has been up long enough
    pub fn expire_status(&mut self, now: Instant) {
        if let Some(status) = &self.status_message {
            if now.duration_since(status.shown_at) >= STATUS_MESSAGE_TTL {
                self.status_message = None;
            }
        }
    }
}
