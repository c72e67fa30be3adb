//! Integration tests for the parse → store → filter → render → select pipeline

use logdog_app::config::{load_preferences, save_preferences};
use logdog_app::message::Message;
use logdog_app::render::{RenderCache, RenderInput};
use logdog_app::selection::Step;
use logdog_app::state::{AppState, LogArea};
use logdog_app::{process_message, InputKey, UpdateAction};
use logdog_core::{Severity, StreamEvent, StreamStatus};
use tempfile::TempDir;

const WIDTH: u16 = 160;

fn crash_session() -> Vec<String> {
    vec![
        "12-14 15:31:10.001  1200  1200 I ActivityManager: Start proc 1200:com.example.app".into(),
        "12-14 15:31:10.120  1200  1200 D Http: GET /api/items".into(),
        "12-14 15:31:11.500  1200  1200 W Http: slow response (1200 ms)".into(),
        "12-14 15:31:12.345  1200  1200 E AndroidRuntime: FATAL EXCEPTION: main".into(),
        "12-14 15:31:12.345  1200  1200 E AndroidRuntime: java.lang.IllegalStateException: boom".into(),
        "12-14 15:31:12.345  1200  1200 E AndroidRuntime: \tat com.example.Main.run(Main.kt:10)".into(),
        "12-14 15:31:12.345  1200  1200 E AndroidRuntime: \tat android.os.Handler.dispatch(Handler.java:95)".into(),
        "12-14 15:31:12.400   900   900 I ActivityManager: Process com.example.app has died".into(),
    ]
}

fn state_with(lines: Vec<String>) -> AppState {
    let mut state = AppState::default();
    state.set_log_area(LogArea {
        top: 1,
        width: WIDTH,
        height: 20,
    });
    process_message(&mut state, Message::Stream(StreamEvent::Lines(lines)));
    state.refresh_view();
    state
}

/// Render the current view from scratch with a new cache
fn full_render(state: &AppState) -> Vec<String> {
    let mut cache = RenderCache::new();
    cache.update(&RenderInput {
        store: &state.store,
        view: &state.view,
        options: &state.display,
        width: WIDTH as usize,
        selection: &state.selection,
    });
    cache.lines().iter().map(|l| l.text()).collect()
}

fn rendered(state: &AppState) -> Vec<String> {
    state.render.lines().iter().map(|l| l.text()).collect()
}

#[test]
fn test_crash_renders_as_one_block() {
    let state = state_with(crash_session());
    let rows = rendered(&state);
    assert_eq!(rows.len(), 8);

    let prefix = state.display.prefix_width();
    // Header line carries tag and severity
    assert!(rows[3].contains("AndroidRuntime"));
    assert!(rows[3].contains(" E "));
    // Exception text and frames are continuations with a blank prefix
    for row in &rows[4..7] {
        assert!(row[..prefix].trim().is_empty(), "prefix not blank: {row:?}");
    }
    assert!(rows[5].contains("at com.example.Main.run"));
}

#[test]
fn test_severity_floor_hides_lower_levels() {
    let mut state = state_with(crash_session());
    process_message(&mut state, Message::SetMinSeverity(Severity::Warn));

    let rows = rendered(&state);
    assert_eq!(rows.len(), 5);
    assert!(rows[0].contains("slow response"));
    assert!(rows.iter().all(|r| !r.contains("GET /api/items")));
    assert_eq!(rows, full_render(&state));
}

#[test]
fn test_filter_input_applies_tag_filter() {
    let mut state = state_with(crash_session());
    process_message(&mut state, Message::Key(InputKey::Char('f')));
    for c in "tag:^Http$".chars() {
        process_message(&mut state, Message::Key(InputKey::Char(c)));
    }
    process_message(&mut state, Message::Key(InputKey::Enter));

    let rows = rendered(&state);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("GET /api/items"));
    assert!(rows[1].contains("slow response"));
    assert_eq!(state.view.filters().to_text(), "tag:^Http$");
}

#[test]
fn test_incremental_append_matches_full_render() {
    let session = crash_session();
    let mut state = state_with(session[..4].to_vec());

    // Split inside the stack trace, then stream the rest
    process_message(
        &mut state,
        Message::Stream(StreamEvent::Lines(session[4..].to_vec())),
    );
    state.refresh_view();

    assert_eq!(rendered(&state), full_render(&state));
}

#[test]
fn test_status_events_interleave_with_lines() {
    let mut state = state_with(crash_session());
    process_message(
        &mut state,
        Message::Stream(StreamEvent::Status(StreamStatus::Stopped)),
    );
    process_message(
        &mut state,
        Message::Stream(StreamEvent::Lines(vec![
            "12-14 15:31:20.000  1300  1300 I ActivityManager: Start proc 1300:com.example.app"
                .into(),
        ])),
    );
    process_message(
        &mut state,
        Message::Stream(StreamEvent::Status(StreamStatus::Running)),
    );
    state.refresh_view();

    assert_eq!(state.stream_status, Some(StreamStatus::Running));
    assert_eq!(state.store.len(), 9);
}

#[test]
fn test_select_and_copy_crash() {
    let mut state = state_with(crash_session());
    process_message(&mut state, Message::SetMinSeverity(Severity::Error));

    // Highlight the last visible entry, then select upwards over the crash
    process_message(&mut state, Message::MoveHighlight(Step::Up));
    process_message(&mut state, Message::Key(InputKey::Char('v')));
    for _ in 0..3 {
        process_message(&mut state, Message::Key(InputKey::Char('k')));
    }
    assert_eq!(state.selection.selected_count(), 4);

    let actions = process_message(&mut state, Message::Key(InputKey::Char('C')));
    match actions.as_slice() {
        [UpdateAction::CopyToClipboard { text, lines }] => {
            assert_eq!(*lines, 4);
            let copied: Vec<&str> = text.lines().collect();
            assert_eq!(copied[0], "FATAL EXCEPTION: main");
            assert_eq!(copied[3], "\tat android.os.Handler.dispatch(Handler.java:95)");
        }
        other => panic!("unexpected actions: {other:?}"),
    }
    assert!(!state.selection.is_selection_mode());
}

#[test]
fn test_display_changes_survive_restart() {
    let dir = TempDir::new().unwrap();
    let mut state = state_with(crash_session());
    process_message(&mut state, Message::Key(InputKey::Char('t')));
    process_message(&mut state, Message::SetMinSeverity(Severity::Info));

    let base = load_preferences(dir.path());
    save_preferences(dir.path(), &state.preferences(&base)).unwrap();

    let reloaded = load_preferences(dir.path());
    let restarted = AppState::new(&reloaded, None);
    assert!(!restarted.display.show_timestamp);
    assert_eq!(restarted.view.min_severity(), Severity::Info);
}
