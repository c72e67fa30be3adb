//! Message processing with action dispatch

use std::collections::VecDeque;

use logdog_adb::DeviceBridge;
use logdog_app::message::Message;
use logdog_app::state::AppState;
use tokio::sync::mpsc;

use crate::actions::{handle_action, SharedManager};
use crate::clipboard::Clipboard;

/// Process a message through the TEA update function and perform the
/// resulting actions. Inline action outcomes are fed back in order.
pub fn process_message<B>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    manager: &SharedManager<B>,
    clipboard: &mut dyn Clipboard,
) where
    B: DeviceBridge + Sync + 'static,
{
    let mut pending = VecDeque::from([message]);
    while let Some(msg) = pending.pop_front() {
        for action in logdog_app::process_message(state, msg) {
            if let Some(follow_up) = handle_action(action, msg_tx, manager, clipboard) {
                pending.push_back(follow_up);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_state;
    use logdog_adb::{AdbBridge, StreamConfig, StreamManager};
    use logdog_app::InputKey;
    use logdog_core::prelude::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingClipboard {
        contents: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn set(&mut self, contents: &str) -> Result<()> {
            self.contents.push(contents.to_string());
            Ok(())
        }
    }

    fn idle_manager() -> SharedManager<AdbBridge> {
        let (tx, _rx) = mpsc::channel(1);
        let bridge = AdbBridge::with_program("adb");
        Arc::new(Mutex::new(StreamManager::new(bridge, StreamConfig::default(), tx)))
    }

    #[test]
    fn test_copy_selection_reaches_clipboard_and_footer() {
        let mut state = create_test_state(5);
        let manager = idle_manager();
        let (msg_tx, _msg_rx) = mpsc::channel(4);
        let mut clipboard = RecordingClipboard::default();

        for key in [InputKey::Char('v'), InputKey::Char('k'), InputKey::Char('c')] {
            process_message(
                &mut state,
                Message::Key(key),
                &msg_tx,
                &manager,
                &mut clipboard,
            );
        }

        assert_eq!(clipboard.contents.len(), 1);
        let lines: Vec<&str> = clipboard.contents[0].lines().collect();
        assert_eq!(
            lines,
            vec![
                "12-14 15:31:12.345 I Tag0 message 3",
                "12-14 15:31:12.345 I Tag1 message 4",
            ]
        );
        assert!(!state.selection.is_selection_mode());
        let status = state.status_message.as_ref().expect("status shown");
        assert_eq!(status.text, "Copied 2 lines");
    }

    #[test]
    fn test_copy_messages_only_uses_highlight() {
        let mut state = create_test_state(5);
        let manager = idle_manager();
        let (msg_tx, _msg_rx) = mpsc::channel(4);
        let mut clipboard = RecordingClipboard::default();

        process_message(
            &mut state,
            Message::Key(InputKey::Char('k')),
            &msg_tx,
            &manager,
            &mut clipboard,
        );
        process_message(
            &mut state,
            Message::Key(InputKey::Char('C')),
            &msg_tx,
            &manager,
            &mut clipboard,
        );

        assert_eq!(clipboard.contents.len(), 1);
        assert!(clipboard.contents[0].starts_with("message "));
        assert!(!clipboard.contents[0].contains('\n'));
    }
}
