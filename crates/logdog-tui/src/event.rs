//! Terminal event polling

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use logdog_app::message::Message;
use logdog_app::InputKey;
use logdog_core::prelude::*;
use std::time::Duration;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None, // Unsupported keys ignored
    }
}

/// Convert a mouse event to a message. Only left clicks and the wheel matter.
pub fn mouse_event_to_message(mouse: MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::Click { row: mouse.row }),
        MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
        _ => None,
    }
}

/// Map one terminal event to a message
pub fn event_to_message(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        Event::Mouse(mouse) => mouse_event_to_message(mouse),
        // Resizes are picked up by the next draw
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        Ok(event_to_message(event::read()?))
    } else {
        // Tick drives the redraw scheduler and status expiry
        Ok(Some(Message::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 5,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_char_with_ctrl_conversion() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('c')));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            Some(InputKey::Up)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            Some(InputKey::Down)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE)),
            Some(InputKey::Home)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(InputKey::PageDown)
        );
    }

    #[test]
    fn test_uppercase_letters() {
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('G')));
    }

    #[test]
    fn test_unsupported_key_returns_none() {
        let key = KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
        for code in [KeyCode::F(5), KeyCode::Tab, KeyCode::BackTab, KeyCode::Delete] {
            assert_eq!(key_event_to_input(KeyEvent::new(code, KeyModifiers::NONE)), None);
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(event_to_message(Event::Key(key)).is_none());
    }

    #[test]
    fn test_left_click_maps_to_row() {
        let msg = mouse_event_to_message(mouse(MouseEventKind::Down(MouseButton::Left), 7));
        assert!(matches!(msg, Some(Message::Click { row: 7 })));
    }

    #[test]
    fn test_wheel_scrolls_three_lines() {
        let up = mouse_event_to_message(mouse(MouseEventKind::ScrollUp, 0));
        let down = mouse_event_to_message(mouse(MouseEventKind::ScrollDown, 0));
        assert!(matches!(up, Some(Message::ScrollUp(3))));
        assert!(matches!(down, Some(Message::ScrollDown(3))));
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let right = mouse_event_to_message(mouse(MouseEventKind::Down(MouseButton::Right), 3));
        let moved = mouse_event_to_message(mouse(MouseEventKind::Moved, 3));
        assert!(right.is_none());
        assert!(moved.is_none());
    }
}
