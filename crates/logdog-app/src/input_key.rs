//! Keys the handlers react to
//!
//! The TUI maps crossterm events onto these; keys logdog does not bind
//! never reach the app crate.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character, also typed into the filter prompt
    Char(char),
    /// Character pressed with Ctrl (`Ctrl+C` quits, `Ctrl+U` clears the prompt)
    CharCtrl(char),

    /// Highlight, selection and list movement
    Up,
    Down,
    /// Horizontal scroll while wrapping is off
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    /// Deletes from the filter prompt
    Backspace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_chord_differs_from_plain_char() {
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
        assert_eq!(InputKey::Char('G'), InputKey::Char('G'));
        assert_ne!(InputKey::Char('g'), InputKey::Char('G'));
    }
}
