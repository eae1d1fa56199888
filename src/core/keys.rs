//! Keyboard input as seen by the terminal session.

/// A key press, already reduced to what the terminal cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Space,
    Char(char),
    /// Ctrl+C or Cmd+C.
    Interrupt,
    /// Ctrl+L.
    ClearScreen,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value and its modifier state.
    pub fn from_dom(key: &str, ctrl: bool, meta: bool) -> Self {
        match key {
            "c" | "C" if ctrl || meta => Self::Interrupt,
            "l" | "L" if ctrl => Self::ClearScreen,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            " " => Self::Space,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dom() {
        assert_eq!(Key::from_dom("c", true, false), Key::Interrupt);
        assert_eq!(Key::from_dom("c", false, true), Key::Interrupt);
        assert_eq!(Key::from_dom("c", false, false), Key::Char('c'));
        assert_eq!(Key::from_dom("l", true, false), Key::ClearScreen);
        assert_eq!(Key::from_dom("ArrowLeft", false, false), Key::Left);
        assert_eq!(Key::from_dom(" ", false, false), Key::Space);
        assert_eq!(Key::from_dom("Shift", false, false), Key::Other);
    }
}
