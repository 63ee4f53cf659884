use evdev::Key;

/// Mouse buttons registered on the virtual pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Convert to evdev Key code
    pub fn to_key(self) -> Key {
        match self {
            MouseButton::Left => Key::BTN_LEFT,
            MouseButton::Right => Key::BTN_RIGHT,
            MouseButton::Middle => Key::BTN_MIDDLE,
        }
    }

    pub(crate) const ALL: [MouseButton; 3] =
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
}
