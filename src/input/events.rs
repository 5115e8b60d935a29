//! Generic input event types reported by rendering backends.

use crate::backend::SurfaceId;

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values; windows store them as keysym strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    Left,
    Right,
    Up,
    Down,
    /// Function key F1-F24
    Function(u8),
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Keysym name as reported to applications (`"a"`, `"Return"`, `"space"`, ...).
    pub fn keysym(self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Escape => "Escape".into(),
            Key::Return => "Return".into(),
            Key::Backspace => "BackSpace".into(),
            Key::Delete => "Delete".into(),
            Key::Tab => "Tab".into(),
            Key::Space => "space".into(),
            Key::Shift => "Shift_L".into(),
            Key::Ctrl => "Control_L".into(),
            Key::Alt => "Alt_L".into(),
            Key::Left => "Left".into(),
            Key::Right => "Right".into(),
            Key::Up => "Up".into(),
            Key::Down => "Down".into(),
            Key::Function(n) => format!("F{n}"),
            Key::Unknown => "??".into(),
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (the only one windows record clicks for)
    Left,
    Right,
    Middle,
}

/// An input event addressed to one surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button press at device coordinates
    Click {
        surface: SurfaceId,
        button: MouseButton,
        x: i32,
        y: i32,
    },
    /// Key press
    Key { surface: SurfaceId, key: Key },
    /// The user asked the platform to close the surface
    CloseRequested { surface: SurfaceId },
}

impl InputEvent {
    pub fn surface(&self) -> SurfaceId {
        match self {
            InputEvent::Click { surface, .. }
            | InputEvent::Key { surface, .. }
            | InputEvent::CloseRequested { surface } => *surface,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keysyms_follow_x11_names() {
        assert_eq!(Key::Char('q').keysym(), "q");
        assert_eq!(Key::Space.keysym(), "space");
        assert_eq!(Key::Backspace.keysym(), "BackSpace");
        assert_eq!(Key::Function(10).keysym(), "F10");
    }
}
