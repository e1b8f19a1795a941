// ABOUTME: Keyboard command surface for the quickslides engine
// ABOUTME: Maps host-agnostic key presses onto navigation commands

use crate::navigation::NavCommand;

/// A key press, independent of the windowing or terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Home,
    End,
    Char(char),
}

impl Key {
    /// Parse a binding name such as `escape`, `f` or `space`.
    pub fn parse(name: &str) -> Option<Key> {
        let name = name.trim();
        let key = match name.to_lowercase().as_str() {
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "space" => Key::Space,
            "esc" | "escape" => Key::Escape,
            "home" => Key::Home,
            "end" => Key::End,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Keys with a fixed navigation meaning that cannot be rebound.
    pub fn is_fixed(self) -> bool {
        matches!(self, Key::ArrowLeft | Key::ArrowRight | Key::Space | Key::Home | Key::End)
    }

    fn matches(self, other: Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        KeyPress::plain(key)
    }
}

/// What a key press means to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Navigate(NavCommand),
    /// Display only. Does not touch navigation state.
    ToggleFullscreen,
    Ignored,
}

/// The configurable keys. Arrow, space, Home and End keys are fixed and
/// [`Config::from_env`](crate::config::Config::from_env) refuses to bind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub exit: Key,
    pub fullscreen: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            exit: Key::Escape,
            fullscreen: Key::Char('f'),
        }
    }
}

impl KeyBindings {
    pub fn action(&self, press: KeyPress) -> KeyAction {
        if press.key.matches(self.exit) {
            return KeyAction::Navigate(NavCommand::Exit);
        }
        if press.key.matches(self.fullscreen) {
            return KeyAction::ToggleFullscreen;
        }
        match (press.key, press.shift) {
            (Key::ArrowRight, _) | (Key::Space, false) => KeyAction::Navigate(NavCommand::Next),
            (Key::ArrowLeft, _) | (Key::Space, true) => KeyAction::Navigate(NavCommand::Previous),
            (Key::Home, _) => KeyAction::Navigate(NavCommand::GoTo(0)),
            (Key::End, _) => KeyAction::Navigate(NavCommand::GoTo(usize::MAX)),
            _ => KeyAction::Ignored,
        }
    }
}
