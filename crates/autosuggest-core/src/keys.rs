//! Abstract key events consumed by the suggestion controller.
//!
//! Hosts translate their toolkit's key events into [`KeyEvent`]s. The
//! controller only needs to know which bucket a key falls into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Backspace,
    Tab,
    Enter,
    Shift,
    Ctrl,
    Alt,
    PauseBreak,
    CapsLock,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    PrintScreen,
    Insert,
    Delete,
    /// Function key `F1`..=`F12`.
    F(u8),
    /// Any printable character other than space.
    Char(char),
}

/// Modifier flags held while a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// Bucket a key falls into for keyup handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Arrow keys; drive the navigator.
    Navigation,
    /// Control, paging, edit and function keys; never trigger matching.
    NonCharacter,
    /// Everything that may change the word being typed.
    Character,
}

/// A key together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Classify this event for keyup handling.
    ///
    /// Space is an ordinary character unless Ctrl is held: the keyup half of
    /// the Ctrl+Space gesture must leave the force-shown list alone.
    pub const fn class(&self) -> KeyClass {
        match self.key {
            Key::Left | Key::Up | Key::Right | Key::Down => KeyClass::Navigation,
            Key::Space if self.modifiers.ctrl => KeyClass::NonCharacter,
            Key::Space | Key::Char(_) => KeyClass::Character,
            Key::Backspace
            | Key::Tab
            | Key::Enter
            | Key::Shift
            | Key::Ctrl
            | Key::Alt
            | Key::PauseBreak
            | Key::CapsLock
            | Key::Escape
            | Key::PageUp
            | Key::PageDown
            | Key::End
            | Key::Home
            | Key::PrintScreen
            | Key::Insert
            | Key::Delete
            | Key::F(_) => KeyClass::NonCharacter,
        }
    }

    /// The text this key inserts into a plain text buffer, if any.
    pub const fn inserted_char(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.alt {
            return None;
        }
        match self.key {
            Key::Char(c) => Some(c),
            Key::Space => Some(' '),
            Key::Enter => Some('\n'),
            _ => None,
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F(n) => write!(f, "F{n}"),
            Self::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(if c == ' ' { Self::Space } else { Self::Char(c) });
        }
        let key = match s.to_ascii_lowercase().as_str() {
            "backspace" | "bs" => Self::Backspace,
            "tab" => Self::Tab,
            "enter" | "return" => Self::Enter,
            "shift" => Self::Shift,
            "ctrl" | "control" => Self::Ctrl,
            "alt" => Self::Alt,
            "pause" | "pausebreak" => Self::PauseBreak,
            "capslock" => Self::CapsLock,
            "esc" | "escape" => Self::Escape,
            "space" | "spacebar" => Self::Space,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            "end" => Self::End,
            "home" => Self::Home,
            "left" => Self::Left,
            "up" => Self::Up,
            "right" => Self::Right,
            "down" => Self::Down,
            "printscreen" => Self::PrintScreen,
            "insert" | "ins" => Self::Insert,
            "delete" | "del" => Self::Delete,
            lower => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n @ 1..=12) => Self::F(n),
                _ => return Err(UnknownKey(s.to_string())),
            },
        };
        Ok(key)
    }
}

impl FromStr for KeyEvent {
    type Err = UnknownKey;

    /// Parse `Ctrl+Space`, `Alt+x`, `Shift+Tab` or a bare key name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::NONE;
        let mut rest = s;
        loop {
            let Some((head, tail)) = rest.split_once('+') else {
                break;
            };
            if tail.is_empty() {
                break;
            }
            match head.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                _ => return Err(UnknownKey(s.to_string())),
            }
            rest = tail;
        }
        Ok(Self::new(rest.parse()?, modifiers))
    }
}
