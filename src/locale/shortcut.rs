//! Keyboard shortcut for toggling the locale

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A key press delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: char,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyPress {
    /// Plain key without modifiers.
    #[must_use]
    pub const fn new(key: char) -> Self {
        Self { key, ctrl: false, alt: false, shift: false, meta: false }
    }

    #[must_use]
    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("The shortcut cannot be empty. Example: \"Alt+L\"")]
    Empty,
    #[error("Unknown modifier '{0}'. Use Ctrl, Alt, Shift or Meta")]
    UnknownModifier(String),
    #[error("The shortcut '{0}' must end with exactly one key character")]
    InvalidKey(String),
}

/// Modifier set plus one key. The key compares case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    /// Lowercase key character
    key: char,
    /// Ctrl
    ctrl: bool,
    /// Alt / Option
    alt: bool,
    /// Shift
    shift: bool,
    /// Meta / Command
    meta: bool,
}

impl Shortcut {
    #[must_use]
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key.to_ascii_lowercase() == self.key
            && press.ctrl == self.ctrl
            && press.alt == self.alt
            && press.shift == self.shift
            && press.meta == self.meta
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self { key: 'l', ctrl: false, alt: true, shift: false, meta: false }
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let mut parts: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        let key_part = parts.pop().unwrap_or_default();

        let mut chars = key_part.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_lowercase(),
            _ => return Err(ShortcutParseError::InvalidKey(trimmed.to_string())),
        };

        let mut shortcut = Self { key, ctrl: false, alt: false, shift: false, meta: false };
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "alt" | "option" => shortcut.alt = true,
                "shift" => shortcut.shift = true,
                "meta" | "cmd" | "command" => shortcut.meta = true,
                _ => return Err(ShortcutParseError::UnknownModifier(modifier.to_string())),
            }
        }

        Ok(shortcut)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (enabled, name) in
            [(self.ctrl, "Ctrl"), (self.alt, "Alt"), (self.shift, "Shift"), (self.meta, "Meta")]
        {
            if enabled {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}
