//! Physical input tokens and the raw events they are normalized from.
//!
//! A token is one of:
//! - a single uppercase printable character (`W`, `4`, ` `)
//! - a named key code for non-printables (`Escape`, `ArrowLeft`, `F1`)
//! - `Mouse<N>` for mouse button N (browser numbering: 0 left, 1 middle, 2 right)

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

pub const MOUSE_PREFIX: &str = "Mouse";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalToken(String);

impl PhysicalToken {
    /// Normalizes a keyboard event: a one-character key value is uppercased,
    /// anything longer falls back to the symbolic code name.
    pub fn from_key(key: &str, code: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self(c.to_uppercase().collect()),
            _ => Self(code.to_string()),
        }
    }

    pub fn mouse(button: u8) -> Self {
        Self(format!("{}{}", MOUSE_PREFIX, button))
    }

    /// Normalizes a stored binding string. Only `""` means "unbound";
    /// whitespace is kept so a Space binding (`" "`) survives.
    pub fn from_binding(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        Some(Self::from_key(s, s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_mouse(&self) -> bool {
        self.0
            .strip_prefix(MOUSE_PREFIX)
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl fmt::Display for PhysicalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhysicalToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PhysicalToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A raw event as delivered by an input source, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// Key-down. `key` is the produced character (or key name), `code` the
    /// symbolic physical code.
    Key { key: String, code: String },
    /// Mouse-down. `on_control` is set when the click landed on a clickable
    /// UI control rather than the practice surface.
    Mouse { button: u8, on_control: bool },
}

impl RawInput {
    pub fn key(key: impl Into<String>, code: impl Into<String>) -> Self {
        RawInput::Key {
            key: key.into(),
            code: code.into(),
        }
    }

    /// Shorthand for a printable key whose code is irrelevant.
    pub fn char(c: char) -> Self {
        RawInput::Key {
            key: c.to_string(),
            code: format!("Key{}", c.to_ascii_uppercase()),
        }
    }

    pub fn mouse(button: u8) -> Self {
        RawInput::Mouse {
            button,
            on_control: false,
        }
    }

    pub fn control_click(button: u8) -> Self {
        RawInput::Mouse {
            button,
            on_control: true,
        }
    }

    pub fn token(&self) -> PhysicalToken {
        match self {
            RawInput::Key { key, code } => PhysicalToken::from_key(key, code),
            RawInput::Mouse { button, .. } => PhysicalToken::mouse(*button),
        }
    }

    pub fn is_control_click(&self) -> bool {
        matches!(
            self,
            RawInput::Mouse {
                on_control: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_keys_are_uppercased() {
        assert_eq!(PhysicalToken::from_key("w", "KeyW").as_str(), "W");
        assert_eq!(PhysicalToken::from_key("4", "Digit4").as_str(), "4");
    }

    #[test]
    fn named_keys_use_the_code() {
        assert_eq!(PhysicalToken::from_key("Escape", "Escape").as_str(), "Escape");
        assert_eq!(PhysicalToken::from_key("Shift", "ShiftLeft").as_str(), "ShiftLeft");
    }

    #[test]
    fn bindings_normalize_like_events() {
        assert_eq!(PhysicalToken::from_binding("q"), Some(PhysicalToken::from_key("q", "")));
        assert_eq!(PhysicalToken::from_binding(" "), Some(PhysicalToken::from_key(" ", "Space")));
        assert_eq!(PhysicalToken::from_binding(""), None);
        assert_eq!(PhysicalToken::from_binding("Mouse3").unwrap().as_str(), "Mouse3");
    }

    #[test]
    fn mouse_detection() {
        assert!(PhysicalToken::mouse(0).is_mouse());
        assert!(!PhysicalToken::from_key("Mouse", "Mouse").is_mouse());
    }
}
