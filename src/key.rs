//! Type-safe key bindings shared by every component.
//!
//! A [`Binding`] groups one or more key presses under a help entry. Components
//! keep their bindings in a key map struct and implement [`KeyMap`] so the
//! help line can be generated from them.
//!
//! ```rust
//! use tenderboard::key::{self, Binding, KeyMap};
//! use crossterm::event::KeyCode;
//!
//! let next = Binding::new(vec![KeyCode::Right, KeyCode::Char('l')]).with_help("→/l", "next page");
//! let quit = key::new_binding(vec![key::with_keys_str(&["ctrl+c"]), key::with_help("ctrl+c", "quit")]);
//!
//! struct Keys { next: Binding, quit: Binding }
//!
//! impl KeyMap for Keys {
//!     fn short_help(&self) -> Vec<&Binding> { vec![&self.next, &self.quit] }
//!     fn full_help(&self) -> Vec<Vec<&Binding>> { vec![vec![&self.next], vec![&self.quit]] }
//! }
//!
//! assert_eq!(quit.help().key, "ctrl+c");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Held modifiers. Shift is ignored when matching.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Parses a key description such as `"ctrl+c"`, `"pgdown"`, `"shift+tab"` or `"G"`.
    ///
    /// Returns `None` for names that do not map to a key.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = s;
        loop {
            if let Some(r) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("shift+") {
                modifiers |= KeyModifiers::SHIFT;
                rest = r;
            } else {
                break;
            }
        }

        let code = match rest {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        let n = other.strip_prefix('f')?.parse::<u8>().ok()?;
                        KeyCode::F(n)
                    }
                }
            }
        };
        Some(Self { code, modifiers })
    }

    fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let mut own = self.modifiers;
        own.remove(KeyModifiers::SHIFT);
        let mut other = modifiers;
        other.remove(KeyModifiers::SHIFT);
        self.code == code && own == other
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"←/h"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of key presses that trigger the same action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key codes or `(KeyCode, KeyModifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help entry (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the help entry.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns the key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// A binding is enabled when it has keys and was not disabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg.key, msg.modifiers))
    }
}

/// Option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Sets keys from their string descriptions. Unknown names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let parsed: Vec<KeyPress> = keys.iter().filter_map(|k| KeyPress::parse(k)).collect();
    Box::new(move |b: &mut Binding| b.keys = parsed)
}

/// Sets the help entry.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Starts the binding disabled.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

/// Reports whether the message matches any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Implemented by key map structs so a help line can be derived from them.
pub trait KeyMap {
    /// Bindings for the compact one-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped in columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Renders bindings as `key desc • key desc`, skipping disabled ones.
pub fn help_line(bindings: &[&Binding], separator: &str) -> String {
    bindings
        .iter()
        .filter(|b| b.enabled())
        .map(|b| format!("{} {}", b.help.key, b.help.desc))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_parse_modifiers_and_names() {
        let p = KeyPress::parse("ctrl+c").unwrap();
        assert_eq!(p.code, KeyCode::Char('c'));
        assert_eq!(p.modifiers, KeyModifiers::CONTROL);

        assert_eq!(KeyPress::parse("pgdown").unwrap().code, KeyCode::PageDown);
        assert_eq!(KeyPress::parse("shift+tab").unwrap().code, KeyCode::BackTab);
        assert_eq!(KeyPress::parse("f5").unwrap().code, KeyCode::F(5));
        assert!(KeyPress::parse("nonsense").is_none());
    }

    #[test]
    fn test_binding_matches_ignoring_shift() {
        let b = Binding::new(vec![KeyCode::Char('G')]);
        assert!(b.matches(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(b.matches(&key(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert!(!b.matches(&key(KeyCode::Char('G'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["x"]), with_disabled()]);
        assert!(!b.matches(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
        b.set_enabled(true);
        assert!(b.matches(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_help_line_skips_disabled() {
        let a = Binding::new(vec![KeyCode::Left]).with_help("←", "prev");
        let mut b = Binding::new(vec![KeyCode::Right]).with_help("→", "next");
        b.set_enabled(false);
        assert_eq!(help_line(&[&a, &b], " • "), "← prev");
    }
}
