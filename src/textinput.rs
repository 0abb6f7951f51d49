//! Single-line text input used for the table search box and the login form.
//!
//! The cursor moves over grapheme clusters, so accented names such as
//! "Complexe Résidentiel" edit the way they display.

use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// How typed characters are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoMode {
    /// Show the text as typed.
    #[default]
    Normal,
    /// Show one mask character per grapheme.
    Password,
    /// Show nothing.
    None,
}

/// Styles of the input.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The prompt before the text.
    pub prompt: Style,
    /// The entered text.
    pub text: Style,
    /// The placeholder shown while empty.
    pub placeholder: Style,
    /// The grapheme under the cursor while focused.
    pub cursor: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            text: Style::new(),
            placeholder: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            cursor: Style::new().underline(true),
        }
    }
}

/// Text input state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown before the value.
    pub prompt: String,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Display mode.
    pub echo_mode: EchoMode,
    /// Mask used in [`EchoMode::Password`].
    pub echo_character: char,
    /// Maximum number of graphemes, 0 for unlimited.
    pub char_limit: usize,
    /// Styles.
    pub styles: Styles,
    value: Vec<String>,
    pos: usize,
    focus: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            echo_mode: EchoMode::Normal,
            echo_character: '*',
            char_limit: 0,
            styles: Styles::default(),
            value: Vec::new(),
            pos: 0,
            focus: false,
        }
    }
}

/// Creates an empty, unfocused input.
pub fn new() -> Model {
    Model::default()
}

impl Model {
    /// Sets the placeholder (builder pattern).
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Sets the prompt (builder pattern).
    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    /// Sets the echo mode (builder pattern).
    pub fn with_echo_mode(mut self, mode: EchoMode) -> Self {
        self.echo_mode = mode;
        self
    }

    /// The current value.
    pub fn value(&self) -> String {
        self.value.concat()
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        let mut graphemes: Vec<String> = s.graphemes(true).map(str::to_string).collect();
        if self.char_limit > 0 {
            graphemes.truncate(self.char_limit);
        }
        self.value = graphemes;
        self.pos = self.value.len();
    }

    /// Empties the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Cursor position in graphemes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the value length.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Moves the cursor to the start.
    pub fn cursor_start(&mut self) {
        self.pos = 0;
    }

    /// Moves the cursor to the end.
    pub fn cursor_end(&mut self) {
        self.pos = self.value.len();
    }

    fn insert(&mut self, s: &str) {
        for g in s.graphemes(true) {
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.pos, g.to_string());
            self.pos += 1;
        }
    }

    fn delete_before_cursor(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        self.value.remove(self.pos);
        true
    }

    fn delete_at_cursor(&mut self) -> bool {
        if self.pos >= self.value.len() {
            return false;
        }
        self.value.remove(self.pos);
        true
    }

    /// Applies an editing key. Returns `true` when the value changed.
    ///
    /// Unfocused inputs ignore all messages.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focus {
            return false;
        }
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        self.handle_key(key_msg)
    }

    pub(crate) fn handle_key(&mut self, key_msg: &KeyMsg) -> bool {
        let ctrl = key_msg.modifiers.contains(KeyModifiers::CONTROL);
        match key_msg.key {
            KeyCode::Char('u') if ctrl => {
                let changed = self.pos > 0;
                self.value.drain(..self.pos);
                self.pos = 0;
                changed
            }
            KeyCode::Char('a') if ctrl => {
                self.cursor_start();
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor_end();
                false
            }
            KeyCode::Char(c) if !ctrl => {
                let before = self.value.len();
                self.insert(&c.to_string());
                self.value.len() != before
            }
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => {
                self.pos = self.pos.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.set_cursor(self.pos + 1);
                false
            }
            KeyCode::Home => {
                self.cursor_start();
                false
            }
            KeyCode::End => {
                self.cursor_end();
                false
            }
            _ => false,
        }
    }

    fn displayed(&self) -> Vec<String> {
        match self.echo_mode {
            EchoMode::Normal => self.value.clone(),
            EchoMode::Password => vec![self.echo_character.to_string(); self.value.len()],
            EchoMode::None => Vec::new(),
        }
    }

    /// Renders prompt, text and cursor.
    pub fn view(&self) -> String {
        let prompt = self.styles.prompt.clone().render(&self.prompt);
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return format!(
                "{}{}",
                prompt,
                self.styles.placeholder.clone().render(&self.placeholder)
            );
        }

        let shown = self.displayed();
        if !self.focus {
            return format!("{}{}", prompt, self.styles.text.clone().render(&shown.concat()));
        }

        let pos = self.pos.min(shown.len());
        let before = shown[..pos].concat();
        let (under, after) = match shown.get(pos) {
            Some(g) => (g.clone(), shown[pos + 1..].concat()),
            None => (" ".to_string(), String::new()),
        };
        format!(
            "{}{}{}{}",
            prompt,
            self.styles.text.clone().render(&before),
            self.styles.cursor.clone().render(&under),
            self.styles.text.clone().render(&after)
        )
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
