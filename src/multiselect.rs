//! Multi-select control: a closed field showing the selection as badges and a
//! popup listing options narrowed by a fuzzy query.
//!
//! ```rust
//! use tenderboard::multiselect::{Model, SelectOption};
//!
//! let mut services = Model::new(vec![
//!     SelectOption::new("Plomberie", "plumbing"),
//!     SelectOption::new("Électricité", "electricity"),
//!     SelectOption::new("Menuiserie", "carpentry"),
//! ]);
//!
//! services.toggle("electricity");
//! services.toggle("plumbing");
//! assert_eq!(services.selected(), ["electricity", "plumbing"]);
//!
//! services.set_query("menu");
//! assert_eq!(services.visible_options().len(), 1);
//! ```

use crate::key::{self, Binding, KeyMap};
use crate::textinput;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use lipgloss_extras::prelude::*;
use tracing::debug;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Displayed text; the query matches against it.
    pub label: String,
    /// Value stored in the selection.
    pub value: String,
}

impl SelectOption {
    /// Creates an option.
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Key bindings of the multi-select.
#[derive(Debug, Clone)]
pub struct MultiSelectKeyMap {
    /// Open the popup.
    pub open: Binding,
    /// Close the popup.
    pub close: Binding,
    /// Toggle the option under the cursor.
    pub toggle: Binding,
    /// Cursor up.
    pub up: Binding,
    /// Cursor down.
    pub down: Binding,
    /// Remove the last selected value when the query is empty.
    pub remove_last: Binding,
}

impl Default for MultiSelectKeyMap {
    fn default() -> Self {
        Self {
            open: Binding::new(vec![KeyCode::Enter, KeyCode::Char(' '), KeyCode::Down])
                .with_help("enter", "open"),
            close: Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
            toggle: Binding::new(vec![KeyCode::Enter]).with_help("enter", "select"),
            up: Binding::new(vec![KeyCode::Up]).with_help("↑", "up"),
            down: Binding::new(vec![KeyCode::Down]).with_help("↓", "down"),
            remove_last: Binding::new(vec![KeyCode::Backspace]).with_help("backspace", "remove"),
        }
    }
}

impl KeyMap for MultiSelectKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.toggle, &self.close]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.open, &self.close, &self.toggle],
            vec![&self.up, &self.down, &self.remove_last],
        ]
    }
}

/// Styles of the multi-select.
#[derive(Debug, Clone)]
pub struct MultiSelectStyles {
    /// A selected value.
    pub badge: Style,
    /// Text shown when nothing is selected.
    pub placeholder: Style,
    /// An option.
    pub option: Style,
    /// The option under the cursor.
    pub cursor_option: Style,
    /// The "no match" line.
    pub empty: Style,
}

impl Default for MultiSelectStyles {
    fn default() -> Self {
        Self {
            badge: Style::new()
                .background(AdaptiveColor {
                    Light: "#E4E4E7",
                    Dark: "#3F3F46",
                })
                .padding(0, 1, 0, 1),
            placeholder: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            option: Style::new().padding_left(2),
            cursor_option: Style::new().padding_left(2).foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            empty: Style::new().padding_left(2).foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// Multi-select state.
#[derive(Debug, Clone)]
pub struct Model {
    options: Vec<SelectOption>,
    selected: Vec<String>,
    open: bool,
    cursor: usize,
    query: textinput::Model,
    focus: bool,
    /// Text shown when nothing is selected.
    pub placeholder: String,
    /// Text shown when the query matches no option.
    pub empty_text: String,
    /// Key bindings.
    pub keymap: MultiSelectKeyMap,
    /// Styles.
    pub styles: MultiSelectStyles,
}

impl Model {
    /// Creates a closed multi-select with nothing selected.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            selected: Vec::new(),
            open: false,
            cursor: 0,
            query: textinput::new().with_prompt("").with_placeholder("Search..."),
            focus: false,
            placeholder: "Select...".to_string(),
            empty_text: "No match found.".to_string(),
            keymap: MultiSelectKeyMap::default(),
            styles: MultiSelectStyles::default(),
        }
    }

    /// Sets the placeholder (builder pattern).
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Sets the no-match text (builder pattern).
    pub fn with_empty_text(mut self, text: &str) -> Self {
        self.empty_text = text.to_string();
        self
    }

    /// Starts with `values` selected; unknown values are dropped (builder pattern).
    pub fn with_selected(mut self, values: &[&str]) -> Self {
        for v in values {
            if !self.is_selected(v) {
                self.toggle(v);
            }
        }
        self
    }

    /// All options.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Selected values in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Labels of the selected values in selection order.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter_map(|v| self.option(v).map(|o| o.label.as_str()))
            .collect()
    }

    /// Reports whether `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Selects `value`, or unselects it when already selected. Values that
    /// are not an option are ignored.
    pub fn toggle(&mut self, value: &str) {
        if self.is_selected(value) {
            self.unselect(value);
        } else if self.option(value).is_some() {
            debug!(value = %value, "option selected");
            self.selected.push(value.to_string());
        }
    }

    /// Removes `value` from the selection.
    pub fn unselect(&mut self, value: &str) {
        self.selected.retain(|v| v != value);
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Reports whether the popup is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the popup with an empty query.
    pub fn open(&mut self) {
        self.open = true;
        self.cursor = 0;
        self.query.reset();
        self.query.focus();
    }

    /// Closes the popup.
    pub fn close(&mut self) {
        self.open = false;
        self.query.reset();
        self.query.blur();
    }

    /// The current query.
    pub fn query(&self) -> String {
        self.query.value()
    }

    /// Replaces the query and moves the cursor to the first match.
    pub fn set_query(&mut self, query: &str) {
        self.query.set_value(query);
        self.cursor = 0;
    }

    /// Options matching the query, in option order. An empty query matches all.
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        let query = self.query.value();
        if query.is_empty() {
            return self.options.iter().collect();
        }
        let matcher = SkimMatcherV2::default().ignore_case();
        self.options
            .iter()
            .filter(|o| matcher.fuzzy_match(&o.label, &query).is_some())
            .collect()
    }

    /// Index of the cursor within the visible options.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn toggle_under_cursor(&mut self) {
        let value = self
            .visible_options()
            .get(self.cursor)
            .map(|o| o.value.clone());
        if let Some(value) = value {
            self.toggle(&value);
        }
    }

    fn handle_open_key(&mut self, key_msg: &KeyMsg) {
        let visible = self.visible_options().len();
        if self.keymap.close.matches(key_msg) {
            self.close();
        } else if self.keymap.toggle.matches(key_msg) {
            self.toggle_under_cursor();
        } else if self.keymap.up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if self.keymap.down.matches(key_msg) {
            self.cursor = (self.cursor + 1).min(visible.saturating_sub(1));
        } else if self.keymap.remove_last.matches(key_msg) && self.query.value().is_empty() {
            self.selected.pop();
        } else if self.query.handle_key(key_msg) {
            self.cursor = 0;
        }
    }

    fn view_field(&self) -> String {
        if self.selected.is_empty() {
            return self.styles.placeholder.clone().render(&self.placeholder);
        }
        self.selected_labels()
            .iter()
            .map(|label| self.styles.badge.clone().render(&format!("{label} ×")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn view_popup(&self) -> String {
        let mut lines = vec![self.query.view()];
        let visible = self.visible_options();
        if visible.is_empty() {
            lines.push(self.styles.empty.clone().render(&self.empty_text));
        }
        for (i, option) in visible.iter().enumerate() {
            let mark = if self.is_selected(&option.value) { "[x]" } else { "[ ]" };
            let text = format!("{mark} {}", option.label);
            let style = if i == self.cursor {
                &self.styles.cursor_option
            } else {
                &self.styles.option
            };
            lines.push(style.clone().render(&text));
        }
        lines.push(key::help_line(&self.keymap.short_help(), " • "));
        lines.join("\n")
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
        self.close();
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::new(Vec::new());
        model.focus = true;
        (model, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.open {
            self.handle_open_key(key_msg);
        } else if self.keymap.open.matches(key_msg) {
            self.open();
        } else if self.keymap.remove_last.matches(key_msg) {
            self.selected.pop();
        }
        None
    }

    fn view(&self) -> String {
        if self.open {
            format!("{}\n{}", self.view_field(), self.view_popup())
        } else {
            self.view_field()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn services() -> Model {
        Model::new(vec![
            SelectOption::new("Plomberie", "plumbing"),
            SelectOption::new("Électricité", "electricity"),
            SelectOption::new("Menuiserie", "carpentry"),
            SelectOption::new("Peinture", "painting"),
        ])
    }

    fn press(m: &mut Model, code: KeyCode) {
        m.update(Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg);
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_toggle_and_unselect() {
        let mut m = services();
        m.toggle("painting");
        m.toggle("plumbing");
        assert_eq!(m.selected(), ["painting", "plumbing"]);
        m.toggle("painting");
        assert_eq!(m.selected(), ["plumbing"]);
        m.unselect("plumbing");
        assert!(m.selected().is_empty());
    }

    #[test]
    fn test_unknown_values_ignored() {
        let mut m = services().with_selected(&["roofing", "carpentry"]);
        m.toggle("roofing");
        assert_eq!(m.selected(), ["carpentry"]);
        m.clear();
        assert!(m.selected().is_empty());
    }

    #[test]
    fn test_query_filters_labels() {
        let mut m = services();
        assert_eq!(m.visible_options().len(), 4);
        m.set_query("PEIN");
        let labels: Vec<&str> = m.visible_options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Peinture"]);
        m.set_query("zzz");
        assert!(m.visible_options().is_empty());
    }

    #[test]
    fn test_no_match_text_in_view() {
        let mut m = services();
        m.open();
        m.set_query("zzz");
        assert!(plain(&m.view()).contains("No match found."));
    }

    #[test]
    fn test_placeholder_and_badges() {
        let mut m = services().with_placeholder("Choisir des services");
        assert_eq!(plain(&m.view()), "Choisir des services");
        m.toggle("carpentry");
        assert!(plain(&m.view()).contains("Menuiserie ×"));
    }

    #[test]
    fn test_keyboard_flow() {
        let mut m = services();
        m.focus();
        press(&mut m, KeyCode::Enter);
        assert!(m.is_open());
        press(&mut m, KeyCode::Down);
        press(&mut m, KeyCode::Enter);
        assert_eq!(m.selected(), ["electricity"]);

        for c in "menu".chars() {
            press(&mut m, KeyCode::Char(c));
        }
        assert_eq!(m.query(), "menu");
        press(&mut m, KeyCode::Enter);
        assert_eq!(m.selected(), ["electricity", "carpentry"]);

        press(&mut m, KeyCode::Esc);
        assert!(!m.is_open());
        assert_eq!(m.query(), "");
        press(&mut m, KeyCode::Backspace);
        assert_eq!(m.selected(), ["electricity"]);
    }
}
