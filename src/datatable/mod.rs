//! Generic in-memory data table with search, sort, column visibility and pagination.
//!
//! This module exposes a generic `Model<R: Record>` plus supporting types:
//! - `Record`: implement for your row type; supplies the key identifying a row
//! - `Column`: identifier, header and accessor mapping a record to a `CellValue`
//! - Submodules: `keys` and `style`
//!
//! ## Processing order
//!
//! Rows always flow through the same pipeline, starting from the full record
//! set on every change:
//!
//! 1. **Search**: case-insensitive substring match on the designated column
//! 2. **Sort**: stable single-column sort on typed cell values
//! 3. **Paginate**: slice the current page out of the result
//!
//! Changing the search text, the sort or the page size goes back to the first
//! page. Any other change that leaves the page past the end clamps it.
//!
//! ## Modes
//!
//! - `Browsing`: rows, pages, columns and row actions
//! - `Searching`: keys edit the search box, results update as you type
//! - `ColumnMenu`: the visibility menu lists hideable columns
//!
//! While a delete confirmation is open only `y` and `n`/`esc` are handled.

/// Key bindings for the data table.
pub mod keys;

/// Visual styling for the data table.
pub mod style;

mod api;
mod filtering;
mod model;
mod rendering;
mod row_state;
mod types;

#[cfg(test)]
mod tests;

pub use keys::DataTableKeyMap;
pub use model::Model;
pub use row_state::RowState;
pub use style::DataTableStyles;
pub use types::{CellValue, Column, Mode, Record, SortDirection, SortSpec, ViewState};

use crate::key::KeyMap;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};

impl<R: Record> KeyMap for Model<R> {
    fn short_help(&self) -> Vec<&crate::key::Binding> {
        match self.mode {
            Mode::Searching => vec![&self.keymap.accept_search, &self.keymap.cancel_search],
            Mode::ColumnMenu => vec![&self.keymap.toggle_column, &self.keymap.close],
            Mode::Browsing => self.keymap.short_help(),
        }
    }

    fn full_help(&self) -> Vec<Vec<&crate::key::Binding>> {
        self.keymap.full_help()
    }
}

impl<R: Record> Model<R> {
    fn handle_search_key(&mut self, key_msg: &KeyMsg) {
        if self.keymap.accept_search.matches(key_msg) || self.keymap.cancel_search.matches(key_msg) {
            self.mode = Mode::Browsing;
            self.search_input.blur();
            return;
        }
        if self.search_input.handle_key(key_msg) {
            let text = self.search_input.value();
            self.set_search_text(&text);
        }
    }

    fn handle_menu_key(&mut self, key_msg: &KeyMsg) {
        let entries = self.hideable_columns().len();
        if self.keymap.close.matches(key_msg) || self.keymap.columns_menu.matches(key_msg) {
            self.mode = Mode::Browsing;
        } else if self.keymap.cursor_up.matches(key_msg) {
            self.menu_cursor = self.menu_cursor.saturating_sub(1);
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.menu_cursor = (self.menu_cursor + 1).min(entries.saturating_sub(1));
        } else if self.keymap.toggle_column.matches(key_msg) {
            if let Some(id) = self.hideable_columns().get(self.menu_cursor).map(|c| c.id.clone()) {
                self.toggle_column_visibility(&id);
            }
        }
    }

    fn handle_confirm_key(&mut self, key_msg: &KeyMsg, key: &str) {
        if self.keymap.confirm.matches(key_msg) {
            self.confirm_delete(key);
        } else if self.keymap.cancel.matches(key_msg) {
            self.cancel_delete(key);
        }
    }

    fn handle_browse_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let visible = self.visible_columns().len();
        if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        } else if self.keymap.cursor_up.matches(key_msg) {
            self.cursor_up();
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.cursor_down();
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.first_page.matches(key_msg) {
            self.first_page();
        } else if self.keymap.last_page.matches(key_msg) {
            self.last_page();
        } else if self.keymap.next_column.matches(key_msg) {
            if visible > 0 {
                self.focused_column = (self.focused_column + 1) % visible;
            }
        } else if self.keymap.prev_column.matches(key_msg) {
            if visible > 0 {
                self.focused_column = (self.focused_column + visible - 1) % visible;
            }
        } else if self.keymap.search.matches(key_msg) {
            self.mode = Mode::Searching;
            return self.search_input.focus();
        } else if self.keymap.sort.matches(key_msg) {
            if let Some(id) = self.visible_columns().get(self.focused_column).map(|c| c.id.clone()) {
                self.toggle_sort(&id);
            }
        } else if self.keymap.clear_sort.matches(key_msg) {
            self.clear_sort();
        } else if self.keymap.columns_menu.matches(key_msg) {
            self.menu_cursor = 0;
            self.mode = Mode::ColumnMenu;
        } else if self.keymap.grow_page_size.matches(key_msg) {
            self.step_page_size(true);
        } else if self.keymap.shrink_page_size.matches(key_msg) {
            self.step_page_size(false);
        } else if self.keymap.delete.matches(key_msg) {
            if let Some(key) = self.selected_record().map(Record::key) {
                self.request_delete(&key);
            }
        } else if self.keymap.help.matches(key_msg) {
            self.show_full_help = !self.show_full_help;
        }
        None
    }
}

impl<R: Record> BubbleTeaModel for Model<R> {
    /// An empty table with no columns.
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new(), Vec::new(), ""), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if let Some(key) = self.pending_delete().map(str::to_string) {
            self.handle_confirm_key(key_msg, &key);
            return None;
        }

        match self.mode {
            Mode::Searching => {
                self.handle_search_key(key_msg);
                None
            }
            Mode::ColumnMenu => {
                self.handle_menu_key(key_msg);
                None
            }
            Mode::Browsing => self.handle_browse_key(key_msg),
        }
    }

    fn view(&self) -> String {
        let mut sections = Vec::new();

        let header = self.view_header();
        if !header.is_empty() {
            sections.push(header);
        }

        sections.push(self.view_table());
        sections.push(self.view_footer());

        if let Some(confirm) = self.view_confirm() {
            sections.push(confirm);
        }

        if self.mode == Mode::ColumnMenu {
            sections.push(self.view_column_menu());
        }

        if self.config.show_help {
            sections.push(self.view_help());
        }

        sections.join("\n")
    }
}
