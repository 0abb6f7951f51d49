//! Key bindings for data table navigation and interaction.
//!
//! ## Navigation Keys
//!
//! - **Rows**: `↑/k`, `↓/j`
//! - **Pages**: `→/l/pgdn` (next), `←/h/pgup` (previous), `home/g` and `end/G`
//! - **Columns**: `tab` / `shift+tab` move the column focus
//!
//! ## Table Keys
//!
//! - **Search**: `/` starts typing, `enter`/`esc` leave the search box
//! - **Sort**: `s` sorts by the focused column, `c` clears the sort
//! - **Columns**: `v` opens the visibility menu, `space` toggles an entry
//! - **Page size**: `+` / `-`
//! - **Delete**: `x` asks for confirmation, `y` confirms, `n`/`esc` cancels

use crate::key;
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings of the data table.
#[derive(Debug, Clone)]
pub struct DataTableKeyMap {
    /// Move the row cursor up.
    pub cursor_up: key::Binding,
    /// Move the row cursor down.
    pub cursor_down: key::Binding,
    /// Next page.
    pub next_page: key::Binding,
    /// Previous page.
    pub prev_page: key::Binding,
    /// First page.
    pub first_page: key::Binding,
    /// Last page.
    pub last_page: key::Binding,
    /// Focus the next column.
    pub next_column: key::Binding,
    /// Focus the previous column.
    pub prev_column: key::Binding,
    /// Enter the search box.
    pub search: key::Binding,
    /// Leave the search box keeping the text.
    pub accept_search: key::Binding,
    /// Leave the search box.
    pub cancel_search: key::Binding,
    /// Toggle sorting on the focused column.
    pub sort: key::Binding,
    /// Remove the sort.
    pub clear_sort: key::Binding,
    /// Open or close the column visibility menu.
    pub columns_menu: key::Binding,
    /// Toggle the column under the menu cursor.
    pub toggle_column: key::Binding,
    /// Close menus and dialogs.
    pub close: key::Binding,
    /// Next larger page size.
    pub grow_page_size: key::Binding,
    /// Next smaller page size.
    pub shrink_page_size: key::Binding,
    /// Ask to delete the row under the cursor.
    pub delete: key::Binding,
    /// Confirm the open delete dialog.
    pub confirm: key::Binding,
    /// Cancel the open delete dialog.
    pub cancel: key::Binding,
    /// Show or hide the full help.
    pub help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
}

impl Default for DataTableKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::PageDown])
                .with_help("→/l", "next page"),
            prev_page: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            first_page: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("home/g", "first page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("end/G", "last page"),
            next_column: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "next column"),
            prev_column: key::Binding::new(vec![(KeyCode::BackTab, KeyModifiers::SHIFT)])
                .with_help("shift+tab", "prev column"),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            accept_search: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "done"),
            cancel_search: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "done"),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            clear_sort: key::Binding::new(vec![KeyCode::Char('c')]).with_help("c", "clear sort"),
            columns_menu: key::Binding::new(vec![KeyCode::Char('v')]).with_help("v", "columns"),
            toggle_column: key::Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "show/hide"),
            close: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
            grow_page_size: key::Binding::new(vec![KeyCode::Char('+'), KeyCode::Char('=')])
                .with_help("+/-", "rows per page"),
            shrink_page_size: key::Binding::new(vec![KeyCode::Char('-')])
                .with_help("-", "fewer rows"),
            delete: key::Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
                .with_help("x", "delete"),
            confirm: key::Binding::new(vec![KeyCode::Char('y')]).with_help("y", "confirm"),
            cancel: key::Binding::new(vec![KeyCode::Char('n'), KeyCode::Esc])
                .with_help("n", "cancel"),
            help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: key::new_binding(vec![key::with_keys_str(&["q", "ctrl+c"])])
                .with_help("q", "quit"),
        }
    }
}

impl key::KeyMap for DataTableKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.prev_page,
            &self.next_page,
            &self.search,
            &self.sort,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.next_page,
                &self.prev_page,
                &self.first_page,
                &self.last_page,
            ],
            vec![
                &self.search,
                &self.next_column,
                &self.prev_column,
                &self.sort,
                &self.clear_sort,
                &self.columns_menu,
            ],
            vec![&self.grow_page_size, &self.delete, &self.help, &self.quit],
        ]
    }
}
