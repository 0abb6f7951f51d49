//! Styles for data table rendering.
//!
//! All defaults use `AdaptiveColor` so the table reads on light and dark
//! terminals.
//!
//! ```rust
//! use tenderboard::datatable::DataTableStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = DataTableStyles::default();
//! styles.header = Style::new().bold(true);
//! ```

use lipgloss_extras::prelude::*;

/// Separator between columns.
pub const COLUMN_GAP: &str = "  ";

/// Marks truncated cell text.
pub const ELLIPSIS: &str = "…";

/// Styling of every element of the table.
#[derive(Debug, Clone)]
pub struct DataTableStyles {
    /// Table title.
    pub title: Style,
    /// Column headers.
    pub header: Style,
    /// Header of the focused column.
    pub focused_header: Style,
    /// Body cells.
    pub cell: Style,
    /// Row under the cursor.
    pub selected_row: Style,
    /// Empty-state placeholder.
    pub no_results: Style,
    /// "Showing x-y of z" and rows-per-page text.
    pub summary: Style,
    /// Page range.
    pub pagination: Style,
    /// Delete confirmation line.
    pub confirm: Style,
    /// Column menu entries.
    pub menu_item: Style,
    /// Column menu entry under the cursor.
    pub menu_selected: Style,
    /// Help line.
    pub help: Style,
}

impl Default for DataTableStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        let accent = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            header: Style::new().bold(true),
            focused_header: Style::new().bold(true).underline(true).foreground(accent.clone()),
            cell: Style::new(),
            selected_row: Style::new().foreground(accent),
            no_results: Style::new().foreground(subdued.clone()),
            summary: Style::new().foreground(subdued.clone()),
            pagination: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            confirm: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#C0392B",
                Dark: "#FF5F5F",
            }),
            menu_item: Style::new().padding_left(2),
            menu_selected: Style::new().padding_left(2).foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            help: Style::new().foreground(subdued),
        }
    }
}
