//! View rendering for the data table.

use super::style::{COLUMN_GAP, ELLIPSIS};
use super::types::{Column, Mode, Record};
use super::Model;
use crate::key::{self, KeyMap};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cuts `text` to `width` display columns, ending with an ellipsis when cut.
pub(super) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if used + w + ELLIPSIS.width() > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Left-aligns `text` in `width` display columns. Escape sequences take
/// no room.
pub(super) fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(strip_ansi_escapes::strip_str(text).width());
    format!("{}{}", text, " ".repeat(fill))
}

impl<R: Record> Model<R> {
    fn header_label(&self, column: &Column<R>) -> String {
        match &self.sort {
            Some(s) if s.column_id == column.id => {
                format!("{} {}", column.header, s.direction.indicator())
            }
            _ => column.header.clone(),
        }
    }

    fn column_widths(&self, columns: &[&Column<R>], rows: &[&R]) -> Vec<usize> {
        columns
            .iter()
            .map(|c| {
                c.width.unwrap_or_else(|| {
                    rows.iter()
                        .map(|r| c.cell_text(r).width())
                        .chain(std::iter::once(self.header_label(c).width()))
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect()
    }

    pub(super) fn view_header(&self) -> String {
        let mut lines = Vec::new();
        if !self.title.is_empty() {
            lines.push(self.styles.title.clone().render(&self.title));
        }
        if self.mode == Mode::Searching || !self.search_text.is_empty() {
            lines.push(self.search_input.view());
        }
        lines.join("\n")
    }

    pub(super) fn view_table(&self) -> String {
        let columns = self.visible_columns();
        let rows = self.page_records();
        let widths = self.column_widths(&columns, &rows);

        let header = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (c, &w))| {
                let text = pad(&truncate(&self.header_label(c), w), w);
                if i == self.focused_column {
                    self.styles.focused_header.clone().render(&text)
                } else {
                    self.styles.header.clone().render(&text)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);

        let mut lines = vec![header];

        if rows.is_empty() {
            lines.push(
                self.styles
                    .no_results
                    .clone()
                    .render(&self.config.no_results_text),
            );
            return lines.join("\n");
        }

        for (i, record) in rows.iter().enumerate() {
            let text = columns
                .iter()
                .zip(&widths)
                .map(|(c, &w)| pad(&truncate(&c.cell_text(record), w), w))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            let style = if i == self.cursor && self.mode == Mode::Browsing {
                &self.styles.selected_row
            } else {
                &self.styles.cell
            };
            lines.push(style.clone().render(&text));
        }
        lines.join("\n")
    }

    pub(super) fn view_footer(&self) -> String {
        let summary = format!(
            "{} • Rows per page: {}",
            self.display_summary(),
            self.page_size()
        );
        let mut parts = vec![self.styles.summary.clone().render(&summary)];
        if self.page_count() > 1 {
            parts.push(self.styles.pagination.clone().render(&self.paginator.view()));
        }
        parts.join("  ")
    }

    pub(super) fn view_confirm(&self) -> Option<String> {
        let key = self.pending_delete()?;
        let label = self
            .records
            .iter()
            .find(|r| r.key() == key)
            .and_then(|r| self.column(&self.search_column).map(|c| c.cell_text(r)))
            .unwrap_or_else(|| key.to_string());
        let text = format!(
            "Delete \"{}\"? This cannot be undone. (y confirm • n cancel)",
            label
        );
        Some(self.styles.confirm.clone().render(&text))
    }

    pub(super) fn view_column_menu(&self) -> String {
        self.hideable_columns()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mark = if self.is_column_visible(&c.id) { "[x]" } else { "[ ]" };
                let label = if c.header.is_empty() { &c.id } else { &c.header };
                let text = format!("{mark} {label}");
                if i == self.menu_cursor {
                    self.styles.menu_selected.clone().render(&text)
                } else {
                    self.styles.menu_item.clone().render(&text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(super) fn view_help(&self) -> String {
        let separator = " • ";
        let text = match self.mode {
            Mode::Searching => {
                key::help_line(&[&self.keymap.accept_search, &self.keymap.cancel_search], separator)
            }
            Mode::ColumnMenu => key::help_line(
                &[
                    &self.keymap.cursor_up,
                    &self.keymap.cursor_down,
                    &self.keymap.toggle_column,
                    &self.keymap.close,
                ],
                separator,
            ),
            Mode::Browsing if self.show_full_help => self
                .keymap
                .full_help()
                .iter()
                .map(|group| key::help_line(group, separator))
                .collect::<Vec<_>>()
                .join("\n"),
            Mode::Browsing => key::help_line(&self.keymap.short_help(), separator),
        };
        self.styles.help.clone().render(&text)
    }
}
