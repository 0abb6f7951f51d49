//! Programmatic operations on the data table.
//!
//! These are the same operations the key bindings trigger. None of them can
//! fail: unknown columns are ignored and out-of-range values are clamped.

use super::types::{Column, Record, SortDirection, SortSpec, ViewState};
use super::Model;
use crate::paginator::PageItem;
use std::collections::HashSet;
use tracing::{debug, info, warn};

impl<R: Record> Model<R> {
    // Search

    /// Replaces the search text and goes back to the first page.
    ///
    /// Matching is a case-insensitive substring test on the search column.
    /// Setting the text it already has changes nothing.
    pub fn set_search_text(&mut self, text: &str) {
        if self.search_text == text {
            return;
        }
        debug!(search = %text, "search text changed");
        self.search_text = text.to_string();
        if self.search_input.value() != text {
            self.search_input.set_value(text);
        }
        self.paginator.page = 0;
        self.cursor = 0;
        self.recompute();
    }

    /// The current search text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    // Sort

    /// Sorts by `column_id`. Unknown or non-sortable columns are ignored.
    pub fn set_sort(&mut self, column_id: &str, direction: SortDirection) {
        if !self.column(column_id).is_some_and(|c| c.sortable) {
            debug!(column = %column_id, "sort ignored");
            return;
        }
        let spec = SortSpec {
            column_id: column_id.to_string(),
            direction,
        };
        if self.sort.as_ref() == Some(&spec) {
            return;
        }
        debug!(column = %column_id, ?direction, "sort changed");
        self.sort = Some(spec);
        self.paginator.page = 0;
        self.cursor = 0;
        self.recompute();
    }

    /// Flips the direction when `column_id` is the sorted column, otherwise
    /// sorts it ascending.
    pub fn toggle_sort(&mut self, column_id: &str) {
        let direction = match &self.sort {
            Some(s) if s.column_id == column_id => s.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.set_sort(column_id, direction);
    }

    /// Removes the sort; rows go back to record order.
    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            debug!("sort cleared");
            self.paginator.page = 0;
            self.cursor = 0;
            self.recompute();
        }
    }

    /// The active sort.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    // Column visibility

    /// Shows or hides a hideable column. Returns `false` when nothing changed.
    ///
    /// Hidden columns still take part in search and sort.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> bool {
        if !self.column(column_id).is_some_and(|c| c.hideable) {
            return false;
        }
        if !self.hidden.remove(column_id) {
            self.hidden.insert(column_id.to_string());
        }
        let visible = self.visible_columns().len();
        self.focused_column = self.focused_column.min(visible.saturating_sub(1));
        true
    }

    /// Reports whether a column is shown.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column(column_id).is_some() && !self.hidden.contains(column_id)
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.columns
            .iter()
            .filter(|c| !self.hidden.contains(&c.id))
            .collect()
    }

    /// Ids of the visible columns in display order.
    pub fn visible_column_ids(&self) -> Vec<String> {
        self.visible_columns().iter().map(|c| c.id.clone()).collect()
    }

    /// Columns listed in the visibility menu: only hideable ones.
    pub fn hideable_columns(&self) -> Vec<&Column<R>> {
        self.columns.iter().filter(|c| c.hideable).collect()
    }

    // Paging

    /// Sets the rows per page and goes back to the first page.
    ///
    /// Sizes that are not one of the configured options are clamped to the
    /// nearest option.
    pub fn set_page_size(&mut self, n: usize) {
        let size = self.config.nearest_page_size(n);
        if size != n {
            warn!(requested = n, applied = size, "page size clamped to nearest option");
        }
        self.paginator.set_per_page(size);
        self.paginator.page = 0;
        self.cursor = 0;
        self.recompute();
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.paginator.per_page
    }

    /// Steps to the next larger (`grow`) or smaller page size option.
    pub fn step_page_size(&mut self, grow: bool) {
        let options = &self.config.page_size_options;
        let current = self.page_size();
        let next = if grow {
            options.iter().copied().find(|&o| o > current)
        } else {
            options.iter().rev().copied().find(|&o| o < current)
        };
        if let Some(size) = next {
            self.set_page_size(size);
        }
    }

    /// Goes to the 1-based page `n`, clamped into `1..=page_count`.
    pub fn go_to_page(&mut self, n: usize) {
        self.paginator.go_to_page(n);
        self.clamp_cursor();
    }

    /// `max(1, ceil(filtered / page_size))`.
    pub fn page_count(&self) -> usize {
        self.paginator.total_pages
    }

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    /// Reports whether a previous page exists.
    pub fn can_prev_page(&self) -> bool {
        !self.paginator.on_first_page()
    }

    /// Reports whether a next page exists.
    pub fn can_next_page(&self) -> bool {
        !self.paginator.on_last_page()
    }

    /// Next page; no-op on the last page.
    pub fn next_page(&mut self) {
        self.paginator.next_page();
        self.clamp_cursor();
    }

    /// Previous page; no-op on the first page.
    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
        self.clamp_cursor();
    }

    /// First page.
    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    /// Last page.
    pub fn last_page(&mut self) {
        self.go_to_page(self.page_count());
    }

    /// The compact page sequence for the page controls.
    pub fn page_range(&self) -> Vec<PageItem> {
        self.paginator.page_range()
    }

    // Derived rows

    /// Number of records passing the search.
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Records passing the search, in sorted order.
    pub fn filtered_records(&self) -> Vec<&R> {
        self.filtered.iter().map(|&i| &self.records[i]).collect()
    }

    /// Records on the current page.
    pub fn page_records(&self) -> Vec<&R> {
        let (start, end) = self.paginator.get_slice_bounds(self.filtered.len());
        self.filtered[start..end]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// `"Showing {start}-{end} of {total}"`, with 0-0 when nothing matches.
    pub fn display_summary(&self) -> String {
        let total = self.filtered.len();
        let (start, end) = self.paginator.display_bounds(total);
        format!("Showing {start}-{end} of {total}")
    }

    /// Snapshot of the view state.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            search_text: self.search_text.clone(),
            sort: self.sort.clone(),
            visible_column_ids: self.visible_column_ids(),
            page_index: self.paginator.page,
            page_size: self.paginator.per_page,
        }
    }

    // Records and row actions

    /// Replaces the records, keeping the view state. Row state of records
    /// that disappeared is dropped and the page is clamped.
    pub fn set_records(&mut self, records: Vec<R>) {
        let keys: HashSet<String> = records.iter().map(Record::key).collect();
        self.row_states.retain_keys(&keys);
        self.records = records;
        self.recompute();
    }

    /// Index of the cursor row within the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor up one row.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down one row, staying on the current page.
    pub fn cursor_down(&mut self) {
        self.cursor += 1;
        self.clamp_cursor();
    }

    /// The record under the cursor.
    pub fn selected_record(&self) -> Option<&R> {
        self.page_records().get(self.cursor).copied()
    }

    /// Opens the delete confirmation for `key`. Unknown keys are ignored.
    pub fn request_delete(&mut self, key: &str) {
        if self.records.iter().any(|r| r.key() == key) {
            self.row_states.open_delete(key);
        }
    }

    /// Closes the delete confirmation for `key`.
    pub fn cancel_delete(&mut self, key: &str) {
        self.row_states.close_delete(key);
    }

    /// Closes the confirmation for `key` and queues it for deletion. Does
    /// nothing unless the dialog for `key` was open.
    pub fn confirm_delete(&mut self, key: &str) {
        if self.row_states.close_delete(key) {
            info!(key = %key, "deletion confirmed");
            self.row_states.push_confirmed(key.to_string());
        }
    }

    /// Key of the row whose delete confirmation is open.
    pub fn pending_delete(&self) -> Option<&str> {
        self.row_states.pending_delete()
    }

    /// Drains the keys confirmed for deletion since the last call.
    pub fn take_confirmed_deletions(&mut self) -> Vec<String> {
        self.row_states.take_confirmed()
    }
}
