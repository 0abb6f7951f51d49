//! The search, sort and pagination pipeline.
//!
//! Every state change calls [`Model::recompute`], which always starts from
//! the full record set: records that match the search text are kept, the
//! survivors are stably sorted by the active sort column, and the paginator
//! is resized to the result, clamping the current page.

use super::types::{Record, SortDirection};
use super::Model;
use tracing::trace;

/// Case-insensitive substring match. An empty needle matches everything.
pub(super) fn includes_text(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl<R: Record> Model<R> {
    pub(super) fn recompute(&mut self) {
        let search_column = self.column(&self.search_column);
        let needle = self.search_text.as_str();

        let mut filtered: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| match search_column {
                Some(column) => includes_text(&column.cell_text(record), needle),
                None => true,
            })
            .map(|(index, _)| index)
            .collect();

        if let Some(sort) = &self.sort {
            if let Some(column) = self.column(&sort.column_id) {
                let records = &self.records;
                filtered.sort_by(|&a, &b| {
                    let ord = column.value(&records[a]).compare(&column.value(&records[b]));
                    match sort.direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                });
            }
        }

        trace!(
            total = self.records.len(),
            matched = filtered.len(),
            "data table recomputed"
        );
        self.filtered = filtered;
        self.paginator.set_total_items(self.filtered.len());
        self.clamp_cursor();
    }

    pub(super) fn clamp_cursor(&mut self) {
        let rows = self.paginator.items_on_page(self.filtered.len());
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::includes_text;

    #[test]
    fn test_includes_text() {
        assert!(includes_text("Complexe Résidentiel", "résid"));
        assert!(includes_text("Tour de Bureaux", "BUREAU"));
        assert!(includes_text("anything", ""));
        assert!(!includes_text("Rénovation", "tour"));
    }
}
