//! Core types for data table functionality.
//!
//! This module defines the [`Record`] trait rows must implement, the
//! [`Column`] descriptor mapping a record to a cell, the typed [`CellValue`]
//! used for sorting, and the [`ViewState`] snapshot of a table.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A row of a data table.
///
/// Records are owned by the caller; the table only reads them. The key
/// identifies a record across [`Model::set_records`](super::Model::set_records)
/// calls and addresses per-row state such as the delete confirmation.
///
/// ```rust
/// use tenderboard::datatable::Record;
///
/// #[derive(Clone)]
/// struct Intervenant { id: u32, name: String }
///
/// impl Record for Intervenant {
///     fn key(&self) -> String { self.id.to_string() }
/// }
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable identity of the record.
    fn key(&self) -> String;
}

/// A typed cell value. Sorting compares values of the same kind natively.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value.
    Empty,
    /// Free text; compared case-insensitively.
    Text(String),
    /// A number.
    Number(f64),
    /// A calendar date.
    Date(NaiveDate),
}

impl CellValue {
    /// Orders two values. `Empty` sorts before anything else; values of
    /// different kinds fall back to their text form.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;
type Formatter<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Describes one column: its identifier, header, how to read a cell from a
/// record and whether it can be sorted or hidden.
///
/// ```rust
/// use tenderboard::datatable::{CellValue, Column, Record};
///
/// #[derive(Clone)]
/// struct Row { id: u32, name: String }
/// impl Record for Row { fn key(&self) -> String { self.id.to_string() } }
///
/// let name = Column::new("name", "Name", |r: &Row| r.name.as_str().into());
/// let actions = Column::new("actions", "", |_: &Row| CellValue::Empty)
///     .with_display(|_: &Row| "delete".to_string())
///     .with_sortable(false)
///     .with_hideable(false);
///
/// let row = Row { id: 1, name: "Lot 3".into() };
/// assert_eq!(name.cell_text(&row), "Lot 3");
/// assert_eq!(actions.cell_text(&row), "delete");
/// ```
pub struct Column<R> {
    /// Unique identifier within one table.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Whether the column can be hidden.
    pub hideable: bool,
    /// Fixed display width; measured from content when `None`.
    pub width: Option<usize>,
    accessor: Accessor<R>,
    display: Option<Formatter<R>>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
            width: self.width,
            accessor: Arc::clone(&self.accessor),
            display: self.display.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("width", &self.width)
            .finish()
    }
}

impl<R> Column<R> {
    /// Creates a sortable, hideable column.
    pub fn new<F>(id: &str, header: &str, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.to_string(),
            header: header.to_string(),
            sortable: true,
            hideable: true,
            width: None,
            accessor: Arc::new(accessor),
            display: None,
        }
    }

    /// Sets whether the column can be sorted (builder pattern).
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether the column can be hidden (builder pattern).
    pub fn with_hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    /// Fixes the column width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Overrides how the cell is displayed (builder pattern). Sorting and
    /// search keep using the accessor value.
    pub fn with_display<F>(mut self, display: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.display = Some(Arc::new(display));
        self
    }

    /// The typed value of this column for `record`.
    pub fn value(&self, record: &R) -> CellValue {
        (self.accessor)(record)
    }

    /// The displayed text of this column for `record`.
    pub fn cell_text(&self, record: &R) -> String {
        match &self.display {
            Some(display) => display(record),
            None => self.value(record).to_string(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The active single-column sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Sorted column.
    pub column_id: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Snapshot of everything the user can change on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Current search text, empty when not searching.
    pub search_text: String,
    /// Active sort, if any.
    pub sort: Option<SortSpec>,
    /// Visible column ids in column order.
    pub visible_column_ids: Vec<String>,
    /// 0-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
}

/// What keyboard input currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigating rows and pages.
    #[default]
    Browsing,
    /// Typing into the search box.
    Searching,
    /// The column visibility menu is open.
    ColumnMenu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_compares_case_insensitively() {
        let a = CellValue::from("alpha");
        let b = CellValue::from("Beta");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(CellValue::Empty.compare(&CellValue::Number(0.0)), Ordering::Less);
        assert_eq!(CellValue::Number(0.0).compare(&CellValue::Empty), Ordering::Greater);
    }

    #[test]
    fn test_numbers_and_dates() {
        assert_eq!(CellValue::from(10usize).compare(&CellValue::from(9usize)), Ordering::Greater);
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(CellValue::from(d1).compare(&CellValue::from(d2)), Ordering::Greater);
        assert_eq!(CellValue::from(d1).to_string(), "02/01/2025");
    }

    #[test]
    fn test_option_into_cell() {
        let none: Option<&str> = None;
        assert_eq!(CellValue::from(none), CellValue::Empty);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }
}
