//! The data table model: construction, builders and accessors.

use super::keys::DataTableKeyMap;
use super::row_state::RowStates;
use super::style::DataTableStyles;
use super::types::{Column, Mode, Record, SortSpec};
use crate::config::TableConfig;
use crate::{paginator, textinput};
use std::collections::HashSet;
use tracing::warn;

/// A generic in-memory data table.
///
/// The table owns its view state (search text, sort, hidden columns, page)
/// and derives the visible rows from the records on every change:
/// search filter, then sort, then page slicing. Records themselves are never
/// modified; deleting rows goes through a confirmation queue the owner
/// drains with [`Model::take_confirmed_deletions`].
///
/// ```rust
/// use tenderboard::datatable::{Column, Model, Record};
///
/// #[derive(Clone)]
/// struct Row { id: usize, name: String }
/// impl Record for Row { fn key(&self) -> String { self.id.to_string() } }
///
/// let rows: Vec<Row> = (1..=7).map(|id| Row { id, name: format!("Project {id}") }).collect();
/// let columns = vec![
///     Column::new("id", "ID", |r: &Row| r.id.into()),
///     Column::new("name", "Name", |r: &Row| r.name.clone().into()),
/// ];
///
/// let mut table = Model::new(rows, columns, "name");
/// table.set_page_size(5);
/// assert_eq!(table.page_count(), 2);
/// assert_eq!(table.page_records().len(), 5);
///
/// table.next_page();
/// assert_eq!(table.page_records().len(), 2);
/// assert_eq!(table.display_summary(), "Showing 6-7 of 7");
/// ```
pub struct Model<R: Record> {
    pub(super) title: String,
    pub(super) records: Vec<R>,
    pub(super) columns: Vec<Column<R>>,
    pub(super) search_column: String,
    pub(super) config: TableConfig,

    // View state
    pub(super) search_text: String,
    pub(super) sort: Option<SortSpec>,
    pub(super) hidden: HashSet<String>,
    pub(super) paginator: paginator::Model,

    // Derived: indices into `records` after search and sort
    pub(super) filtered: Vec<usize>,

    // Interaction
    pub(super) mode: Mode,
    pub(super) cursor: usize,
    pub(super) focused_column: usize,
    pub(super) menu_cursor: usize,
    pub(super) search_input: textinput::Model,
    pub(super) row_states: RowStates,
    pub(super) show_full_help: bool,

    pub(super) keymap: DataTableKeyMap,
    pub(super) styles: DataTableStyles,
}

impl<R: Record> Model<R> {
    /// Creates a table over `records` with the default [`TableConfig`].
    ///
    /// `search_column` names the column the search box matches against.
    /// Columns with an id already used by an earlier column are dropped.
    pub fn new(records: Vec<R>, columns: Vec<Column<R>>, search_column: &str) -> Self {
        let mut seen = HashSet::new();
        let columns: Vec<Column<R>> = columns
            .into_iter()
            .filter(|c| {
                let fresh = seen.insert(c.id.clone());
                if !fresh {
                    warn!(column = %c.id, "duplicate column id dropped");
                }
                fresh
            })
            .collect();

        if !search_column.is_empty() && !columns.iter().any(|c| c.id == search_column) {
            warn!(column = %search_column, "search column does not exist; search disabled");
        }

        let config = TableConfig::default();
        let search_input = textinput::new()
            .with_prompt("/ ")
            .with_placeholder(&config.search_placeholder);
        let paginator = paginator::Model::new().with_per_page(config.default_page_size);

        let mut model = Self {
            title: String::new(),
            records,
            columns,
            search_column: search_column.to_string(),
            config,
            search_text: String::new(),
            sort: None,
            hidden: HashSet::new(),
            paginator,
            filtered: Vec::new(),
            mode: Mode::Browsing,
            cursor: 0,
            focused_column: 0,
            menu_cursor: 0,
            search_input,
            row_states: RowStates::default(),
            show_full_help: false,
            keymap: DataTableKeyMap::default(),
            styles: DataTableStyles::default(),
        };
        model.recompute();
        model
    }

    /// Applies a configuration (builder pattern). An invalid configuration is
    /// logged and ignored.
    pub fn with_config(mut self, mut config: TableConfig) -> Self {
        config.normalize();
        if let Err(err) = config.validate() {
            warn!(%err, "ignoring table configuration");
            return self;
        }
        self.search_input.placeholder = config.search_placeholder.clone();
        self.paginator.set_per_page(config.default_page_size);
        self.paginator.page = 0;
        self.config = config;
        self.recompute();
        self
    }

    /// Sets the title rendered above the table (builder pattern).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Replaces the styles (builder pattern).
    pub fn with_styles(mut self, styles: DataTableStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: DataTableKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// The table title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The active configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// All records, unfiltered, in the order they were given.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Column descriptors in display order, hidden ones included.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The designated search column id.
    pub fn search_column(&self) -> &str {
        &self.search_column
    }

    /// Current input mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mutable access to the styles.
    pub fn styles_mut(&mut self) -> &mut DataTableStyles {
        &mut self.styles
    }

    /// The key bindings.
    pub fn keymap(&self) -> &DataTableKeyMap {
        &self.keymap
    }

    pub(super) fn column(&self, id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id == id)
    }
}
