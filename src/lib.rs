#![warn(missing_docs)]

//! # tenderboard
//!
//! Terminal UI components for a project and tender management dashboard,
//! built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs) and styled
//! with lipgloss.
//!
//! ## Overview
//!
//! The centerpiece is a generic [`datatable::Model`]: an in-memory table that
//! searches, sorts, hides columns and paginates any record type. Around it sit
//! the pieces a dashboard needs:
//!
//! - **Data table**: [`datatable`] with page-size options from [`config`] and
//!   an ellipsis page range from [`paginator`]
//! - **Inputs**: [`textinput`], [`multiselect`] and the [`session::LoginForm`]
//! - **Filtering**: quick and custom date ranges in [`daterange`]
//! - **Navigation**: the project creation [`wizard`]
//! - **Domain**: projects, tenders, dispatch reports, intervenants, the
//!   document gallery and their sample data in [`dashboard`]
//!
//! Authentication, tender dispatch and persistence belong to a backend; the
//! crate only defines the [`session::Authenticator`] seam.
//!
//! ## Quick start
//!
//! ```rust
//! use tenderboard::prelude::*;
//!
//! #[derive(Clone)]
//! struct Row { id: u32, name: String }
//!
//! impl Record for Row {
//!     fn key(&self) -> String { self.id.to_string() }
//! }
//!
//! let rows = vec![
//!     Row { id: 1, name: "Usine".into() },
//!     Row { id: 2, name: "Atelier".into() },
//! ];
//! let columns = vec![Column::new("name", "Name", |r: &Row| r.name.as_str().into())];
//! let mut table = DataTable::new(rows, columns, "name");
//!
//! table.toggle_sort("name");
//! assert_eq!(table.page_records()[0].name, "Atelier");
//! ```
//!
//! ## Logging
//!
//! Components log state changes through `tracing`. The library never
//! installs a subscriber; applications choose where events go.

pub mod config;
pub mod dashboard;
pub mod datatable;
pub mod daterange;
pub mod error;
pub mod key;
pub mod multiselect;
pub mod paginator;
pub mod session;
pub mod textinput;
pub mod wizard;

use bubbletea_rs::Cmd;

/// Components that take keyboard focus.
///
/// A focused component handles key messages; a blurred one ignores them and
/// renders in its inactive style.
///
/// ```rust
/// use tenderboard::prelude::*;
///
/// let mut input = TextInput::default();
/// assert!(!input.focused());
/// input.focus();
/// assert!(input.focused());
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Focuses the component. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Reports whether the component has focus.
    fn focused(&self) -> bool;
}

pub use config::TableConfig;
pub use datatable::Model as DataTable;
pub use error::{Error, Result};
pub use key::{
    help_line, matches, new_binding, with_disabled, with_help, with_keys_str, Binding, KeyMap,
    KeyPress,
};
pub use multiselect::Model as MultiSelect;
pub use paginator::Model as Paginator;
pub use session::{LoginForm, Session};
pub use textinput::Model as TextInput;
pub use wizard::Model as Wizard;

/// Common imports.
///
/// ```rust
/// use tenderboard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::TableConfig;
    pub use crate::datatable::{
        CellValue, Column, DataTableKeyMap, DataTableStyles, Mode, Record, SortDirection,
        SortSpec, ViewState,
    };
    pub use crate::daterange::{DateRange, DateRangeFilter, QuickRange};
    pub use crate::error::Error;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::multiselect::SelectOption;
    pub use crate::paginator::PageItem;
    pub use crate::session::{Authenticator, Credentials, StaticAuthenticator};
    pub use crate::textinput::EchoMode;
    pub use crate::{
        Component, DataTable, LoginForm, MultiSelect, Paginator, Session, TextInput, Wizard,
    };
}
