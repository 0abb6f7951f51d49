//! Data table configuration.
//!
//! A [`TableConfig`] can be built in code or decoded from JSON:
//!
//! ```rust
//! use tenderboard::config::TableConfig;
//!
//! let config = TableConfig::from_json(r#"{ "page_size_options": [5, 20], "default_page_size": 5 }"#).unwrap();
//! assert_eq!(config.page_size_options, vec![5, 20]);
//! assert_eq!(config.no_results_text, "No results.");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Page sizes offered by default.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Page size selected by default.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings shared by data table instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Allowed rows-per-page values, ascending.
    pub page_size_options: Vec<usize>,
    /// Initial rows per page; must be one of `page_size_options`.
    pub default_page_size: usize,
    /// Placeholder of the search box.
    pub search_placeholder: String,
    /// Text shown when no record passes the search.
    pub no_results_text: String,
    /// Whether the key help line is rendered under the table.
    pub show_help: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            search_placeholder: "Search...".to_string(),
            no_results_text: "No results.".to_string(),
            show_help: true,
        }
    }
}

impl TableConfig {
    /// Decodes and validates a configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Sets the page size options (builder pattern).
    /// Options are sorted ascending and deduplicated.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self.normalize();
        self
    }

    /// Sorts the page size options ascending and drops duplicates.
    pub fn normalize(&mut self) {
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
    }

    /// Sets the default page size (builder pattern).
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the empty-state text (builder pattern).
    pub fn with_no_results_text(mut self, text: &str) -> Self {
        self.no_results_text = text.to_string();
        self
    }

    /// Checks that options are non-empty and non-zero and contain the default.
    pub fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            return Err(Error::InvalidConfig(
                "page_size_options must not be empty".to_string(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(Error::InvalidConfig(
                "page sizes must be greater than zero".to_string(),
            ));
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(Error::InvalidConfig(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_size_options
            )));
        }
        Ok(())
    }

    /// The allowed page size closest to `n`. Ties go to the smaller option.
    ///
    /// Falls back to `n.max(1)` when no options are configured.
    pub fn nearest_page_size(&self, n: usize) -> usize {
        self.page_size_options
            .iter()
            .copied()
            .min_by_key(|&option| (option.abs_diff(n), option))
            .unwrap_or(n.max(1))
    }
}
