//! Tender dispatch reports.
//!
//! Tenders are narrowed by status and date before they reach the table, so
//! the table's own search, sort and pagination only ever see rows that pass
//! both filters.

use super::fixtures;
use crate::daterange::{parse_french_date, DateRangeFilter, QuickRange};
use crate::datatable::{self, CellValue, Column, Mode, Record};
use crate::key::{Binding, KeyMap};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use chrono::NaiveDate;
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Outcome of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenderStatus {
    /// Delivered to the intervenants.
    Sent,
    /// Delivery failed.
    Failed,
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TenderStatus::Sent => "Sent",
            TenderStatus::Failed => "Failed",
        })
    }
}

/// A tender sent to intervenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    /// Identifier.
    pub id: String,
    /// Tender name.
    pub name: String,
    /// Dispatch date as received, e.g. "12 nov. 2025".
    pub date: String,
    /// Dispatch outcome.
    pub status: TenderStatus,
    /// Number of intervenants reached.
    pub intervenant_count: usize,
}

impl Tender {
    /// The dispatch date, when it parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_french_date(&self.date)
    }
}

impl Record for Tender {
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Status filter of the tenders page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// Sent only.
    Sent,
    /// Failed only.
    Failed,
}

impl StatusFilter {
    /// Cycles all → sent → failed → all.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Sent,
            StatusFilter::Sent => StatusFilter::Failed,
            StatusFilter::Failed => StatusFilter::All,
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All statuses",
            StatusFilter::Sent => "Sent",
            StatusFilter::Failed => "Failed",
        }
    }

    /// Reports whether `status` passes.
    pub fn matches(self, status: TenderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Sent => status == TenderStatus::Sent,
            StatusFilter::Failed => status == TenderStatus::Failed,
        }
    }
}

/// Status and date filters applied ahead of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenderFilters {
    /// Status filter.
    pub status: StatusFilter,
    /// Quick and custom date ranges.
    pub dates: DateRangeFilter,
}

impl TenderFilters {
    /// The tenders passing both filters, in input order.
    pub fn apply(&self, tenders: &[Tender], today: NaiveDate) -> Vec<Tender> {
        tenders
            .iter()
            .filter(|t| self.status.matches(t.status))
            .filter(|t| self.dates.matches_text(&t.date, today))
            .cloned()
            .collect()
    }

    /// One-line description of the active filters.
    pub fn describe(&self, today: NaiveDate) -> String {
        let dates = match self.dates.active_range(today) {
            Some(range) if self.dates.quick() == QuickRange::All => range.to_string(),
            Some(_) => self.dates.quick().label().to_string(),
            None => QuickRange::All.label().to_string(),
        };
        format!("{} • {}", self.status.label(), dates)
    }
}

/// Columns of the tenders table.
pub fn tender_columns() -> Vec<Column<Tender>> {
    vec![
        Column::new("name", "Tender", |t: &Tender| t.name.as_str().into()).with_width(34),
        Column::new("date", "Date", |t: &Tender| t.parsed_date().into())
            .with_display(|t: &Tender| t.date.clone()),
        Column::new("status", "Status", |t: &Tender| t.status.to_string().into()),
        Column::new("intervenants", "Intervenants", |t: &Tender| {
            t.intervenant_count.into()
        }),
        Column::new("actions", "", |_: &Tender| CellValue::Empty)
            .with_display(|_: &Tender| "view · delete".to_string())
            .with_sortable(false)
            .with_hideable(false),
    ]
}

/// Key bindings the tenders page adds on top of the table's.
#[derive(Debug, Clone)]
pub struct TendersKeyMap {
    /// Cycle the status filter.
    pub cycle_status: Binding,
    /// Cycle the quick date range.
    pub cycle_dates: Binding,
    /// Clear every date restriction.
    pub clear_dates: Binding,
}

impl Default for TendersKeyMap {
    fn default() -> Self {
        Self {
            cycle_status: Binding::new(vec![KeyCode::Char('f')]).with_help("f", "status"),
            cycle_dates: Binding::new(vec![KeyCode::Char('d')]).with_help("d", "dates"),
            clear_dates: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "clear dates"),
        }
    }
}

impl KeyMap for TendersKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.cycle_status, &self.cycle_dates, &self.clear_dates]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![self.short_help()]
    }
}

/// The tenders page: filter bar over a data table.
pub struct TendersPage {
    all: Vec<Tender>,
    filters: TenderFilters,
    today: NaiveDate,
    table: datatable::Model<Tender>,
    /// Key bindings of the filter bar.
    pub keymap: TendersKeyMap,
    /// Style of the filter bar.
    pub filter_style: Style,
}

impl TendersPage {
    /// A page over `tenders`, filtering dates relative to `today`.
    pub fn new(tenders: Vec<Tender>, today: NaiveDate) -> Self {
        let table = datatable::Model::new(Vec::new(), tender_columns(), "name")
            .with_title("Tender reports");
        let mut page = Self {
            all: tenders,
            filters: TenderFilters::default(),
            today,
            table,
            keymap: TendersKeyMap::default(),
            filter_style: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
        };
        page.refilter();
        page
    }

    /// Replaces the date used to resolve quick ranges.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self.refilter();
        self.table.first_page();
        self
    }

    /// Every tender, filtered or not.
    pub fn tenders(&self) -> &[Tender] {
        &self.all
    }

    /// The active filters.
    pub fn filters(&self) -> &TenderFilters {
        &self.filters
    }

    /// Mutates the filters, pushes the result into the table and goes back
    /// to its first page.
    pub fn update_filters(&mut self, f: impl FnOnce(&mut TenderFilters)) {
        f(&mut self.filters);
        self.refilter();
        self.table.first_page();
    }

    /// The table showing the filtered tenders.
    pub fn table(&self) -> &datatable::Model<Tender> {
        &self.table
    }

    /// Mutable access to the table.
    pub fn table_mut(&mut self) -> &mut datatable::Model<Tender> {
        &mut self.table
    }

    fn refilter(&mut self) {
        let visible = self.filters.apply(&self.all, self.today);
        debug!(total = self.all.len(), visible = visible.len(), "tender filters applied");
        self.table.set_records(visible);
    }

    fn remove_confirmed(&mut self) {
        let removed: HashSet<String> = self.table.take_confirmed_deletions().into_iter().collect();
        if removed.is_empty() {
            return;
        }
        self.all.retain(|t| !removed.contains(&t.id));
        info!(count = removed.len(), "tenders deleted");
        self.refilter();
    }

    fn handle_filter_key(&mut self, key_msg: &KeyMsg) -> bool {
        if self.keymap.cycle_status.matches(key_msg) {
            self.update_filters(|f| f.status = f.status.next());
        } else if self.keymap.cycle_dates.matches(key_msg) {
            self.update_filters(|f| {
                let next = f.dates.quick().next();
                f.dates.set_quick(next);
            });
        } else if self.keymap.clear_dates.matches(key_msg) {
            self.update_filters(|f| f.dates.clear_all());
        } else {
            return false;
        }
        true
    }
}

impl BubbleTeaModel for TendersPage {
    /// Loads the embedded tenders, filtered relative to the local date.
    fn init() -> (Self, Option<Cmd>) {
        let tenders = fixtures::tenders().unwrap_or_else(|err| {
            warn!(error = %err, "tender fixture unavailable");
            Vec::new()
        });
        (Self::new(tenders, chrono::Local::now().date_naive()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let browsing =
                self.table.mode() == Mode::Browsing && self.table.pending_delete().is_none();
            if browsing && self.handle_filter_key(key_msg) {
                return None;
            }
        }
        let cmd = self.table.update(msg);
        self.remove_confirmed();
        cmd
    }

    fn view(&self) -> String {
        let bar = format!(
            "{}  ({})",
            self.filters.describe(self.today),
            crate::key::help_line(&self.keymap.short_help(), " • ")
        );
        format!(
            "{}\n\n{}",
            self.filter_style.clone().render(&bar),
            self.table.view()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daterange::DateRange;
    use crossterm::event::KeyModifiers;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 11, 12)
    }

    fn ids(tenders: &[Tender]) -> Vec<&str> {
        tenders.iter().map(|t| t.id.as_str()).collect()
    }

    fn press(page: &mut TendersPage, c: char) {
        page.update(Box::new(KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }) as Msg);
    }

    #[test]
    fn test_status_filter() {
        let tenders = fixtures::tenders().unwrap();
        let filters = TenderFilters {
            status: StatusFilter::Failed,
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&tenders, today())), vec!["tdr-2", "tdr-4", "tdr-7"]);
    }

    #[test]
    fn test_quick_ranges() {
        let tenders = fixtures::tenders().unwrap();
        let mut filters = TenderFilters::default();

        filters.dates.set_quick(QuickRange::Last7Days);
        assert_eq!(ids(&filters.apply(&tenders, today())), vec!["tdr-1", "tdr-2"]);

        filters.dates.set_quick(QuickRange::ThisMonth);
        assert_eq!(filters.apply(&tenders, today()).len(), 4);

        filters.dates.set_quick(QuickRange::ThisSemester);
        assert_eq!(filters.apply(&tenders, today()).len(), 6);

        filters.status = StatusFilter::Failed;
        assert_eq!(ids(&filters.apply(&tenders, today())), vec!["tdr-2", "tdr-4"]);
    }

    #[test]
    fn test_custom_range_inclusive() {
        let tenders = fixtures::tenders().unwrap();
        let mut filters = TenderFilters::default();
        filters.dates.apply_custom(DateRange::between(date(2025, 10, 28), date(2025, 11, 5)));
        assert_eq!(
            ids(&filters.apply(&tenders, today())),
            vec!["tdr-3", "tdr-4", "tdr-5"]
        );
    }

    #[test]
    fn test_unparseable_dates_only_hidden_while_range_active() {
        let mut tenders = fixtures::tenders().unwrap();
        tenders[0].date = "bientôt".to_string();
        let mut filters = TenderFilters::default();
        assert_eq!(filters.apply(&tenders, today()).len(), 7);
        filters.dates.set_quick(QuickRange::ThisMonth);
        assert_eq!(ids(&filters.apply(&tenders, today())), vec!["tdr-2", "tdr-3", "tdr-4"]);
    }

    #[test]
    fn test_date_column_sorts_chronologically() {
        let mut page = TendersPage::new(fixtures::tenders().unwrap(), today());
        page.table_mut().set_sort("date", datatable::SortDirection::Ascending);
        let first: Vec<&str> = page
            .table()
            .page_records()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(first[0], "tdr-7");
        assert_eq!(first[1], "tdr-6");
    }

    #[test]
    fn test_filter_keys() {
        let mut page = TendersPage::new(fixtures::tenders().unwrap(), today());
        assert_eq!(page.table().filtered_count(), 7);

        press(&mut page, 'f');
        assert_eq!(page.filters().status, StatusFilter::Sent);
        assert_eq!(page.table().filtered_count(), 4);

        press(&mut page, 'd');
        press(&mut page, 'd');
        assert_eq!(page.filters().dates.quick(), QuickRange::Last7Days);
        assert_eq!(page.table().filtered_count(), 1);

        press(&mut page, 'r');
        assert_eq!(page.filters().dates.quick(), QuickRange::All);
        assert_eq!(page.table().filtered_count(), 4);
    }

    #[test]
    fn test_filter_keys_ignored_while_searching() {
        let mut page = TendersPage::new(fixtures::tenders().unwrap(), today());
        press(&mut page, '/');
        press(&mut page, 'f');
        assert_eq!(page.filters().status, StatusFilter::All);
        assert_eq!(page.table().search_text(), "f");
    }

    #[test]
    fn test_confirmed_delete_removes_tender() {
        let mut page = TendersPage::new(fixtures::tenders().unwrap(), today());
        press(&mut page, 'x');
        assert_eq!(page.table().pending_delete(), Some("tdr-1"));
        press(&mut page, 'f');
        assert_eq!(page.filters().status, StatusFilter::All);
        press(&mut page, 'y');
        assert_eq!(page.tenders().len(), 6);
        assert!(page.tenders().iter().all(|t| t.id != "tdr-1"));
        assert_eq!(page.table().filtered_count(), 6);
    }

    fn many_tenders(n: usize) -> Vec<Tender> {
        (1..=n)
            .map(|i| Tender {
                id: format!("tdr-{i}"),
                name: format!("Lot {i}"),
                date: "05 nov. 2025".to_string(),
                status: if i % 2 == 0 { TenderStatus::Failed } else { TenderStatus::Sent },
                intervenant_count: i,
            })
            .collect()
    }

    #[test]
    fn test_filter_change_goes_back_to_first_page() {
        let mut page = TendersPage::new(many_tenders(30), today());
        page.table_mut().go_to_page(2);
        press(&mut page, 'f');
        assert_eq!(page.table().filtered_count(), 15);
        assert_eq!(page.table().current_page(), 1);

        page.table_mut().go_to_page(2);
        assert_eq!(page.table().current_page(), 2);
        press(&mut page, 'f');
        assert_eq!(page.filters().status, StatusFilter::Failed);
        assert_eq!(page.table().current_page(), 1);
    }

    #[test]
    fn test_deletion_keeps_current_page() {
        let mut page = TendersPage::new(many_tenders(30), today());
        page.table_mut().go_to_page(2);
        press(&mut page, 'x');
        assert_eq!(page.table().pending_delete(), Some("tdr-11"));
        press(&mut page, 'y');
        assert_eq!(page.tenders().len(), 29);
        assert_eq!(page.table().current_page(), 2);
    }

    #[test]
    fn test_view_shows_filter_bar() {
        let mut page = TendersPage::new(fixtures::tenders().unwrap(), today());
        page.update_filters(|f| f.dates.set_quick(QuickRange::ThisMonth));
        let view = strip_ansi_escapes::strip_str(page.view());
        assert!(view.contains("All statuses • This month"));
        assert!(view.contains("Extension réseau hydraulique"));
    }
}
