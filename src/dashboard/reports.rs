//! Per-intervenant dispatch report of one tender.
//!
//! The page lists who a tender was sent to, narrowed by delivery status and
//! role, under a summary of how many deliveries succeeded. The counts always
//! cover every row of the tender, whatever the filters.

use super::fixtures;
use super::tenders::{StatusFilter, TenderStatus};
use crate::datatable::{self, Column, DataTableKeyMap, Mode, Record};
use crate::key::{Binding, KeyMap};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Delivery of a tender to one intervenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderReport {
    /// Identifier.
    pub id: String,
    /// Tender the row belongs to.
    pub tender_id: String,
    /// Recipient name.
    pub intervenant_name: String,
    /// Recipient role.
    pub role: String,
    /// Recipient email.
    pub email: String,
    /// Delivery outcome.
    pub status: TenderStatus,
}

impl Record for TenderReport {
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// The rows of `tender_id`, in input order.
pub fn reports_for(rows: &[TenderReport], tender_id: &str) -> Vec<TenderReport> {
    rows.iter()
        .filter(|r| r.tender_id == tender_id)
        .cloned()
        .collect()
}

/// Distinct roles in order of first appearance.
pub fn roles(rows: &[TenderReport]) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for row in rows {
        if !roles.contains(&row.role) {
            roles.push(row.role.clone());
        }
    }
    roles
}

/// Status and role filters of the report page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    /// Status filter.
    pub status: StatusFilter,
    /// Exact role to keep; `None` keeps every role.
    pub role: Option<String>,
}

impl ReportFilters {
    /// The rows passing both filters, in input order.
    pub fn apply(&self, rows: &[TenderReport]) -> Vec<TenderReport> {
        rows.iter()
            .filter(|r| self.status.matches(r.status))
            .filter(|r| self.role.as_ref().map_or(true, |role| &r.role == role))
            .cloned()
            .collect()
    }

    /// One-line description of the active filters.
    pub fn describe(&self) -> String {
        format!(
            "{} • {}",
            self.status.label(),
            self.role.as_deref().unwrap_or("All roles")
        )
    }
}

/// Delivery totals of a tender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    /// Intervenants targeted.
    pub total: usize,
    /// Deliveries that succeeded.
    pub sent: usize,
    /// Deliveries that failed.
    pub failed: usize,
}

impl ReportCounts {
    /// Counts `rows` by status.
    pub fn of(rows: &[TenderReport]) -> Self {
        let sent = rows.iter().filter(|r| r.status == TenderStatus::Sent).count();
        Self {
            total: rows.len(),
            sent,
            failed: rows.len() - sent,
        }
    }

    /// Share of sent deliveries as a whole percentage, half rounded up.
    pub fn success_rate(&self) -> usize {
        percent(self.sent, self.total)
    }

    /// Share of failed deliveries as a whole percentage, half rounded up.
    pub fn failure_rate(&self) -> usize {
        percent(self.failed, self.total)
    }
}

fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (part * 200 + total) / (2 * total)
}

/// Columns of the report table. The name cell also shows the email.
pub fn report_columns() -> Vec<Column<TenderReport>> {
    vec![
        Column::new("name", "Intervenant", |r: &TenderReport| {
            r.intervenant_name.as_str().into()
        })
        .with_display(|r: &TenderReport| format!("{} · {}", r.intervenant_name, r.email))
        .with_width(44),
        Column::new("role", "Role", |r: &TenderReport| r.role.as_str().into()),
        Column::new("status", "Status", |r: &TenderReport| r.status.to_string().into()),
    ]
}

/// Key bindings the report page adds on top of the table's.
#[derive(Debug, Clone)]
pub struct ReportKeyMap {
    /// Cycle the status filter.
    pub cycle_status: Binding,
    /// Cycle the role filter.
    pub cycle_role: Binding,
}

impl Default for ReportKeyMap {
    fn default() -> Self {
        Self {
            cycle_status: Binding::new(vec![KeyCode::Char('f')]).with_help("f", "status"),
            cycle_role: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "role"),
        }
    }
}

impl KeyMap for ReportKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.cycle_status, &self.cycle_role]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![self.short_help()]
    }
}

/// Report page of one tender: counts, filter bar and a read-only table.
pub struct TenderReportPage {
    tender_id: String,
    rows: Vec<TenderReport>,
    roles: Vec<String>,
    filters: ReportFilters,
    table: datatable::Model<TenderReport>,
    /// Key bindings of the filter bar.
    pub keymap: ReportKeyMap,
    /// Style of the counts line.
    pub counts_style: Style,
    /// Style of the filter bar.
    pub filter_style: Style,
}

impl TenderReportPage {
    /// A page over the rows of `tender_id` found in `rows`.
    pub fn new(rows: &[TenderReport], tender_id: &str) -> Self {
        let rows = reports_for(rows, tender_id);
        debug!(tender = %tender_id, rows = rows.len(), "tender report opened");
        let mut keymap = DataTableKeyMap::default();
        keymap.delete.set_enabled(false);
        let table = datatable::Model::new(Vec::new(), report_columns(), "name")
            .with_title("Dispatch report")
            .with_keymap(keymap);
        let mut page = Self {
            tender_id: tender_id.to_string(),
            roles: roles(&rows),
            rows,
            filters: ReportFilters::default(),
            table,
            keymap: ReportKeyMap::default(),
            counts_style: Style::new().bold(true),
            filter_style: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
        };
        page.refilter();
        page
    }

    /// The tender shown.
    pub fn tender_id(&self) -> &str {
        &self.tender_id
    }

    /// Every row of the tender.
    pub fn rows(&self) -> &[TenderReport] {
        &self.rows
    }

    /// Roles offered by the role filter.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// The active filters.
    pub fn filters(&self) -> &ReportFilters {
        &self.filters
    }

    /// Totals over every row of the tender.
    pub fn counts(&self) -> ReportCounts {
        ReportCounts::of(&self.rows)
    }

    /// Mutates the filters, pushes the result into the table and goes back
    /// to its first page.
    pub fn update_filters(&mut self, f: impl FnOnce(&mut ReportFilters)) {
        f(&mut self.filters);
        self.refilter();
        self.table.first_page();
    }

    /// Moves the role filter to the next role, then back to every role.
    pub fn cycle_role(&mut self) {
        let next = match &self.filters.role {
            None => self.roles.first().cloned(),
            Some(current) => self
                .roles
                .iter()
                .position(|r| r == current)
                .and_then(|i| self.roles.get(i + 1))
                .cloned(),
        };
        self.update_filters(|f| f.role = next);
    }

    /// The table showing the filtered rows.
    pub fn table(&self) -> &datatable::Model<TenderReport> {
        &self.table
    }

    /// Mutable access to the table.
    pub fn table_mut(&mut self) -> &mut datatable::Model<TenderReport> {
        &mut self.table
    }

    fn refilter(&mut self) {
        let visible = self.filters.apply(&self.rows);
        debug!(total = self.rows.len(), visible = visible.len(), "report filters applied");
        self.table.set_records(visible);
    }

    fn counts_line(&self) -> String {
        let counts = self.counts();
        format!(
            "Targeted: {} • Sent: {} ({}%) • Failed: {} ({}%)",
            counts.total,
            counts.sent,
            counts.success_rate(),
            counts.failed,
            counts.failure_rate()
        )
    }
}

impl BubbleTeaModel for TenderReportPage {
    /// Opens the report of the first embedded tender.
    fn init() -> (Self, Option<Cmd>) {
        let rows = fixtures::tender_reports().unwrap_or_else(|err| {
            warn!(error = %err, "tender report fixture unavailable");
            Vec::new()
        });
        (Self::new(&rows, "tdr-1"), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.table.mode() == Mode::Browsing {
                if self.keymap.cycle_status.matches(key_msg) {
                    self.update_filters(|f| f.status = f.status.next());
                    return None;
                }
                if self.keymap.cycle_role.matches(key_msg) {
                    self.cycle_role();
                    return None;
                }
            }
        }
        self.table.update(msg)
    }

    fn view(&self) -> String {
        let bar = format!(
            "{}  ({})",
            self.filters.describe(),
            crate::key::help_line(&self.keymap.short_help(), " • ")
        );
        format!(
            "{}\n{}\n\n{}",
            self.counts_style.clone().render(&self.counts_line()),
            self.filter_style.clone().render(&bar),
            self.table.view()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn page() -> TenderReportPage {
        TenderReportPage::new(&fixtures::tender_reports().unwrap(), "tdr-1")
    }

    fn press(page: &mut TenderReportPage, c: char) {
        page.update(Box::new(KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }) as Msg);
    }

    fn ids(rows: &[TenderReport]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_rows_limited_to_tender() {
        let rows = fixtures::tender_reports().unwrap();
        assert_eq!(reports_for(&rows, "tdr-1").len(), 14);
        assert_eq!(ids(&reports_for(&rows, "tdr-2")), vec!["report-other-1"]);
        assert!(reports_for(&rows, "tdr-9").is_empty());
    }

    #[test]
    fn test_status_and_role_filter() {
        let rows = reports_for(&fixtures::tender_reports().unwrap(), "tdr-1");
        let mut filters = ReportFilters {
            status: StatusFilter::Sent,
            role: Some("Chef de projet".to_string()),
        };
        assert_eq!(ids(&filters.apply(&rows)), vec!["report-1", "report-7", "report-13"]);

        filters.status = StatusFilter::Failed;
        assert!(filters.apply(&rows).is_empty());

        filters.role = Some("Analyste".to_string());
        assert_eq!(ids(&filters.apply(&rows)), vec!["report-3", "report-9"]);

        filters.role = None;
        assert_eq!(filters.apply(&rows).len(), 4);
    }

    #[test]
    fn test_counts_ignore_filters() {
        let mut page = page();
        let expected = ReportCounts {
            total: 14,
            sent: 10,
            failed: 4,
        };
        assert_eq!(page.counts(), expected);
        assert_eq!(expected.success_rate(), 71);
        assert_eq!(expected.failure_rate(), 29);

        page.update_filters(|f| f.status = StatusFilter::Failed);
        assert_eq!(page.table().filtered_count(), 4);
        assert_eq!(page.counts(), expected);
    }

    #[test]
    fn test_rates_of_empty_report_are_zero() {
        let counts = ReportCounts::of(&[]);
        assert_eq!(counts.success_rate(), 0);
        assert_eq!(counts.failure_rate(), 0);
        let half = ReportCounts {
            total: 8,
            sent: 3,
            failed: 5,
        };
        assert_eq!(half.success_rate(), 38);
        assert_eq!(half.failure_rate(), 63);
    }

    #[test]
    fn test_role_key_cycles_in_first_appearance_order() {
        let mut page = page();
        assert_eq!(&page.roles()[..3], &["Chef de projet", "Coordinateur", "Analyste"]);
        press(&mut page, 'r');
        assert_eq!(page.filters().role.as_deref(), Some("Chef de projet"));
        assert_eq!(page.table().filtered_count(), 3);
        for _ in 0..5 {
            press(&mut page, 'r');
        }
        assert_eq!(page.filters().role.as_deref(), Some("Expert technique"));
        press(&mut page, 'r');
        assert_eq!(page.filters().role, None);
        assert_eq!(page.table().filtered_count(), 14);
    }

    #[test]
    fn test_filter_change_goes_back_to_first_page() {
        let mut page = page();
        page.table_mut().set_page_size(5);
        page.table_mut().go_to_page(3);
        assert_eq!(page.table().current_page(), 3);
        press(&mut page, 'f');
        assert_eq!(page.filters().status, StatusFilter::Sent);
        assert_eq!(page.table().current_page(), 1);
    }

    #[test]
    fn test_rows_cannot_be_deleted() {
        let mut page = page();
        press(&mut page, 'x');
        assert_eq!(page.table().pending_delete(), None);
    }

    #[test]
    fn test_view_shows_counts_and_filters() {
        let mut page = page();
        press(&mut page, 'f');
        let view = strip_ansi_escapes::strip_str(page.view());
        assert!(view.contains("Targeted: 14 • Sent: 10 (71%) • Failed: 4 (29%)"));
        assert!(view.contains("Sent • All roles"));
        assert!(view.contains("Aïcha Traoré · aïcha.traoré@example.com"));
    }
}
