use super::*;
use crate::config::TableConfig;
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: usize,
    name: String,
    lots: usize,
}

impl Record for Row {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

fn rows(n: usize) -> Vec<Row> {
    (1..=n)
        .map(|id| Row {
            id,
            name: format!("Project {id}"),
            lots: (id * 7) % 5,
        })
        .collect()
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID", |r: &Row| r.id.into()),
        Column::new("name", "Name", |r: &Row| r.name.clone().into()),
        Column::new("lots", "Lots", |r: &Row| r.lots.into()),
        Column::new("actions", "", |_: &Row| CellValue::Empty)
            .with_display(|_: &Row| "delete".to_string())
            .with_sortable(false)
            .with_hideable(false),
    ]
}

fn table(n: usize) -> Model<Row> {
    Model::new(rows(n), columns(), "name")
}

fn ids(records: &[&Row]) -> Vec<usize> {
    records.iter().map(|r| r.id).collect()
}

fn press(table: &mut Model<Row>, code: KeyCode) -> Option<Cmd> {
    table.update(Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }) as Msg)
}

fn plain(s: &str) -> String {
    strip_ansi_escapes::strip_str(s)
}

#[test]
fn test_seven_records_page_size_five() {
    let mut t = table(7);
    t.set_page_size(5);
    assert_eq!(t.page_count(), 2);
    assert_eq!(ids(&t.page_records()), vec![1, 2, 3, 4, 5]);
    t.go_to_page(2);
    assert_eq!(ids(&t.page_records()), vec![6, 7]);
    assert_eq!(t.display_summary(), "Showing 6-7 of 7");
}

#[test]
fn test_pages_partition_filtered_set() {
    for n in [0, 1, 4, 5, 6, 13, 50, 51] {
        for size in [5, 10, 25, 50] {
            let mut t = table(n);
            t.set_search_text("1");
            t.set_page_size(size);
            let mut seen = Vec::new();
            for page in 1..=t.page_count() {
                t.go_to_page(page);
                seen.extend(ids(&t.page_records()));
            }
            let expected = ids(&t.filtered_records());
            assert_eq!(seen, expected, "n={n} size={size}");
        }
    }
}

#[test]
fn test_search_is_case_insensitive_and_idempotent() {
    let mut t = table(12);
    t.set_search_text("PROJECT 1");
    let once = ids(&t.filtered_records());
    t.set_search_text("PROJECT 1");
    assert_eq!(ids(&t.filtered_records()), once);
    assert_eq!(once, vec![1, 10, 11, 12]);
}

#[test]
fn test_search_resets_page() {
    let mut t = table(30);
    t.go_to_page(3);
    assert_eq!(t.current_page(), 3);
    t.set_search_text("project");
    assert_eq!(t.current_page(), 1);
}

#[test]
fn test_empty_search_shows_placeholder() {
    let mut t = table(7);
    t.set_search_text("no such tender");
    assert_eq!(t.filtered_count(), 0);
    assert_eq!(t.page_count(), 1);
    assert_eq!(t.display_summary(), "Showing 0-0 of 0");
    assert!(plain(&t.view()).contains("No results."));
}

#[test]
fn test_custom_no_results_text() {
    let config = TableConfig::default().with_no_results_text("Aucun résultat.");
    let mut t = table(3).with_config(config);
    t.set_search_text("zzz");
    assert!(plain(&t.view()).contains("Aucun résultat."));
}

#[test]
fn test_page_size_clamps_to_nearest_option() {
    let mut t = table(40);
    t.set_page_size(7);
    assert_eq!(t.page_size(), 5);
    t.set_page_size(1000);
    assert_eq!(t.page_size(), 50);
}

#[test]
fn test_page_size_change_keeps_page_in_range() {
    let mut t = table(40);
    t.set_page_size(5);
    t.go_to_page(8);
    assert_eq!(t.current_page(), 8);
    t.set_page_size(50);
    assert_eq!(t.page_count(), 1);
    assert!(t.current_page() >= 1 && t.current_page() <= t.page_count());
}

#[test]
fn test_go_to_page_clamps() {
    let mut t = table(23);
    t.go_to_page(0);
    assert_eq!(t.current_page(), 1);
    t.go_to_page(99);
    assert_eq!(t.current_page(), 3);
    assert!(!t.can_next_page());
    t.next_page();
    assert_eq!(t.current_page(), 3);
}

#[test]
fn test_toggle_sort_cycle() {
    let mut t = table(5);
    t.toggle_sort("id");
    assert_eq!(t.sort().map(|s| s.direction), Some(SortDirection::Ascending));
    t.toggle_sort("id");
    assert_eq!(t.sort().map(|s| s.direction), Some(SortDirection::Descending));
    assert_eq!(ids(&t.page_records()), vec![5, 4, 3, 2, 1]);
    t.toggle_sort("name");
    assert_eq!(
        t.sort(),
        Some(&SortSpec {
            column_id: "name".into(),
            direction: SortDirection::Ascending
        })
    );
    t.clear_sort();
    assert!(t.sort().is_none());
    assert_eq!(ids(&t.page_records()), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_sort_ignores_unknown_and_unsortable() {
    let mut t = table(5);
    t.set_sort("missing", SortDirection::Ascending);
    t.set_sort("actions", SortDirection::Ascending);
    assert!(t.sort().is_none());
}

#[test]
fn test_sort_is_stable_and_numeric() {
    let mut t = table(10);
    t.set_sort("lots", SortDirection::Ascending);
    let sorted: Vec<(usize, usize)> = t
        .filtered_records()
        .iter()
        .map(|r| (r.lots, r.id))
        .collect();
    let mut expected = sorted.clone();
    expected.sort();
    assert_eq!(sorted, expected);
}

#[test]
fn test_sort_resets_page() {
    let mut t = table(30);
    t.go_to_page(2);
    t.toggle_sort("name");
    assert_eq!(t.current_page(), 1);
}

#[test]
fn test_hidden_column_still_searched_and_sorted() {
    let mut t = table(12);
    assert!(t.toggle_column_visibility("name"));
    assert!(!t.is_column_visible("name"));
    assert_eq!(t.visible_column_ids(), vec!["id", "lots", "actions"]);

    t.set_search_text("project 1");
    assert_eq!(t.filtered_count(), 4);
    t.set_sort("name", SortDirection::Descending);
    assert_eq!(t.sort().map(|s| s.column_id.as_str()), Some("name"));
}

#[test]
fn test_non_hideable_column_never_hides() {
    let mut t = table(3);
    assert!(!t.toggle_column_visibility("actions"));
    assert!(t.is_column_visible("actions"));
    let menu: Vec<&str> = t.hideable_columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(menu, vec!["id", "name", "lots"]);
}

#[test]
fn test_duplicate_column_ids_dropped() {
    let mut cols = columns();
    cols.push(Column::new("id", "Other", |r: &Row| r.lots.into()));
    let t = Model::new(rows(2), cols, "name");
    assert_eq!(t.columns().len(), 4);
}

#[test]
fn test_set_records_clamps_page_and_prunes_rows() {
    let mut t = table(30);
    t.go_to_page(3);
    t.request_delete("25");
    assert_eq!(t.pending_delete(), Some("25"));
    t.set_records(rows(12));
    assert_eq!(t.current_page(), 2);
    assert_eq!(t.pending_delete(), None);
}

#[test]
fn test_delete_flow() {
    let mut t = table(5);
    t.request_delete("nope");
    assert_eq!(t.pending_delete(), None);

    t.request_delete("3");
    t.cancel_delete("3");
    t.confirm_delete("3");
    assert!(t.take_confirmed_deletions().is_empty());

    t.request_delete("3");
    t.confirm_delete("3");
    assert_eq!(t.take_confirmed_deletions(), vec!["3"]);
    assert_eq!(t.records().len(), 5);
}

#[test]
fn test_view_state_snapshot() {
    let mut t = table(20);
    t.set_search_text("proj");
    t.toggle_sort("id");
    t.go_to_page(2);
    let state = t.view_state();
    assert_eq!(state.search_text, "proj");
    assert_eq!(state.page_index, 1);
    assert_eq!(state.page_size, 10);
    assert_eq!(state.visible_column_ids.len(), 4);
}

#[test]
fn test_keys_search_mode_updates_live() {
    let mut t = table(12);
    press(&mut t, KeyCode::Char('/'));
    assert_eq!(t.mode(), Mode::Searching);
    for c in "ct 1".chars() {
        press(&mut t, KeyCode::Char(c));
    }
    assert_eq!(t.search_text(), "ct 1");
    assert_eq!(t.filtered_count(), 4);
    press(&mut t, KeyCode::Backspace);
    press(&mut t, KeyCode::Backspace);
    assert_eq!(t.filtered_count(), 12);
    press(&mut t, KeyCode::Enter);
    assert_eq!(t.mode(), Mode::Browsing);
}

#[test]
fn test_keys_paging_and_sorting() {
    let mut t = table(25);
    press(&mut t, KeyCode::Right);
    assert_eq!(t.current_page(), 2);
    press(&mut t, KeyCode::End);
    assert_eq!(t.current_page(), 3);
    press(&mut t, KeyCode::Home);
    assert_eq!(t.current_page(), 1);

    press(&mut t, KeyCode::Char('s'));
    press(&mut t, KeyCode::Char('s'));
    assert_eq!(t.sort().map(|s| s.direction), Some(SortDirection::Descending));
    assert_eq!(t.page_records()[0].id, 25);
    press(&mut t, KeyCode::Char('c'));
    assert!(t.sort().is_none());

    press(&mut t, KeyCode::Char('+'));
    assert_eq!(t.page_size(), 25);
    press(&mut t, KeyCode::Char('-'));
    press(&mut t, KeyCode::Char('-'));
    assert_eq!(t.page_size(), 5);
}

#[test]
fn test_keys_column_menu() {
    let mut t = table(3);
    press(&mut t, KeyCode::Char('v'));
    assert_eq!(t.mode(), Mode::ColumnMenu);
    assert!(plain(&t.view()).contains("[x] Name"));
    press(&mut t, KeyCode::Down);
    press(&mut t, KeyCode::Char(' '));
    assert!(!t.is_column_visible("name"));
    press(&mut t, KeyCode::Esc);
    assert_eq!(t.mode(), Mode::Browsing);
}

#[test]
fn test_keys_delete_confirmation() {
    let mut t = table(5);
    press(&mut t, KeyCode::Down);
    press(&mut t, KeyCode::Char('x'));
    assert_eq!(t.pending_delete(), Some("2"));
    assert!(plain(&t.view()).contains("Delete \"Project 2\"?"));

    press(&mut t, KeyCode::Right);
    assert_eq!(t.pending_delete(), Some("2"));

    press(&mut t, KeyCode::Char('y'));
    assert_eq!(t.pending_delete(), None);
    assert_eq!(t.take_confirmed_deletions(), vec!["2"]);
}

#[test]
fn test_quit_key_returns_command() {
    let mut t = table(1);
    assert!(press(&mut t, KeyCode::Char('q')).is_some());
}

#[test]
fn test_view_shows_sort_indicator_and_pages() {
    let mut t = table(50);
    t.set_page_size(5);
    t.go_to_page(4);
    t.set_sort("id", SortDirection::Ascending);
    assert_eq!(t.current_page(), 1);
    t.go_to_page(5);
    let view = plain(&t.view());
    assert!(view.contains("ID ▲"));
    assert!(view.contains("Showing 21-25 of 50 • Rows per page: 5"));
    assert!(view.contains("1 … 4 [5] 6 … 10"));
}

#[test]
fn test_page_size_steps_through_unsorted_options() {
    let mut config = TableConfig::default().with_default_page_size(50);
    config.page_size_options = vec![25, 5, 50];
    let mut t = table(60).with_config(config);
    assert_eq!(t.page_size(), 50);
    press(&mut t, KeyCode::Char('-'));
    assert_eq!(t.page_size(), 25);
    press(&mut t, KeyCode::Char('-'));
    assert_eq!(t.page_size(), 5);
    press(&mut t, KeyCode::Char('+'));
    assert_eq!(t.page_size(), 25);
}
