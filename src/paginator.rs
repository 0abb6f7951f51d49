//! Pagination state and the compact page-number range.
//!
//! The paginator does not own any content. It tracks the current page, the
//! page size and the page count, and hands out slice bounds for the caller's
//! data. [`pagination_range`] produces the page-number sequence with ellipsis
//! markers that page controls render.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use std::fmt;

/// How the paginator renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Page numbers with ellipsis collapsing, e.g. `1 … 4 [5] 6 … 9`.
    #[default]
    Compact,
    /// Current over total, e.g. `3/10`.
    Arabic,
    /// One dot per page, e.g. `○ ● ○`.
    Dots,
}

/// One entry of a pagination range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A 1-based page number.
    Page(usize),
    /// A collapsed run of two or more pages.
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Pages kept on each side of the current page.
pub const RANGE_DELTA: usize = 1;

/// Computes the compact page sequence for `total_pages` pages with 1-based
/// `current` page.
///
/// Page 1, the last page and the pages within [`RANGE_DELTA`] of `current` are
/// kept. A single skipped page between two kept pages is shown literally;
/// longer gaps collapse into one [`PageItem::Ellipsis`]. `current` is clamped
/// into `1..=total_pages`.
///
/// ```rust
/// use tenderboard::paginator::{pagination_range, PageItem::{Ellipsis, Page}};
///
/// assert_eq!(pagination_range(1, 1), vec![Page(1)]);
/// assert_eq!(pagination_range(5, 1), vec![Page(1), Page(2), Ellipsis, Page(5)]);
/// assert_eq!(pagination_range(5, 3), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
/// assert_eq!(
///     pagination_range(10, 5),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
pub fn pagination_range(total_pages: usize, current: usize) -> Vec<PageItem> {
    if total_pages <= 1 {
        return vec![PageItem::Page(1)];
    }
    let current = current.clamp(1, total_pages);
    let low = current.saturating_sub(RANGE_DELTA).max(1);
    let high = (current + RANGE_DELTA).min(total_pages);

    let kept = std::iter::once(1)
        .chain(low..=high)
        .chain(std::iter::once(total_pages));

    let mut range = Vec::new();
    let mut previous: Option<usize> = None;
    for page in kept {
        match previous {
            Some(p) if page <= p => continue,
            Some(p) if page - p == 2 => range.push(PageItem::Page(p + 1)),
            Some(p) if page - p > 2 => range.push(PageItem::Ellipsis),
            _ => {}
        }
        range.push(PageItem::Page(page));
        previous = Some(page);
    }
    range
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page. Default: pgup, left, h.
    pub prev_page: key::Binding,
    /// Next page. Default: pgdown, right, l.
    pub next_page: key::Binding,
    /// First page. Default: home.
    pub first_page: key::Binding,
    /// Last page. Default: end.
    pub last_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "left", "h"]),
                key::with_help("←/h", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "right", "l"]),
                key::with_help("→/l", "next page"),
            ]),
            first_page: key::new_binding(vec![
                key::with_keys_str(&["home"]),
                key::with_help("home", "first page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["end"]),
                key::with_help("end", "last page"),
            ]),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![
            &self.prev_page,
            &self.next_page,
            &self.first_page,
            &self.last_page,
        ]]
    }
}

/// Pagination state.
///
/// `page` is 0-based internally; [`Model::current_page`] and
/// [`Model::go_to_page`] speak 1-based page numbers like the rendered controls.
///
/// ```rust
/// use tenderboard::paginator::Model;
///
/// let mut p = Model::new().with_per_page(5).with_total_items(7);
/// assert_eq!(p.total_pages, 2);
/// assert_eq!(p.get_slice_bounds(7), (0, 5));
///
/// p.go_to_page(9); // clamped
/// assert_eq!(p.current_page(), 2);
/// assert_eq!(p.get_slice_bounds(7), (5, 7));
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Rendering style.
    pub paginator_type: Type,
    /// Current page, 0-based.
    pub page: usize,
    /// Items per page, at least 1.
    pub per_page: usize,
    /// Page count, at least 1.
    pub total_pages: usize,
    /// Active dot for [`Type::Dots`].
    pub active_dot: String,
    /// Inactive dot for [`Type::Dots`].
    pub inactive_dot: String,
    /// Format for [`Type::Arabic`]; the two `%d` are current and total.
    pub arabic_format: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 0,
            per_page: 1,
            total_pages: 1,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator on page 1 of 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder pattern). Values below 1 become 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the item count (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the rendering style (builder pattern).
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Sets the page size. Values below 1 become 1.
    ///
    /// The page count is not recomputed here; call [`Model::set_total_items`]
    /// afterwards.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Sets the page count directly and clamps the current page.
    pub fn set_total_pages(&mut self, pages: usize) {
        self.total_pages = pages.max(1);
        self.clamp_page();
    }

    /// Recomputes the page count as `max(1, ceil(items / per_page))` and clamps
    /// the current page.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        if self.page >= self.total_pages {
            self.page = self.total_pages - 1;
        }
    }

    /// The current 1-based page number.
    pub fn current_page(&self) -> usize {
        self.page + 1
    }

    /// Moves to the 1-based page `n`, clamped into `1..=total_pages`.
    pub fn go_to_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages) - 1;
    }

    /// Number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.get_slice_bounds(total_items);
        end - start
    }

    /// Slice bounds `[start, end)` of the current page for data of `length` items.
    pub fn get_slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = (self.page * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// 1-based first and last item numbers shown on the current page, or
    /// `(0, 0)` when there are no items.
    pub fn display_bounds(&self, total_items: usize) -> (usize, usize) {
        if total_items == 0 {
            return (0, 0);
        }
        let (start, end) = self.get_slice_bounds(total_items);
        (start + 1, end)
    }

    /// Goes back one page; no-op on the first page.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Goes forward one page; no-op on the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Reports whether the first page is shown.
    pub fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Reports whether the last page is shown.
    pub fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// The compact page sequence for the current state.
    pub fn page_range(&self) -> Vec<PageItem> {
        pagination_range(self.total_pages, self.current_page())
    }

    /// Handles page navigation keys.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            } else if self.keymap.first_page.matches(key_msg) {
                self.page = 0;
            } else if self.keymap.last_page.matches(key_msg) {
                self.page = self.total_pages - 1;
            }
        }
    }

    /// Renders the paginator without styling.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Compact => self.compact_view(),
            Type::Arabic => self
                .arabic_format
                .replacen("%d", &self.current_page().to_string(), 1)
                .replacen("%d", &self.total_pages.to_string(), 1),
            Type::Dots => (0..self.total_pages)
                .map(|i| {
                    if i == self.page {
                        self.active_dot.as_str()
                    } else {
                        self.inactive_dot.as_str()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn compact_view(&self) -> String {
        let current = self.current_page();
        self.page_range()
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == current => format!("[{n}]"),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn numbers(range: &[PageItem]) -> Vec<usize> {
        range
            .iter()
            .filter_map(|i| match i {
                Page(n) => Some(*n),
                Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_range_single_page() {
        assert_eq!(pagination_range(1, 1), vec![Page(1)]);
        assert_eq!(pagination_range(0, 1), vec![Page(1)]);
    }

    #[test]
    fn test_range_small_counts_have_no_ellipsis() {
        assert_eq!(pagination_range(2, 1), vec![Page(1), Page(2)]);
        assert_eq!(pagination_range(3, 1), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(pagination_range(4, 1), vec![Page(1), Page(2), Page(3), Page(4)]);
        assert_eq!(pagination_range(4, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(pagination_range(5, 1), vec![Page(1), Page(2), Ellipsis, Page(5)]);
        assert_eq!(pagination_range(5, 5), vec![Page(1), Ellipsis, Page(4), Page(5)]);
        assert_eq!(
            pagination_range(5, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_range_single_gap_page_is_literal() {
        // kept {1, 3, 4, 5, 7}: 2 and 6 fill in
        assert_eq!(
            pagination_range(7, 4),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_range_clamps_current() {
        assert_eq!(pagination_range(5, 0), pagination_range(5, 1));
        assert_eq!(pagination_range(5, 99), pagination_range(5, 5));
    }

    #[test]
    fn test_range_properties_hold_for_all_inputs() {
        for n in 1..=40 {
            for c in 1..=n {
                let range = pagination_range(n, c);
                assert_eq!(range.first(), Some(&Page(1)), "n={n} c={c}");
                assert_eq!(range.last(), Some(&Page(n)), "n={n} c={c}");
                let nums = numbers(&range);
                assert!(nums.windows(2).all(|w| w[0] < w[1]), "n={n} c={c}");
                assert!(nums.contains(&c));
                for w in range.windows(2) {
                    assert!(!(w[0] == Ellipsis && w[1] == Ellipsis), "n={n} c={c}");
                }
                // an ellipsis always stands for at least two pages
                for (i, item) in range.iter().enumerate() {
                    if *item == Ellipsis {
                        if let (Page(a), Page(b)) = (range[i - 1], range[i + 1]) {
                            assert!(b - a > 2, "n={n} c={c}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_total_items_and_bounds() {
        let mut p = Model::new().with_per_page(5).with_total_items(7);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.get_slice_bounds(7), (0, 5));
        assert_eq!(p.display_bounds(7), (1, 5));
        p.next_page();
        assert_eq!(p.get_slice_bounds(7), (5, 7));
        assert_eq!(p.display_bounds(7), (6, 7));
        assert_eq!(p.items_on_page(7), 2);
        assert_eq!(p.display_bounds(0), (0, 0));
    }

    #[test]
    fn test_zero_items_is_one_page() {
        let p = Model::new().with_per_page(10).with_total_items(0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.get_slice_bounds(0), (0, 0));
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut p = Model::new().with_per_page(5).with_total_items(50);
        p.go_to_page(10);
        assert_eq!(p.current_page(), 10);
        p.set_total_items(12);
        assert_eq!(p.current_page(), 3);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut p = Model::new().with_per_page(10).with_total_items(95);
        p.go_to_page(0);
        assert_eq!(p.current_page(), 1);
        p.go_to_page(11);
        assert_eq!(p.current_page(), 10);
    }

    #[test]
    fn test_update_keys() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        let right: Msg = Box::new(KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        });
        p.update(&right);
        assert_eq!(p.current_page(), 2);
        let end: Msg = Box::new(KeyMsg {
            key: KeyCode::End,
            modifiers: KeyModifiers::NONE,
        });
        p.update(&end);
        assert!(p.on_last_page());
        let left: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
        });
        p.update(&left);
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn test_views() {
        let mut p = Model::new().with_per_page(1).with_total_items(9);
        p.go_to_page(5);
        assert_eq!(p.view(), "1 … 4 [5] 6 … 9");
        p.paginator_type = Type::Arabic;
        assert_eq!(p.view(), "5/9");
        let mut d = Model::new().with_per_page(1).with_total_items(3).with_type(Type::Dots);
        d.next_page();
        assert_eq!(d.view(), "○ • ○");
    }
}
