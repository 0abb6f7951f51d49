//! Gallery of documents attached to projects.
//!
//! The gallery shows addenda as cards, narrowed by a name search, a file
//! type and, optionally, a project. Pagination uses the same compact page
//! range as the data table. Any change to the search, a filter or the page
//! size goes back to page 1; a deletion keeps the page and clamps it.
//!
//! ```rust
//! use tenderboard::dashboard::{fixtures, resources::{FileType, ResourceGallery}};
//!
//! let mut gallery = ResourceGallery::new(fixtures::resources().unwrap());
//! gallery.set_file_type(Some(FileType::Cad));
//! assert_eq!(gallery.filtered_count(), 2);
//! assert_eq!(gallery.display_summary(), "Showing 1 to 2 of 2 documents");
//! ```

use super::fixtures;
use crate::key::{self, Binding, KeyMap};
use crate::paginator::{self, pagination_range, PageItem};
use crate::textinput;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};

/// Page sizes offered when the caller gives none.
pub const DEFAULT_GALLERY_PAGE_SIZES: [usize; 3] = [6, 12, 24];

/// Kind of document, as shown by its badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Revit and CAD drawings.
    Cad,
    /// PDF documents.
    Pdf,
    /// Spreadsheets.
    Excel,
    /// Pictures.
    Image,
    /// Archives and anything else.
    Other,
}

impl FileType {
    /// Every type, in filter menu order.
    pub const ORDER: [FileType; 5] = [
        FileType::Cad,
        FileType::Pdf,
        FileType::Excel,
        FileType::Image,
        FileType::Other,
    ];

    /// Filter menu label.
    pub fn label(self) -> &'static str {
        match self {
            FileType::Cad => "REVIT / CAD",
            FileType::Pdf => "PDF",
            FileType::Excel => "Excel (XLS/XLSX)",
            FileType::Image => "Images (PNG/JPG)",
            FileType::Other => "Other (ZIP/DOC)",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileType::Cad => "CAD",
            FileType::Pdf => "PDF",
            FileType::Excel => "XLS",
            FileType::Image => "IMG",
            FileType::Other => "FILE",
        })
    }
}

/// A document in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human readable size, e.g. "2.4 MB".
    pub size_label: String,
    /// Document kind.
    #[serde(rename = "type")]
    pub kind: FileType,
    /// Upload date as received.
    pub added_at: String,
    /// Original file name.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Trade the document concerns.
    #[serde(default)]
    pub division: Option<String>,
    /// Project the document belongs to.
    #[serde(default)]
    pub project_name: Option<String>,
}

impl Resource {
    /// The text the search matches: the file name, or the display name when
    /// there is none.
    pub fn search_text(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.name)
    }
}

/// Key bindings of the gallery.
#[derive(Debug, Clone)]
pub struct GalleryKeyMap {
    /// Move to the previous card.
    pub cursor_up: Binding,
    /// Move to the next card.
    pub cursor_down: Binding,
    /// Next page.
    pub next_page: Binding,
    /// Previous page.
    pub prev_page: Binding,
    /// Start typing a search.
    pub search: Binding,
    /// Leave the search box.
    pub close_search: Binding,
    /// Cycle the file type filter.
    pub cycle_type: Binding,
    /// Cycle the project filter.
    pub cycle_project: Binding,
    /// Next page size option.
    pub grow_page_size: Binding,
    /// Previous page size option.
    pub shrink_page_size: Binding,
    /// Ask to delete the card under the cursor.
    pub delete: Binding,
    /// Confirm a deletion.
    pub confirm: Binding,
    /// Cancel a deletion.
    pub cancel: Binding,
    /// Quit.
    pub quit: Binding,
}

impl Default for GalleryKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            cursor_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next page"),
            prev_page: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            search: Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            close_search: Binding::new(vec![KeyCode::Enter, KeyCode::Esc])
                .with_help("enter", "done"),
            cycle_type: Binding::new(vec![KeyCode::Char('t')]).with_help("t", "type"),
            cycle_project: Binding::new(vec![KeyCode::Char('p')]).with_help("p", "project"),
            grow_page_size: Binding::new(vec![KeyCode::Char('+'), KeyCode::Char('=')])
                .with_help("+/-", "per page"),
            shrink_page_size: Binding::new(vec![KeyCode::Char('-')]).with_help("-", "fewer"),
            delete: Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
                .with_help("x", "delete"),
            confirm: Binding::new(vec![KeyCode::Char('y')]).with_help("y", "confirm"),
            cancel: Binding::new(vec![KeyCode::Char('n'), KeyCode::Esc]).with_help("n", "cancel"),
            quit: key::new_binding(vec![key::with_keys_str(&["q", "ctrl+c"])])
                .with_help("q", "quit"),
        }
    }
}

impl KeyMap for GalleryKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.search,
            &self.cycle_type,
            &self.cycle_project,
            &self.prev_page,
            &self.next_page,
            &self.delete,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.cursor_up, &self.cursor_down, &self.prev_page, &self.next_page],
            vec![&self.search, &self.cycle_type, &self.cycle_project, &self.grow_page_size],
            vec![&self.delete, &self.confirm, &self.cancel, &self.quit],
        ]
    }
}

/// Styles of the gallery.
#[derive(Debug, Clone)]
pub struct GalleryStyles {
    /// Gallery title.
    pub title: Style,
    /// Filter bar.
    pub filters: Style,
    /// File type badge.
    pub badge: Style,
    /// Card under the cursor.
    pub selected_card: Style,
    /// Size, date and division line.
    pub meta: Style,
    /// Empty-state text.
    pub no_results: Style,
    /// "Showing x to y of z" line.
    pub summary: Style,
    /// Current page in the page range.
    pub current_page: Style,
    /// Delete confirmation line.
    pub confirm: Style,
    /// Help line.
    pub help: Style,
}

impl Default for GalleryStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        let accent = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };
        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            filters: Style::new().foreground(subdued.clone()),
            badge: Style::new().bold(true),
            selected_card: Style::new().foreground(accent.clone()),
            meta: Style::new().foreground(subdued.clone()),
            no_results: Style::new().foreground(subdued.clone()),
            summary: Style::new().foreground(subdued.clone()),
            current_page: Style::new().bold(true).foreground(accent),
            confirm: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#C0392B",
                Dark: "#FF5F5F",
            }),
            help: Style::new().foreground(subdued),
        }
    }
}

/// Card gallery of documents with search, filters and pagination.
#[derive(Debug, Clone)]
pub struct ResourceGallery {
    resources: Vec<Resource>,
    filtered: Vec<usize>,
    search: String,
    file_type: Option<FileType>,
    project: Option<String>,
    project_filter: bool,
    page_size_options: Vec<usize>,
    paginator: paginator::Model,
    cursor: usize,
    searching: bool,
    search_input: textinput::Model,
    pending_delete: Option<String>,
    confirmed: VecDeque<String>,
    title: String,
    /// Key bindings.
    pub keymap: GalleryKeyMap,
    /// Styles.
    pub styles: GalleryStyles,
}

impl ResourceGallery {
    /// A gallery over `resources` with the default page sizes.
    pub fn new(resources: Vec<Resource>) -> Self {
        let page_size_options = DEFAULT_GALLERY_PAGE_SIZES.to_vec();
        let paginator = paginator::Model::new().with_per_page(page_size_options[0]);
        let mut gallery = Self {
            resources,
            filtered: Vec::new(),
            search: String::new(),
            file_type: None,
            project: None,
            project_filter: false,
            page_size_options,
            paginator,
            cursor: 0,
            searching: false,
            search_input: textinput::new()
                .with_prompt("Search: ")
                .with_placeholder("Search a document..."),
            pending_delete: None,
            confirmed: VecDeque::new(),
            title: "Addenda".to_string(),
            keymap: GalleryKeyMap::default(),
            styles: GalleryStyles::default(),
        };
        gallery.recompute();
        gallery
    }

    /// Offers `options` as page sizes, in the given order, starting on the
    /// first one. Zeros are dropped; an empty list keeps the current options.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        let options: Vec<usize> = options.into_iter().filter(|&n| n > 0).collect();
        if options.is_empty() {
            warn!("empty gallery page size options ignored");
            return self;
        }
        self.paginator.set_per_page(options[0]);
        self.page_size_options = options;
        self.paginator.page = 0;
        self.recompute();
        self
    }

    /// Adds the project filter to the filter bar.
    pub fn with_project_filter(mut self) -> Self {
        self.project_filter = true;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Every document, filtered or not.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Types present in the documents, in filter menu order.
    pub fn type_options(&self) -> Vec<FileType> {
        FileType::ORDER
            .into_iter()
            .filter(|t| self.resources.iter().any(|r| r.kind == *t))
            .collect()
    }

    /// Project names of the documents, sorted and without duplicates.
    pub fn project_options(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .resources
            .iter()
            .filter_map(|r| r.project_name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// The offered page sizes.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// The current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The active type filter.
    pub fn file_type(&self) -> Option<FileType> {
        self.file_type
    }

    /// The active project filter.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Replaces the search text and goes back to page 1.
    pub fn set_search(&mut self, text: &str) {
        debug!(search = %text, "gallery search changed");
        self.search = text.to_string();
        if self.search_input.value() != text {
            self.search_input.set_value(text);
        }
        self.reset_page();
    }

    /// Keeps only documents of `file_type`, or every type for `None`, and
    /// goes back to page 1.
    pub fn set_file_type(&mut self, file_type: Option<FileType>) {
        debug!(?file_type, "gallery type filter changed");
        self.file_type = file_type;
        self.reset_page();
    }

    /// Keeps only documents of `project`, or every project for `None`, and
    /// goes back to page 1.
    pub fn set_project(&mut self, project: Option<&str>) {
        debug!(?project, "gallery project filter changed");
        self.project = project.map(str::to_string);
        self.reset_page();
    }

    /// Sets the page size and goes back to page 1. Sizes that are not
    /// offered are ignored.
    pub fn set_page_size(&mut self, n: usize) {
        if !self.page_size_options.contains(&n) {
            warn!(size = n, "gallery page size not offered");
            return;
        }
        self.paginator.set_per_page(n);
        self.reset_page();
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.paginator.per_page
    }

    /// Steps to the next or previous offered page size.
    pub fn step_page_size(&mut self, grow: bool) {
        let Some(index) = self
            .page_size_options
            .iter()
            .position(|&n| n == self.paginator.per_page)
        else {
            return;
        };
        let next = if grow {
            index + 1
        } else if index > 0 {
            index - 1
        } else {
            return;
        };
        if let Some(&size) = self.page_size_options.get(next) {
            self.set_page_size(size);
        }
    }

    /// Moves the type filter to the next present type, then back to all.
    pub fn cycle_file_type(&mut self) {
        let options = self.type_options();
        let next = match self.file_type {
            None => options.first().copied(),
            Some(current) => options
                .iter()
                .position(|&t| t == current)
                .and_then(|i| options.get(i + 1))
                .copied(),
        };
        self.set_file_type(next);
    }

    /// Moves the project filter to the next project, then back to all.
    pub fn cycle_project(&mut self) {
        let options = self.project_options();
        let next = match &self.project {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|p| p == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };
        self.set_project(next.as_deref());
    }

    /// Number of documents passing the search and filters.
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Documents passing the search and filters, in input order.
    pub fn filtered_resources(&self) -> Vec<&Resource> {
        self.filtered.iter().map(|&i| &self.resources[i]).collect()
    }

    /// Documents on the current page.
    pub fn page_resources(&self) -> Vec<&Resource> {
        let (start, end) = self.paginator.get_slice_bounds(self.filtered.len());
        self.filtered[start..end]
            .iter()
            .map(|&i| &self.resources[i])
            .collect()
    }

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    /// Number of pages, at least 1.
    pub fn page_count(&self) -> usize {
        self.paginator.total_pages
    }

    /// Moves to the 1-based page `n`, clamped.
    pub fn go_to_page(&mut self, n: usize) {
        self.paginator.go_to_page(n);
        self.cursor = 0;
    }

    /// Next page; no-op on the last.
    pub fn next_page(&mut self) {
        self.paginator.next_page();
        self.cursor = 0;
    }

    /// Previous page; no-op on the first.
    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
        self.cursor = 0;
    }

    /// The compact page range.
    pub fn page_range(&self) -> Vec<PageItem> {
        pagination_range(self.paginator.total_pages, self.current_page())
    }

    /// "Showing x to y of z documents".
    pub fn display_summary(&self) -> String {
        let total = self.filtered.len();
        let (from, to) = self.paginator.display_bounds(total);
        format!("Showing {from} to {to} of {total} documents")
    }

    /// The document under the cursor.
    pub fn selected(&self) -> Option<&Resource> {
        self.page_resources().get(self.cursor).copied()
    }

    /// Opens the delete confirmation for `id`.
    pub fn request_delete(&mut self, id: &str) {
        if self.resources.iter().any(|r| r.id == id) {
            self.pending_delete = Some(id.to_string());
        }
    }

    /// Closes the delete confirmation.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Removes the document awaiting confirmation and queues its id. The
    /// page is kept and clamped.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        self.resources.retain(|r| r.id != id);
        info!(resource = %id, "document deleted");
        self.confirmed.push_back(id);
        self.recompute();
    }

    /// The id awaiting confirmation.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Drains the ids of confirmed deletions.
    pub fn take_confirmed_deletions(&mut self) -> Vec<String> {
        self.confirmed.drain(..).collect()
    }

    /// Reports whether the search box has focus.
    pub fn searching(&self) -> bool {
        self.searching
    }

    fn reset_page(&mut self) {
        self.paginator.page = 0;
        self.recompute();
    }

    fn recompute(&mut self) {
        let needle = self.search.to_lowercase();
        let project_filter = if self.project_filter {
            self.project.as_deref()
        } else {
            None
        };
        self.filtered = self
            .resources
            .iter()
            .enumerate()
            .filter(|(_, r)| r.search_text().to_lowercase().contains(&needle))
            .filter(|(_, r)| self.file_type.map_or(true, |t| r.kind == t))
            .filter(|(_, r)| project_filter.map_or(true, |p| r.project_name.as_deref() == Some(p)))
            .map(|(i, _)| i)
            .collect();
        self.paginator.set_total_items(self.filtered.len());
        let on_page = self.paginator.items_on_page(self.filtered.len());
        self.cursor = self.cursor.min(on_page.saturating_sub(1));
    }

    fn handle_search_key(&mut self, key_msg: &KeyMsg) {
        if self.keymap.close_search.matches(key_msg) {
            self.searching = false;
            self.search_input.blur();
        } else if self.search_input.handle_key(key_msg) {
            let text = self.search_input.value();
            self.set_search(&text);
        }
    }

    fn handle_confirm_key(&mut self, key_msg: &KeyMsg) {
        if self.keymap.confirm.matches(key_msg) {
            self.confirm_delete();
        } else if self.keymap.cancel.matches(key_msg) {
            self.cancel_delete();
        }
    }

    fn handle_browse_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        } else if self.keymap.cursor_up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if self.keymap.cursor_down.matches(key_msg) {
            let on_page = self.paginator.items_on_page(self.filtered.len());
            self.cursor = (self.cursor + 1).min(on_page.saturating_sub(1));
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.search.matches(key_msg) {
            self.searching = true;
            return self.search_input.focus();
        } else if self.keymap.cycle_type.matches(key_msg) {
            self.cycle_file_type();
        } else if self.keymap.cycle_project.matches(key_msg) && self.project_filter {
            self.cycle_project();
        } else if self.keymap.grow_page_size.matches(key_msg) {
            self.step_page_size(true);
        } else if self.keymap.shrink_page_size.matches(key_msg) {
            self.step_page_size(false);
        } else if self.keymap.delete.matches(key_msg) {
            if let Some(id) = self.selected().map(|r| r.id.clone()) {
                self.request_delete(&id);
            }
        }
        None
    }

    fn filter_bar(&self) -> String {
        let mut parts = vec![format!(
            "Type: {}",
            self.file_type.map_or("All types", FileType::label)
        )];
        if self.project_filter {
            parts.push(format!(
                "Project: {}",
                self.project.as_deref().unwrap_or("All projects")
            ));
        }
        parts.push(format!("{} per page", self.paginator.per_page));
        parts.join(" • ")
    }

    fn card(&self, resource: &Resource, selected: bool) -> String {
        let badge = self.styles.badge.clone().render(&format!("[{}]", resource.kind));
        let mut meta = format!("{} · Added on {}", resource.size_label, resource.added_at);
        if resource.kind != FileType::Cad {
            meta.push_str(&format!(
                " · Division: {}",
                resource.division.as_deref().unwrap_or("N/A")
            ));
        }
        let name = if selected {
            self.styles.selected_card.clone().render(&format!("> {}", resource.name))
        } else {
            format!("  {}", resource.name)
        };
        format!(
            "{} {}\n      {}",
            name,
            badge,
            self.styles.meta.clone().render(&meta)
        )
    }

    fn view_pages(&self) -> String {
        let current = self.current_page();
        self.page_range()
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == current => {
                    self.styles.current_page.clone().render(&n.to_string())
                }
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl BubbleTeaModel for ResourceGallery {
    /// Loads the embedded documents with the project filter on.
    fn init() -> (Self, Option<Cmd>) {
        let resources = fixtures::resources().unwrap_or_else(|err| {
            warn!(error = %err, "resource fixture unavailable");
            Vec::new()
        });
        (Self::new(resources).with_project_filter(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.pending_delete.is_some() {
            self.handle_confirm_key(key_msg);
            return None;
        }
        if self.searching {
            self.handle_search_key(key_msg);
            return None;
        }
        self.handle_browse_key(key_msg)
    }

    fn view(&self) -> String {
        let mut lines = vec![self.styles.title.clone().render(&self.title)];
        if self.searching || !self.search.is_empty() {
            lines.push(self.search_input.view());
        }
        lines.push(self.styles.filters.clone().render(&self.filter_bar()));
        lines.push(String::new());

        let page = self.page_resources();
        if page.is_empty() {
            lines.push(
                self.styles
                    .no_results
                    .clone()
                    .render("No document matches your search."),
            );
        } else {
            for (i, resource) in page.iter().enumerate() {
                lines.push(self.card(resource, i == self.cursor));
            }
        }

        lines.push(String::new());
        lines.push(self.styles.summary.clone().render(&self.display_summary()));
        lines.push(self.view_pages());

        if let Some(id) = &self.pending_delete {
            let name = self
                .resources
                .iter()
                .find(|r| &r.id == id)
                .map_or(id.as_str(), |r| r.name.as_str());
            lines.push(
                self.styles
                    .confirm
                    .clone()
                    .render(&format!("Delete \"{name}\"? (y/n)")),
            );
        }
        lines.push(
            self.styles
                .help
                .clone()
                .render(&key::help_line(&self.keymap.short_help(), " • ")),
        );
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn gallery() -> ResourceGallery {
        ResourceGallery::new(fixtures::resources().unwrap()).with_project_filter()
    }

    fn ids(gallery: &ResourceGallery) -> Vec<&str> {
        gallery
            .filtered_resources()
            .iter()
            .map(|r| r.id.as_str())
            .collect()
    }

    fn press(gallery: &mut ResourceGallery, code: KeyCode) {
        gallery.update(Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg);
    }

    fn many(n: usize) -> Vec<Resource> {
        (1..=n)
            .map(|i| Resource {
                id: format!("doc-{i}"),
                name: format!("Document {i}"),
                size_label: "1 MB".to_string(),
                kind: if i % 3 == 0 { FileType::Image } else { FileType::Pdf },
                added_at: "01/04/2024".to_string(),
                file_name: None,
                division: None,
                project_name: Some(format!("Projet {}", i % 2)),
            })
            .collect()
    }

    #[test]
    fn test_type_filter() {
        let mut gallery = gallery();
        gallery.set_file_type(Some(FileType::Pdf));
        assert_eq!(ids(&gallery), vec!["add-1", "add-4", "add-6", "add-8"]);
        gallery.set_file_type(Some(FileType::Excel));
        assert_eq!(ids(&gallery), vec!["add-3"]);
        gallery.set_file_type(None);
        assert_eq!(gallery.filtered_count(), 8);
    }

    #[test]
    fn test_type_options_only_present_types_in_order() {
        let gallery = gallery();
        assert_eq!(
            gallery.type_options(),
            vec![FileType::Cad, FileType::Pdf, FileType::Excel, FileType::Other]
        );
    }

    #[test]
    fn test_type_key_cycles_present_types() {
        let mut gallery = gallery();
        let mut seen = Vec::new();
        for _ in 0..5 {
            press(&mut gallery, KeyCode::Char('t'));
            seen.push(gallery.file_type());
        }
        assert_eq!(
            seen,
            vec![
                Some(FileType::Cad),
                Some(FileType::Pdf),
                Some(FileType::Excel),
                Some(FileType::Other),
                None
            ]
        );
    }

    #[test]
    fn test_project_filter() {
        let mut gallery = gallery();
        assert_eq!(
            gallery.project_options(),
            vec!["Atelier Mécanique", "Complexe Résidentiel", "Usine de Production"]
        );
        gallery.set_project(Some("Complexe Résidentiel"));
        assert_eq!(ids(&gallery), vec!["add-3", "add-4", "add-7"]);

        gallery.set_file_type(Some(FileType::Cad));
        assert_eq!(ids(&gallery), vec!["add-7"]);

        press(&mut gallery, KeyCode::Char('p'));
        assert_eq!(gallery.project(), Some("Usine de Production"));
        assert_eq!(ids(&gallery), vec!["add-2"]);
        press(&mut gallery, KeyCode::Char('p'));
        assert_eq!(gallery.project(), None);
        assert_eq!(ids(&gallery), vec!["add-2", "add-7"]);
    }

    #[test]
    fn test_project_filter_off_by_default() {
        let mut gallery = ResourceGallery::new(fixtures::resources().unwrap());
        press(&mut gallery, KeyCode::Char('p'));
        assert_eq!(gallery.project(), None);
        assert!(!strip_ansi_escapes::strip_str(gallery.view()).contains("Project:"));
    }

    #[test]
    fn test_search_uses_file_name_then_name() {
        let mut gallery = gallery();
        gallery.set_search("RVT");
        assert_eq!(ids(&gallery), vec!["add-2", "add-7"]);
        gallery.set_search("révisé");
        assert!(ids(&gallery).is_empty());

        let mut unnamed = ResourceGallery::new(many(3));
        unnamed.set_search("document 2");
        assert_eq!(ids(&unnamed), vec!["doc-2"]);
    }

    #[test]
    fn test_page_size_defaults_to_first_option() {
        let gallery = ResourceGallery::new(many(30));
        assert_eq!(gallery.page_size(), 6);
        assert_eq!(gallery.page_count(), 5);

        let gallery = ResourceGallery::new(many(30)).with_page_size_options(vec![9, 3]);
        assert_eq!(gallery.page_size(), 9);
        assert_eq!(gallery.page_count(), 4);
    }

    #[test]
    fn test_search_filter_and_size_changes_reset_page() {
        let mut gallery = ResourceGallery::new(many(30));

        gallery.go_to_page(3);
        gallery.set_search("document");
        assert_eq!(gallery.current_page(), 1);

        gallery.go_to_page(3);
        gallery.set_file_type(Some(FileType::Pdf));
        assert_eq!(gallery.current_page(), 1);

        gallery.go_to_page(3);
        assert_eq!(gallery.current_page(), 3);
        press(&mut gallery, KeyCode::Char('+'));
        assert_eq!(gallery.page_size(), 12);
        assert_eq!(gallery.current_page(), 1);

        let mut gallery = ResourceGallery::new(many(30)).with_project_filter();
        gallery.go_to_page(2);
        gallery.set_project(Some("Projet 1"));
        assert_eq!(gallery.current_page(), 1);
        assert_eq!(gallery.filtered_count(), 15);
    }

    #[test]
    fn test_page_size_steps_follow_option_order() {
        let mut gallery = ResourceGallery::new(many(30));
        press(&mut gallery, KeyCode::Char('-'));
        assert_eq!(gallery.page_size(), 6);
        press(&mut gallery, KeyCode::Char('+'));
        press(&mut gallery, KeyCode::Char('+'));
        press(&mut gallery, KeyCode::Char('+'));
        assert_eq!(gallery.page_size(), 24);
        gallery.set_page_size(7);
        assert_eq!(gallery.page_size(), 24);
    }

    #[test]
    fn test_summary_and_page_range() {
        let mut gallery = ResourceGallery::new(many(30));
        assert_eq!(gallery.display_summary(), "Showing 1 to 6 of 30 documents");
        gallery.go_to_page(5);
        assert_eq!(gallery.display_summary(), "Showing 25 to 30 of 30 documents");
        assert_eq!(gallery.page_range(), pagination_range(5, 5));

        gallery.set_search("nothing like this");
        assert_eq!(gallery.display_summary(), "Showing 0 to 0 of 0 documents");
        assert_eq!(gallery.page_range(), vec![PageItem::Page(1)]);
        let view = strip_ansi_escapes::strip_str(gallery.view());
        assert!(view.contains("No document matches your search."));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut gallery = gallery();
        press(&mut gallery, KeyCode::Down);
        press(&mut gallery, KeyCode::Char('x'));
        assert_eq!(gallery.pending_delete(), Some("add-2"));
        assert!(strip_ansi_escapes::strip_str(gallery.view()).contains("Delete \"Plan RDC révisé\"? (y/n)"));

        press(&mut gallery, KeyCode::Char('t'));
        assert_eq!(gallery.file_type(), None);
        press(&mut gallery, KeyCode::Char('n'));
        assert_eq!(gallery.pending_delete(), None);
        assert_eq!(gallery.resources().len(), 8);

        press(&mut gallery, KeyCode::Char('x'));
        press(&mut gallery, KeyCode::Char('y'));
        assert_eq!(gallery.resources().len(), 7);
        assert_eq!(gallery.take_confirmed_deletions(), vec!["add-2".to_string()]);
        assert!(gallery.take_confirmed_deletions().is_empty());
    }

    #[test]
    fn test_deletion_keeps_page() {
        let mut gallery = ResourceGallery::new(many(13));
        gallery.go_to_page(2);
        gallery.request_delete("doc-8");
        gallery.confirm_delete();
        assert_eq!(gallery.filtered_count(), 12);
        assert_eq!(gallery.current_page(), 2);

        let mut gallery = ResourceGallery::new(many(13));
        gallery.go_to_page(3);
        assert_eq!(gallery.page_resources().len(), 1);
        gallery.request_delete("doc-13");
        gallery.confirm_delete();
        assert_eq!(gallery.page_count(), 2);
        assert_eq!(gallery.current_page(), 2);
    }

    #[test]
    fn test_typing_a_search() {
        let mut gallery = gallery();
        press(&mut gallery, KeyCode::Char('/'));
        assert!(gallery.searching());
        for c in "zip".chars() {
            press(&mut gallery, KeyCode::Char(c));
        }
        assert_eq!(gallery.search(), "zip");
        assert_eq!(ids(&gallery), vec!["add-5"]);
        press(&mut gallery, KeyCode::Enter);
        assert!(!gallery.searching());
        press(&mut gallery, KeyCode::Char('t'));
        assert_eq!(gallery.file_type(), Some(FileType::Cad));
        assert_eq!(gallery.filtered_count(), 0);
    }

    #[test]
    fn test_cards_omit_division_for_cad() {
        let gallery = gallery();
        let view = strip_ansi_escapes::strip_str(gallery.view());
        assert!(view.contains("[PDF]"));
        assert!(view.contains("2.4 MB · Added on 12/03/2024 · Division: Structure"));
        assert!(view.contains("18.1 MB · Added on 14/03/2024\n"));
        assert!(view.contains("35.7 MB · Added on 20/03/2024 · Division: N/A"));
        assert!(view.contains("Showing 1 to 6 of 8 documents"));
    }
}
