//! Domain records of the project and tender dashboard.
//!
//! Each record type implements [`Record`](crate::datatable::Record) and
//! ships its column set, so pages are a constructor call away:
//!
//! ```rust
//! use tenderboard::dashboard::{fixtures, projects};
//!
//! let mut table = projects::projects_table(fixtures::projects().unwrap());
//! table.set_search_text("usine");
//! assert_eq!(table.filtered_count(), 2);
//! ```
//!
//! Documents are not tabular; [`resources::ResourceGallery`] shows them as
//! cards.

pub mod fixtures;
pub mod intervenants;
pub mod projects;
pub mod reports;
pub mod resources;
pub mod tenders;

pub use intervenants::{intervenant_columns, intervenants_table, Intervenant, Service};
pub use projects::{project_columns, projects_table, Project, ProjectStatus, SubmissionPeriod};
pub use reports::{
    report_columns, ReportCounts, ReportFilters, ReportKeyMap, TenderReport, TenderReportPage,
};
pub use resources::{FileType, GalleryKeyMap, GalleryStyles, Resource, ResourceGallery};
pub use tenders::{
    tender_columns, StatusFilter, Tender, TenderFilters, TenderStatus, TendersKeyMap, TendersPage,
};
