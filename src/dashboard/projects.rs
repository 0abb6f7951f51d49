//! Projects listed on the "my projects" page.

use crate::datatable::{self, CellValue, Column, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a project stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Created by the owner.
    Initiated,
    /// Submitted for quotes.
    Requested,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectStatus::Initiated => "Initiated",
            ProjectStatus::Requested => "Requested",
        })
    }
}

/// Window during which contractors can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPeriod {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

/// A construction project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier, e.g. `PRJ001`.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Owner reference.
    pub reference: String,
    /// Submission window.
    pub submission_period: SubmissionPeriod,
    /// Building type, e.g. "Industriel lourd".
    #[serde(rename = "type")]
    pub kind: String,
    /// Status.
    pub status: ProjectStatus,
    /// Creation date.
    pub created_at: NaiveDate,
    /// Last modification date.
    pub updated_at: NaiveDate,
}

impl Record for Project {
    fn key(&self) -> String {
        self.id.clone()
    }
}

fn date_text(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// Columns of the projects table. The actions column cannot be hidden.
pub fn project_columns() -> Vec<Column<Project>> {
    vec![
        Column::new("id", "ID", |p: &Project| p.id.as_str().into()),
        Column::new("name", "Project", |p: &Project| p.name.as_str().into()).with_width(32),
        Column::new("reference", "Ref", |p: &Project| p.reference.as_str().into()),
        Column::new("period", "Period", |p: &Project| {
            CellValue::Date(p.submission_period.start)
        })
        .with_display(|p: &Project| {
            format!(
                "{} - {}",
                date_text(p.submission_period.start),
                date_text(p.submission_period.end)
            )
        }),
        Column::new("type", "Type", |p: &Project| p.kind.as_str().into()),
        Column::new("status", "Status", |p: &Project| p.status.to_string().into()),
        Column::new("created_at", "Initiated", |p: &Project| p.created_at.into()),
        Column::new("updated_at", "Modified", |p: &Project| p.updated_at.into()),
        Column::new("actions", "", |_: &Project| CellValue::Empty)
            .with_display(|_: &Project| "view · edit · delete".to_string())
            .with_sortable(false)
            .with_hideable(false),
    ]
}

/// The projects table, searchable by name.
pub fn projects_table(projects: Vec<Project>) -> datatable::Model<Project> {
    datatable::Model::new(projects, project_columns(), "name").with_title("My projects")
}
