//! Sample data standing in for backend responses.

use super::intervenants::Intervenant;
use super::projects::Project;
use super::reports::TenderReport;
use super::resources::Resource;
use super::tenders::Tender;
use crate::error::Result;
use serde::de::DeserializeOwned;
use tracing::info;

const PROJECTS_JSON: &str = include_str!("fixtures/projects.json");
const TENDERS_JSON: &str = include_str!("fixtures/tenders.json");
const TENDER_REPORTS_JSON: &str = include_str!("fixtures/tender_reports.json");
const INTERVENANTS_JSON: &str = include_str!("fixtures/intervenants.json");
const RESOURCES_JSON: &str = include_str!("fixtures/resources.json");

/// Decodes a JSON array of records.
pub fn load<T: DeserializeOwned>(name: &str, json: &str) -> Result<Vec<T>> {
    let records: Vec<T> = serde_json::from_str(json)?;
    info!(fixture = name, count = records.len(), "fixture loaded");
    Ok(records)
}

/// The sample projects.
pub fn projects() -> Result<Vec<Project>> {
    load("projects", PROJECTS_JSON)
}

/// The sample tenders.
pub fn tenders() -> Result<Vec<Tender>> {
    load("tenders", TENDERS_JSON)
}

/// Per-intervenant dispatch rows of the sample tenders.
pub fn tender_reports() -> Result<Vec<TenderReport>> {
    load("tender_reports", TENDER_REPORTS_JSON)
}

/// The sample intervenants.
pub fn intervenants() -> Result<Vec<Intervenant>> {
    load("intervenants", INTERVENANTS_JSON)
}

/// The sample addenda documents.
pub fn resources() -> Result<Vec<Resource>> {
    load("resources", RESOURCES_JSON)
}
