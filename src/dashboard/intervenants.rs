//! Intervenants assigned to a project.

use crate::datatable::{self, CellValue, Column, Record};
use serde::{Deserialize, Serialize};

/// A service an intervenant provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub label: String,
    /// Badge colour name, if any.
    #[serde(default)]
    pub color: Option<String>,
}

/// A person working on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervenant {
    /// Identifier.
    pub id: String,
    /// First and last name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Position, e.g. "Coordinateur".
    pub role: String,
    /// Services provided.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Intervenant {
    /// Service labels joined with commas.
    pub fn service_labels(&self) -> String {
        self.services
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Record for Intervenant {
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Columns of the intervenants table. The name cell also shows the email,
/// so searching by name matches either.
pub fn intervenant_columns() -> Vec<Column<Intervenant>> {
    vec![
        Column::new("name", "Full name", |i: &Intervenant| i.full_name.as_str().into())
            .with_display(|i: &Intervenant| format!("{} · {}", i.full_name, i.email))
            .with_width(44),
        Column::new("phone", "Phone", |i: &Intervenant| i.phone.as_str().into()),
        Column::new("role", "Role", |i: &Intervenant| i.role.as_str().into()),
        Column::new("services", "Services", |i: &Intervenant| i.service_labels().into())
            .with_sortable(false),
        Column::new("actions", "", |_: &Intervenant| CellValue::Empty)
            .with_display(|_: &Intervenant| "view · delete".to_string())
            .with_sortable(false)
            .with_hideable(false),
    ]
}

/// The intervenants table, searchable by name and email.
pub fn intervenants_table(intervenants: Vec<Intervenant>) -> datatable::Model<Intervenant> {
    datatable::Model::new(intervenants, intervenant_columns(), "name").with_title("Intervenants")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures;
    use crate::datatable::SortDirection;

    #[test]
    fn test_search_matches_name_or_email() {
        let mut table = intervenants_table(fixtures::intervenants().unwrap());
        table.set_search_text("diarra");
        assert_eq!(table.filtered_count(), 1);
        table.set_search_text("moussa.diallo@");
        assert_eq!(table.page_records()[0].id, "2");
        table.set_search_text("+223");
        assert_eq!(table.filtered_count(), 0);
    }

    #[test]
    fn test_sort_by_role() {
        let mut table = intervenants_table(fixtures::intervenants().unwrap());
        table.set_sort("role", SortDirection::Ascending);
        let roles: Vec<&str> = table.page_records().iter().map(|i| i.role.as_str()).collect();
        assert_eq!(roles, vec!["Analyste", "Chef de projet", "Coordinateur"]);
        table.set_sort("services", SortDirection::Ascending);
        assert_eq!(table.sort().map(|s| s.column_id.as_str()), Some("role"));
    }

    #[test]
    fn test_service_labels() {
        let intervenants = fixtures::intervenants().unwrap();
        assert_eq!(
            intervenants[1].service_labels(),
            "Coordination terrain, Reporting"
        );
    }
}
