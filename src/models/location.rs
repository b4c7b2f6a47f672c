use serde::Serialize;

/// A work location belonging to an organization.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub organization_id: i64,
}
