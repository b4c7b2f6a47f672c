use serde::Serialize;

/// A directory user. Ids are opaque UUID strings assigned at creation.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub pay_rate: Option<f64>,
    pub manages_organization: bool,
    pub organization_id: Option<i64>,
}

impl User {
    /// "First Last", falling back to the email when no name is recorded.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => self.email.clone(),
        }
    }
}
