use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,        // ⇔ projects.name (TEXT)
    pub description: String, // ⇔ projects.description (TEXT, default '')
    pub date: NaiveDate,     // ⇔ projects.date (TEXT "YYYY-MM-DD")
    pub created_at: String,  // ⇔ projects.created_at (TEXT, ISO8601)
}

impl Project {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Field set required to create a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Listing shape: the project plus how many employees booked hours on it.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub project: Project,
    pub employee_count: i64,
}

/// One hour record booked on the project, joined with employee display fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectHours {
    pub record_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub phone_number: String,
    pub hours_worked: f64,
    pub created_at: String,
}

/// Project plus the employees booked on it.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub crew: Vec<ProjectHours>,
}
