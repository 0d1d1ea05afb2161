use chrono::NaiveDate;
use serde::Serialize;

/// Hours an employee logged against one project. At most one record exists
/// per (employee, project) pair; recording again overwrites the hours.
#[derive(Debug, Clone, Serialize)]
pub struct HourRecord {
    pub id: i64,
    pub employee_id: i64,  // ⇔ hour_records.employee_id (FK, cascade)
    pub project_id: i64,   // ⇔ hour_records.project_id (FK, cascade)
    pub hours_worked: f64, // ⇔ hour_records.hours_worked (REAL >= 0)
    pub created_at: String,
    pub updated_at: String,
}

impl HourRecord {
    /// True until the record has been overwritten at least once.
    pub fn is_fresh(&self) -> bool {
        self.created_at == self.updated_at
    }
}

/// Listing row: the record joined with both parents' display fields.
#[derive(Debug, Clone, Serialize)]
pub struct HourRecordRow {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub project_id: i64,
    pub project_name: String,
    pub project_date: NaiveDate,
    pub hours_worked: f64,
    pub created_at: String,
}
