//! High-level logic for `hours record`: resolve both parents, then
//! create-or-overwrite the record for the pair.

use crate::auth::Admin;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::hour_record::HourRecord;
use rusqlite::Connection;

pub struct RecordHoursLogic;

impl RecordHoursLogic {
    pub fn apply(
        conn: &Connection,
        admin: &Admin,
        employee_id: i64,
        project_id: i64,
        hours: Option<f64>,
    ) -> AppResult<HourRecord> {
        let hours = hours.unwrap_or(0.0);
        if !hours.is_finite() || hours < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "hours must be a finite, non-negative number (got {})",
                hours
            )));
        }

        // Resolve parents first so a dangling id surfaces as NotFound
        // instead of a foreign key failure.
        let employee = db::employees::get_employee(conn, admin, employee_id)?;
        let project = db::projects::get_project(conn, admin, project_id)?;

        db::hours::upsert_hours(conn, admin, employee.id, project.id, hours)
    }
}
