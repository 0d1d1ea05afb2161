use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,          // ⇔ employees.first_name (TEXT)
    pub last_name: String,           // ⇔ employees.last_name (TEXT)
    pub phone_number: String,        // ⇔ employees.phone_number (TEXT UNIQUE)
    pub role: String,                // ⇔ employees.role (TEXT)
    pub hourly_rate: Option<f64>,    // ⇔ employees.hourly_rate (REAL, nullable)
    pub created_at: String,          // ⇔ employees.created_at (TEXT, ISO8601)
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Earnings appear on reports only for employees with a positive rate.
    pub fn billable(&self) -> bool {
        matches!(self.hourly_rate, Some(r) if r > 0.0)
    }
}

/// Field set required to create an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: String,
    pub hourly_rate: Option<f64>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    /// `Some(None)` clears the rate, `Some(Some(x))` sets it.
    pub hourly_rate: Option<Option<f64>>,
}

/// One of the employee's hour records, joined with project display fields.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeHours {
    pub record_id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub project_date: chrono::NaiveDate,
    pub hours_worked: f64,
    pub created_at: String,
}

/// Employee plus their hour records.
#[derive(Debug, Serialize)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub records: Vec<EmployeeHours>,
}
