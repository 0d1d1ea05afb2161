// src/export/model.rs

use serde::Serialize;

/// Flat row shape shared by all export formats.
#[derive(Serialize, Clone, Debug)]
pub struct HourExport {
    pub id: i64,
    pub employee: String,
    pub phone_number: String,
    pub project: String,
    pub project_date: String,
    pub hours_worked: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Headers for CSV / JSON / XLSX / PDF.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "employee",
        "phone_number",
        "project",
        "project_date",
        "hours_worked",
        "created_at",
        "updated_at",
    ]
}

/// Convert one record into a row of strings (for PDF and XLSX).
pub(crate) fn record_to_row(r: &HourExport) -> Vec<String> {
    vec![
        r.id.to_string(),
        r.employee.clone(),
        r.phone_number.clone(),
        r.project.clone(),
        r.project_date.clone(),
        format!("{:.2}", r.hours_worked),
        r.created_at.clone(),
        r.updated_at.clone(),
    ]
}

pub(crate) fn records_to_table(records: &[HourExport]) -> Vec<Vec<String>> {
    records.iter().map(record_to_row).collect()
}
