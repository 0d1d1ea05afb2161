// src/export/logic.rs

use crate::auth::Admin;
use crate::db::log::oplog;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::HourExport;
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use crate::utils::date::month_name;
use crate::utils::path::resolve_output_path;

use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

/// High level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the logged hours.
    ///
    /// - `format`: csv | json | xlsx | pdf
    /// - `file`: output path, relative paths resolve against the cwd
    /// - `range`: `None`, `"all"` or expressions like:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///   - `YYYY-MM-DD:YYYY-MM-DD`
    pub fn export(
        conn: &Connection,
        admin: &Admin,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = resolve_output_path(file)?;

        ensure_writable(&path, force)?;

        let date_bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let records = load_hours(conn, date_bounds)?;

        if records.is_empty() {
            warning("⚠️  No hour records found for selected range.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&records, &path)?,
            ExportFormat::Json => export_json(&records, &path)?,
            ExportFormat::Xlsx => export_xlsx(&records, &path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(range);
                export_pdf(&records, &path, &title)?
            }
        }

        oplog(
            conn,
            "export",
            format.as_str(),
            &format!(
                "Exported {} hour records to {} by {}",
                records.len(),
                path.display(),
                admin.username
            ),
        )?;

        Ok(())
    }
}

/// Build the PDF title from the selected period.
fn build_pdf_title(period: &Option<String>) -> String {
    // No period means everything
    let Some(p) = period else {
        return "Logged hours".to_string();
    };
    if p.eq_ignore_ascii_case("all") {
        return "Logged hours".to_string();
    }

    // Spans keep both endpoints verbatim
    if let Some((from, to)) = p.split_once(':') {
        return format!("Logged hours from {} to {}", from, to);
    }

    match p.len() {
        4 => {
            // YYYY
            format!("Logged hours for year {}", p)
        }

        7 => {
            // YYYY-MM
            let parts: Vec<&str> = p.split('-').collect();
            let month = parts.get(1).and_then(|m| m.parse::<u32>().ok());
            match month {
                Some(m) if (1..=12).contains(&m) => {
                    format!("Logged hours for {} {}", month_name(m), parts[0])
                }
                _ => "Logged hours".to_string(),
            }
        }

        10 => {
            // YYYY-MM-DD
            format!("Logged hours for {}", p)
        }

        _ => "Logged hours".to_string(),
    }
}

/// Load hour records joined with their employee and project.
fn load_hours(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<HourExport>> {
    const SELECT: &str = "SELECT hr.id,
            e.first_name || ' ' || e.last_name AS employee,
            e.phone_number,
            p.name AS project,
            p.date AS project_date,
            hr.hours_worked,
            hr.created_at,
            hr.updated_at
     FROM hour_records hr
     JOIN employees e ON e.id = hr.employee_id
     JOIN projects  p ON p.id = hr.project_id";

    let mut records = Vec::new();

    match bounds {
        None => {
            let sql = format!("{SELECT} ORDER BY p.date ASC, hr.id ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                records.push(r?);
            }
        }
        Some((start, end)) => {
            let start_str = start.format("%Y-%m-%d").to_string();
            let end_str = end.format("%Y-%m-%d").to_string();

            let sql = format!(
                "{SELECT} WHERE p.date BETWEEN ?1 AND ?2 ORDER BY p.date ASC, hr.id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![start_str, end_str], map_row)?;
            for r in rows {
                records.push(r?);
            }
        }
    }

    Ok(records)
}

/// DB row → HourExport, shared by both query branches.
fn map_row(row: &Row<'_>) -> rusqlite::Result<HourExport> {
    Ok(HourExport {
        id: row.get(0)?,
        employee: row.get(1)?,
        phone_number: row.get(2)?,
        project: row.get(3)?,
        project_date: row.get(4)?,
        hours_worked: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_for_whole_dataset() {
        assert_eq!(build_pdf_title(&None), "Logged hours");
        assert_eq!(build_pdf_title(&Some("all".to_string())), "Logged hours");
    }

    #[test]
    fn title_names_the_period() {
        assert_eq!(
            build_pdf_title(&Some("2025".to_string())),
            "Logged hours for year 2025"
        );
        assert_eq!(
            build_pdf_title(&Some("2025-03".to_string())),
            "Logged hours for March 2025"
        );
        assert_eq!(
            build_pdf_title(&Some("2025-03-14".to_string())),
            "Logged hours for 2025-03-14"
        );
        assert_eq!(
            build_pdf_title(&Some("2025-01:2025-06".to_string())),
            "Logged hours from 2025-01 to 2025-06"
        );
    }
}
