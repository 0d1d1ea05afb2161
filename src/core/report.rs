//! Monthly work report assembly.
//!
//! `ReportLogic` resolves the employee, pulls the month's records and turns
//! them into a [`MonthlyReport`]: a fully formatted description of the
//! document. Drawing happens in `export::report_pdf`. All display strings
//! are German (fixed report locale).

use crate::auth::Admin;
use crate::config::Config;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::hour_record::HourRecordRow;
use crate::utils::date::{current_year, month_bounds};
use crate::utils::formatting::{format_euro, format_hours};
use chrono::{DateTime, Datelike, Local, Timelike};
use rusqlite::Connection;

pub fn german_month_name(month: u32) -> &'static str {
    match month {
        1 => "Januar",
        2 => "Februar",
        3 => "März",
        4 => "April",
        5 => "Mai",
        6 => "Juni",
        7 => "Juli",
        8 => "August",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        12 => "Dezember",
        _ => "Monat",
    }
}

/// One itemized line of the report table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: String,
    pub project: String,
    pub hours: String,
    /// Present only for employees with a positive hourly rate.
    pub earnings: Option<String>,
}

/// Assembled monthly report, ready to draw.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub organization: String,
    pub title: String,
    pub printed_at: String,
    pub employee_name: String,
    pub phone_number: String,
    pub role: String,
    pub hourly_rate: Option<String>,
    pub period: String,
    pub month: u32,
    pub year: i32,
    pub rows: Vec<ReportRow>,
    pub total_hours: String,
    pub total_earnings: Option<String>,
    /// Set instead of rows when the month has no records.
    pub empty_notice: Option<String>,
}

/// Pure transform from the employee and the month's records to the document.
pub fn assemble(
    organization: &str,
    employee: &Employee,
    records: &[HourRecordRow],
    month: u32,
    year: i32,
    printed_at: DateTime<Local>,
) -> MonthlyReport {
    let billable = employee.billable();
    let rate = employee.hourly_rate.unwrap_or(0.0);
    let month_name = german_month_name(month);

    let mut total_hours = 0.0;
    let rows: Vec<ReportRow> = records
        .iter()
        .map(|r| {
            total_hours += r.hours_worked;
            ReportRow {
                date: r.project_date.format("%Y-%m-%d").to_string(),
                project: r.project_name.clone(),
                hours: format_hours(r.hours_worked),
                earnings: billable.then(|| format_euro(r.hours_worked * rate)),
            }
        })
        .collect();

    MonthlyReport {
        organization: organization.to_string(),
        title: "Mitarbeiter Arbeitsbericht".to_string(),
        printed_at: format!(
            "Gedruckt: {} {}, {} um {:02}:{:02} Uhr",
            german_month_name(printed_at.month()),
            printed_at.day(),
            printed_at.year(),
            printed_at.hour(),
            printed_at.minute()
        ),
        employee_name: employee.full_name(),
        phone_number: employee.phone_number.clone(),
        role: employee.role.clone(),
        hourly_rate: billable.then(|| format_euro(rate)),
        period: format!("{} {}", month_name, year),
        month,
        year,
        empty_notice: rows
            .is_empty()
            .then(|| format!("Für {} {} wurden keine Projekte gefunden", month_name, year)),
        total_hours: format_hours(total_hours),
        total_earnings: billable.then(|| format_euro(total_hours * rate)),
        rows,
    }
}

pub struct ReportLogic;

impl ReportLogic {
    /// Validate the period, load the data and assemble the document.
    pub fn generate(
        conn: &Connection,
        admin: &Admin,
        cfg: &Config,
        employee_id: i64,
        month: u32,
        year: Option<i32>,
    ) -> AppResult<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidInput(format!(
                "month must be between 1 and 12 (got {})",
                month
            )));
        }
        let year = year.unwrap_or_else(current_year);
        let (first, last) = month_bounds(year, month).ok_or_else(|| {
            AppError::InvalidInput(format!("invalid reporting period {}-{:02}", year, month))
        })?;

        let employee = db::employees::get_employee(conn, admin, employee_id)?;
        let records = db::hours::list_for_report(conn, admin, employee.id, first, last)?;

        db::log::oplog(
            conn,
            "report",
            &format!("employee {}", employee.id),
            &format!(
                "Monthly report {}-{:02} generated by {}",
                year, month, admin.username
            ),
        )?;

        Ok(assemble(
            &cfg.organization,
            &employee,
            &records,
            month,
            year,
            Local::now(),
        ))
    }

    /// Default output name: employee id, year and zero-padded month.
    pub fn default_file_name(employee_id: i64, month: u32, year: i32) -> String {
        format!("employee_{}_report_{}_{:02}.pdf", employee_id, year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee(rate: Option<f64>) -> Employee {
        Employee {
            id: 7,
            first_name: "Anna".to_string(),
            last_name: "Schmidt".to_string(),
            phone_number: "+4915112345678".to_string(),
            role: "Elektrikerin".to_string(),
            hourly_rate: rate,
            created_at: "2025-01-05T08:00:00+01:00".to_string(),
        }
    }

    fn row(day: u32, project: &str, hours: f64) -> HourRecordRow {
        HourRecordRow {
            id: 1,
            employee_id: 7,
            employee_name: "Anna Schmidt".to_string(),
            project_id: 1,
            project_name: project.to_string(),
            project_date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
            hours_worked: hours,
            created_at: "2025-11-02T10:00:00+01:00".to_string(),
        }
    }

    fn printed() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn rated_employee_gets_earnings_and_totals() {
        let rows = [row(2, "Baustelle Mitte", 5.0), row(10, "Lager Nord", 3.0)];
        let report = assemble("ZeenAlZein", &employee(Some(20.0)), &rows, 11, 2025, printed());

        assert_eq!(report.organization, "ZeenAlZein");
        assert_eq!(report.title, "Mitarbeiter Arbeitsbericht");
        assert_eq!(report.period, "November 2025");
        assert_eq!(report.hourly_rate.as_deref(), Some("€20.00"));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].date, "2025-11-02");
        assert_eq!(report.rows[0].hours, "5.00");
        assert_eq!(report.rows[0].earnings.as_deref(), Some("€100.00"));
        assert_eq!(report.total_hours, "8.00");
        assert_eq!(report.total_earnings.as_deref(), Some("€160.00"));
        assert!(report.empty_notice.is_none());
    }

    #[test]
    fn unrated_employee_has_no_money_column() {
        let rows = [row(2, "Baustelle Mitte", 5.0)];
        let report = assemble("ZeenAlZein", &employee(None), &rows, 11, 2025, printed());

        assert!(report.hourly_rate.is_none());
        assert!(report.rows[0].earnings.is_none());
        assert!(report.total_earnings.is_none());
        assert_eq!(report.total_hours, "5.00");
    }

    #[test]
    fn zero_rate_counts_as_unrated() {
        let rows = [row(2, "Baustelle Mitte", 5.0)];
        let report = assemble("ZeenAlZein", &employee(Some(0.0)), &rows, 11, 2025, printed());
        assert!(report.hourly_rate.is_none());
        assert!(report.total_earnings.is_none());
    }

    #[test]
    fn empty_month_yields_notice() {
        let report = assemble("ZeenAlZein", &employee(Some(20.0)), &[], 11, 2025, printed());
        assert_eq!(
            report.empty_notice.as_deref(),
            Some("Für November 2025 wurden keine Projekte gefunden")
        );
        assert!(report.rows.is_empty());
        assert_eq!(report.total_hours, "0.00");
    }

    #[test]
    fn printed_line_uses_german_month() {
        let report = assemble("ZeenAlZein", &employee(None), &[], 3, 2025, printed());
        assert!(report.printed_at.starts_with("Gedruckt: "));
        assert!(report.printed_at.ends_with(" Uhr"));
        assert_eq!(report.period, "März 2025");
    }

    #[test]
    fn default_file_name_pads_the_month() {
        assert_eq!(
            ReportLogic::default_file_name(3, 6, 2025),
            "employee_3_report_2025_06.pdf"
        );
        assert_eq!(
            ReportLogic::default_file_name(12, 11, 2025),
            "employee_12_report_2025_11.pdf"
        );
    }
}
