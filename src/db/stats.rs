//! Aggregate statistics and database info output.

use crate::auth::Admin;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension, ToSql};
use serde::Serialize;
use std::fs;

/// Aggregate counters over the current data set.
///
/// The employee count is always the full roster: headcount does not
/// depend on the reporting period, only projects and hours do.
#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_employees: i64,
    pub total_projects: i64,
    pub total_hours: f64,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

pub fn statistics(
    conn: &Connection,
    _admin: &Admin,
    month: Option<u32>,
    year: Option<i32>,
) -> AppResult<Statistics> {
    let total_employees: i64 =
        conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;

    let mut preds: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(m) = month {
        preds.push("CAST(strftime('%m', p.date) AS INTEGER) = ?");
        args.push(Box::new(m as i64));
    }
    if let Some(y) = year {
        preds.push("CAST(strftime('%Y', p.date) AS INTEGER) = ?");
        args.push(Box::new(y as i64));
    }
    let where_clause = if preds.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", preds.join(" AND "))
    };
    let refs: Vec<&dyn ToSql> = args.iter().map(|a| a.as_ref()).collect();

    let total_projects: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM projects p{}", where_clause),
        rusqlite::params_from_iter(refs.iter()),
        |row| row.get(0),
    )?;

    let total_hours: f64 = conn.query_row(
        &format!(
            "SELECT COALESCE(SUM(hr.hours_worked), 0.0)
             FROM hour_records hr JOIN projects p ON p.id = hr.project_id{}",
            where_clause
        ),
        rusqlite::params_from_iter(refs.iter()),
        |row| row.get(0),
    )?;

    Ok(Statistics {
        total_employees,
        total_projects,
        total_hours: (total_hours * 100.0).round() / 100.0,
        month,
        year,
    })
}

/// Print database facts for `db --info`.
pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let employees: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
    let projects: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
    let records: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM hour_records", [], |row| row.get(0))?;
    let hours: f64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(hours_worked), 0.0) FROM hour_records",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Employees:{} {}{}{}", CYAN, RESET, GREEN, employees, RESET);
    println!("{}• Projects:{} {}{}{}", CYAN, RESET, GREEN, projects, RESET);
    println!("{}• Hour records:{} {}{}{}", CYAN, RESET, GREEN, records, RESET);
    println!("{}• Total hours:{} {:.2}", CYAN, RESET, hours);

    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM projects ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM projects ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Project date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
