//! Hour record store.
//!
//! Booking hours is a single-statement upsert keyed on the
//! (employee, project) pair, so concurrent bookings cannot race a
//! read-then-write into duplicate rows.

use crate::auth::Admin;
use crate::db::log::oplog;
use crate::db::map_constraint;
use crate::errors::{AppError, AppResult};
use crate::models::hour_record::{HourRecord, HourRecordRow};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

/// Optional list filters, combined with AND. Date bounds apply to the
/// project date, not the booking timestamp.
#[derive(Debug, Default, Clone)]
pub struct HourFilter {
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

pub fn map_record(row: &Row) -> Result<HourRecord> {
    Ok(HourRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        project_id: row.get("project_id")?,
        hours_worked: row.get("hours_worked")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn map_joined_row(row: &Row) -> Result<HourRecordRow> {
    let date_str: String = row.get("project_date")?;
    let project_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(HourRecordRow {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        employee_name: row.get("employee_name")?,
        project_id: row.get("project_id")?,
        project_name: row.get("project_name")?,
        project_date,
        hours_worked: row.get("hours_worked")?,
        created_at: row.get("created_at")?,
    })
}

const JOINED_SELECT: &str = "SELECT hr.id, hr.employee_id,
        e.first_name || ' ' || e.last_name AS employee_name,
        hr.project_id, p.name AS project_name, p.date AS project_date,
        hr.hours_worked, hr.created_at
 FROM hour_records hr
 JOIN employees e ON e.id = hr.employee_id
 JOIN projects p ON p.id = hr.project_id";

/// Create or overwrite the record for the (employee, project) pair.
/// Callers are expected to have checked that both parents exist.
pub fn upsert_hours(
    conn: &Connection,
    admin: &Admin,
    employee_id: i64,
    project_id: i64,
    hours: f64,
) -> AppResult<HourRecord> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO hour_records (employee_id, project_id, hours_worked, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)
         ON CONFLICT (employee_id, project_id)
         DO UPDATE SET hours_worked = excluded.hours_worked, updated_at = excluded.updated_at",
        params![employee_id, project_id, hours, now],
    )
    .map_err(|e| map_constraint(e, "hour record rejected by a schema constraint"))?;

    let record = conn.query_row(
        "SELECT id, employee_id, project_id, hours_worked, created_at, updated_at
         FROM hour_records WHERE employee_id = ?1 AND project_id = ?2",
        params![employee_id, project_id],
        map_record,
    )?;

    oplog(
        conn,
        "hours_record",
        &format!("record {}", record.id),
        &format!(
            "{:.2} hours {} for employee {} on project {} by {}",
            record.hours_worked,
            if record.is_fresh() { "recorded" } else { "overwritten" },
            employee_id,
            project_id,
            admin.username
        ),
    )?;
    Ok(record)
}

pub fn get_hour_record(conn: &Connection, _admin: &Admin, id: i64) -> AppResult<HourRecord> {
    let found = conn
        .query_row(
            "SELECT id, employee_id, project_id, hours_worked, created_at, updated_at
             FROM hour_records WHERE id = ?1",
            [id],
            map_record,
        )
        .optional()?;
    found.ok_or(AppError::NotFound("hour record", id))
}

/// List hour records joined with both parents, newest booking first.
pub fn list_hour_records(
    conn: &Connection,
    _admin: &Admin,
    filter: &HourFilter,
) -> AppResult<Vec<HourRecordRow>> {
    let mut sql = String::from(JOINED_SELECT);
    let mut preds: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(id) = filter.employee_id {
        preds.push("hr.employee_id = ?");
        args.push(Box::new(id));
    }
    if let Some(id) = filter.project_id {
        preds.push("hr.project_id = ?");
        args.push(Box::new(id));
    }
    if let Some(from) = filter.date_from {
        preds.push("p.date >= ?");
        args.push(Box::new(from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = filter.date_to {
        preds.push("p.date <= ?");
        args.push(Box::new(to.format("%Y-%m-%d").to_string()));
    }

    if !preds.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&preds.join(" AND "));
    }
    sql.push_str(" ORDER BY hr.created_at DESC, hr.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let refs: Vec<&dyn ToSql> = args.iter().map(|a| a.as_ref()).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(refs), map_joined_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Records for one employee whose project date falls inside the given
/// month, ordered by project date for report rendering.
pub fn list_for_report(
    conn: &Connection,
    _admin: &Admin,
    employee_id: i64,
    first: NaiveDate,
    last: NaiveDate,
) -> AppResult<Vec<HourRecordRow>> {
    let sql = format!(
        "{} WHERE hr.employee_id = ?1 AND p.date >= ?2 AND p.date <= ?3
         ORDER BY p.date ASC, hr.id ASC",
        JOINED_SELECT
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            employee_id,
            first.format("%Y-%m-%d").to_string(),
            last.format("%Y-%m-%d").to_string(),
        ],
        map_joined_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_hour_record(conn: &Connection, admin: &Admin, id: i64) -> AppResult<()> {
    let record = get_hour_record(conn, admin, id)?;
    conn.execute("DELETE FROM hour_records WHERE id = ?1", [id])?;

    oplog(
        conn,
        "hours_delete",
        &format!("record {}", id),
        &format!(
            "Record for employee {} on project {} deleted by {}",
            record.employee_id, record.project_id, admin.username
        ),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::{employees, projects};
    use crate::models::employee::NewEmployee;
    use crate::models::project::NewProject;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_pending_migrations(&conn).unwrap();
        conn
    }

    fn test_admin() -> Admin {
        Admin {
            id: 1,
            username: "admin".to_string(),
        }
    }

    fn seed_pair(conn: &Connection, admin: &Admin) -> (i64, i64) {
        let e = employees::create_employee(
            conn,
            admin,
            &NewEmployee {
                first_name: "Anna".to_string(),
                last_name: "Schmidt".to_string(),
                phone_number: "+491511".to_string(),
                role: "Electrician".to_string(),
                hourly_rate: Some(20.0),
            },
        )
        .unwrap();
        let p = projects::create_project(
            conn,
            admin,
            &NewProject {
                name: "Baustelle Mitte".to_string(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            },
        )
        .unwrap();
        (e.id, p.id)
    }

    #[test]
    fn upsert_creates_then_overwrites() {
        let conn = test_conn();
        let admin = test_admin();
        let (eid, pid) = seed_pair(&conn, &admin);

        let first = upsert_hours(&conn, &admin, eid, pid, 5.0).unwrap();
        assert_eq!(first.hours_worked, 5.0);

        let second = upsert_hours(&conn, &admin, eid, pid, 8.0).unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.hours_worked, 8.0);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM hour_records", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn cascade_removes_records_with_employee() {
        let conn = test_conn();
        let admin = test_admin();
        let (eid, pid) = seed_pair(&conn, &admin);
        upsert_hours(&conn, &admin, eid, pid, 5.0).unwrap();

        employees::delete_employee(&conn, &admin, eid).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM hour_records", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn list_filters_on_project_date() {
        let conn = test_conn();
        let admin = test_admin();
        let (eid, pid) = seed_pair(&conn, &admin);
        upsert_hours(&conn, &admin, eid, pid, 5.0).unwrap();

        let nov = list_hour_records(
            &conn,
            &admin,
            &HourFilter {
                date_from: NaiveDate::from_ymd_opt(2025, 11, 1),
                date_to: NaiveDate::from_ymd_opt(2025, 11, 30),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(nov.len(), 1);
        assert_eq!(nov[0].employee_name, "Anna Schmidt");

        let dec = list_hour_records(
            &conn,
            &admin,
            &HourFilter {
                date_from: NaiveDate::from_ymd_opt(2025, 12, 1),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(dec.is_empty());
    }

    #[test]
    fn report_rows_come_back_date_ascending() {
        let conn = test_conn();
        let admin = test_admin();
        let (eid, pid) = seed_pair(&conn, &admin);
        let late = projects::create_project(
            &conn,
            &admin,
            &NewProject {
                name: "Later".to_string(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            },
        )
        .unwrap();
        upsert_hours(&conn, &admin, eid, late.id, 3.0).unwrap();
        upsert_hours(&conn, &admin, eid, pid, 5.0).unwrap();

        let rows = list_for_report(
            &conn,
            &admin,
            eid,
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].project_name, "Baustelle Mitte");
        assert_eq!(rows[1].project_name, "Later");
    }

    #[test]
    fn delete_removes_single_record() {
        let conn = test_conn();
        let admin = test_admin();
        let (eid, pid) = seed_pair(&conn, &admin);
        let rec = upsert_hours(&conn, &admin, eid, pid, 5.0).unwrap();

        delete_hour_record(&conn, &admin, rec.id).unwrap();
        let err = get_hour_record(&conn, &admin, rec.id).unwrap_err();
        assert!(matches!(err, AppError::NotFound("hour record", _)));
    }
}
