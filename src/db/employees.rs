//! Employee store: persistence and queries for the `employees` table.

use crate::auth::Admin;
use crate::db::log::oplog;
use crate::db::map_constraint;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{
    Employee, EmployeeChanges, EmployeeDetail, EmployeeHours, NewEmployee,
};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Optional list filters, combined with AND.
#[derive(Debug, Default, Clone)]
pub struct EmployeeFilter {
    /// Case-insensitive substring match on the role.
    pub role: Option<String>,
    /// Case-insensitive substring match on first name, last name or phone.
    pub search: Option<String>,
}

pub fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone_number: row.get("phone_number")?,
        role: row.get("role")?,
        hourly_rate: row.get("hourly_rate")?,
        created_at: row.get("created_at")?,
    })
}

fn validate_rate(rate: Option<f64>) -> AppResult<()> {
    if let Some(r) = rate
        && (!r.is_finite() || r < 0.0)
    {
        return Err(AppError::InvalidInput(format!(
            "hourly rate must be a finite, non-negative number (got {})",
            r
        )));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub fn create_employee(conn: &Connection, admin: &Admin, new: &NewEmployee) -> AppResult<Employee> {
    validate_required("first name", &new.first_name)?;
    validate_required("last name", &new.last_name)?;
    validate_required("phone number", &new.phone_number)?;
    validate_required("role", &new.role)?;
    validate_rate(new.hourly_rate)?;

    conn.execute(
        "INSERT INTO employees (first_name, last_name, phone_number, role, hourly_rate, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.first_name,
            new.last_name,
            new.phone_number,
            new.role,
            new.hourly_rate,
            Local::now().to_rfc3339(),
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            &format!("phone number already in use: {}", new.phone_number),
        )
    })?;

    let employee = get_employee(conn, admin, conn.last_insert_rowid())?;
    oplog(
        conn,
        "employee_create",
        &format!("employee {}", employee.id),
        &format!(
            "Employee {} ({}) created by {}",
            employee.full_name(),
            employee.role,
            admin.username
        ),
    )?;
    Ok(employee)
}

pub fn get_employee(conn: &Connection, _admin: &Admin, id: i64) -> AppResult<Employee> {
    let found = conn
        .query_row(
            "SELECT id, first_name, last_name, phone_number, role, hourly_rate, created_at
             FROM employees WHERE id = ?1",
            [id],
            map_employee,
        )
        .optional()?;
    found.ok_or(AppError::NotFound("employee", id))
}

/// Employee plus their hour records, most recently booked first.
pub fn get_employee_detail(conn: &Connection, admin: &Admin, id: i64) -> AppResult<EmployeeDetail> {
    let employee = get_employee(conn, admin, id)?;

    let mut stmt = conn.prepare(
        "SELECT hr.id, hr.project_id, p.name, p.date, hr.hours_worked, hr.created_at
         FROM hour_records hr
         JOIN projects p ON p.id = hr.project_id
         WHERE hr.employee_id = ?1
         ORDER BY hr.created_at DESC, hr.id DESC",
    )?;
    let rows = stmt.query_map([id], |row| {
        let date_str: String = row.get(3)?;
        let project_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(date_str.clone())),
            )
        })?;
        Ok(EmployeeHours {
            record_id: row.get(0)?,
            project_id: row.get(1)?,
            project_name: row.get(2)?,
            project_date,
            hours_worked: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;

    let mut records = Vec::new();
    for r in rows {
        records.push(r?);
    }

    Ok(EmployeeDetail { employee, records })
}

/// List employees sorted by last name, then first name.
pub fn list_employees(
    conn: &Connection,
    _admin: &Admin,
    filter: &EmployeeFilter,
) -> AppResult<Vec<Employee>> {
    let mut sql = String::from(
        "SELECT id, first_name, last_name, phone_number, role, hourly_rate, created_at
         FROM employees",
    );
    let mut preds: Vec<&str> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(role) = &filter.role {
        preds.push("role LIKE '%' || ? || '%'");
        args.push(role.clone());
    }
    if let Some(q) = &filter.search {
        preds.push(
            "(first_name LIKE '%' || ? || '%'
              OR last_name LIKE '%' || ? || '%'
              OR phone_number LIKE '%' || ? || '%')",
        );
        args.push(q.clone());
        args.push(q.clone());
        args.push(q.clone());
    }

    if !preds.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&preds.join(" AND "));
    }
    sql.push_str(" ORDER BY last_name ASC, first_name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_employee(
    conn: &Connection,
    admin: &Admin,
    id: i64,
    changes: &EmployeeChanges,
) -> AppResult<Employee> {
    let mut employee = get_employee(conn, admin, id)?;

    if let Some(v) = &changes.first_name {
        validate_required("first name", v)?;
        employee.first_name = v.clone();
    }
    if let Some(v) = &changes.last_name {
        validate_required("last name", v)?;
        employee.last_name = v.clone();
    }
    if let Some(v) = &changes.phone_number {
        validate_required("phone number", v)?;
        employee.phone_number = v.clone();
    }
    if let Some(v) = &changes.role {
        validate_required("role", v)?;
        employee.role = v.clone();
    }
    if let Some(rate) = changes.hourly_rate {
        validate_rate(rate)?;
        employee.hourly_rate = rate;
    }

    conn.execute(
        "UPDATE employees
         SET first_name = ?1, last_name = ?2, phone_number = ?3, role = ?4, hourly_rate = ?5
         WHERE id = ?6",
        params![
            employee.first_name,
            employee.last_name,
            employee.phone_number,
            employee.role,
            employee.hourly_rate,
            id,
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            &format!("phone number already in use: {}", employee.phone_number),
        )
    })?;

    oplog(
        conn,
        "employee_update",
        &format!("employee {}", id),
        &format!(
            "Employee {} updated by {}",
            employee.full_name(),
            admin.username
        ),
    )?;
    Ok(employee)
}

/// Delete an employee; their hour records go with them (FK cascade).
/// Returns the number of hour records that were removed.
pub fn delete_employee(conn: &Connection, admin: &Admin, id: i64) -> AppResult<i64> {
    let employee = get_employee(conn, admin, id)?;

    let dependents: i64 = conn.query_row(
        "SELECT COUNT(*) FROM hour_records WHERE employee_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    conn.execute("DELETE FROM employees WHERE id = ?1", [id])?;

    oplog(
        conn,
        "employee_delete",
        &format!("employee {}", id),
        &format!(
            "Employee {} deleted by {} ({} hour records removed)",
            employee.full_name(),
            admin.username,
            dependents
        ),
    )?;
    Ok(dependents)
}
