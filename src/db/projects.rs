//! Project store: persistence and queries for the `projects` table.

use crate::auth::Admin;
use crate::db::log::oplog;
use crate::errors::{AppError, AppResult};
use crate::models::project::{
    NewProject, Project, ProjectChanges, ProjectDetail, ProjectHours, ProjectSummary,
};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

/// Optional list filters, combined with AND.
///
/// An exact date takes precedence: when `date` is set, `month` and `year`
/// are ignored.
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    pub date: Option<NaiveDate>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
}

pub fn map_project(row: &Row) -> Result<Project> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        date,
        created_at: row.get("created_at")?,
    })
}

pub fn create_project(conn: &Connection, admin: &Admin, new: &NewProject) -> AppResult<Project> {
    if new.name.trim().is_empty() {
        return Err(AppError::InvalidInput("project name must not be empty".to_string()));
    }

    conn.execute(
        "INSERT INTO projects (name, description, date, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            new.name,
            new.description,
            new.date.format("%Y-%m-%d").to_string(),
            Local::now().to_rfc3339(),
        ],
    )?;

    let project = get_project(conn, admin, conn.last_insert_rowid())?;
    oplog(
        conn,
        "project_create",
        &format!("project {}", project.id),
        &format!(
            "Project '{}' ({}) created by {}",
            project.name,
            project.date_str(),
            admin.username
        ),
    )?;
    Ok(project)
}

pub fn get_project(conn: &Connection, _admin: &Admin, id: i64) -> AppResult<Project> {
    let found = conn
        .query_row(
            "SELECT id, name, description, date, created_at FROM projects WHERE id = ?1",
            [id],
            map_project,
        )
        .optional()?;
    found.ok_or(AppError::NotFound("project", id))
}

/// Project plus the employees booked on it, most recently booked first.
pub fn get_project_detail(conn: &Connection, admin: &Admin, id: i64) -> AppResult<ProjectDetail> {
    let project = get_project(conn, admin, id)?;

    let mut stmt = conn.prepare(
        "SELECT hr.id, hr.employee_id, e.first_name || ' ' || e.last_name,
                e.phone_number, hr.hours_worked, hr.created_at
         FROM hour_records hr
         JOIN employees e ON e.id = hr.employee_id
         WHERE hr.project_id = ?1
         ORDER BY hr.created_at DESC, hr.id DESC",
    )?;
    let rows = stmt.query_map([id], |row| {
        Ok(ProjectHours {
            record_id: row.get(0)?,
            employee_id: row.get(1)?,
            employee_name: row.get(2)?,
            phone_number: row.get(3)?,
            hours_worked: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;

    let mut crew = Vec::new();
    for r in rows {
        crew.push(r?);
    }

    Ok(ProjectDetail { project, crew })
}

/// List projects, newest first, each with its booked-employee count.
pub fn list_projects(
    conn: &Connection,
    _admin: &Admin,
    filter: &ProjectFilter,
) -> AppResult<Vec<ProjectSummary>> {
    let mut sql = String::from(
        "SELECT p.id, p.name, p.description, p.date, p.created_at,
                (SELECT COUNT(*) FROM hour_records hr WHERE hr.project_id = p.id) AS employee_count
         FROM projects p",
    );
    let mut preds: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(date) = filter.date {
        preds.push("p.date = ?");
        args.push(Box::new(date.format("%Y-%m-%d").to_string()));
    } else {
        if let Some(month) = filter.month {
            preds.push("CAST(strftime('%m', p.date) AS INTEGER) = ?");
            args.push(Box::new(month as i64));
        }
        if let Some(year) = filter.year {
            preds.push("CAST(strftime('%Y', p.date) AS INTEGER) = ?");
            args.push(Box::new(year as i64));
        }
    }
    if let Some(q) = &filter.search {
        preds.push("(p.name LIKE '%' || ? || '%' OR p.description LIKE '%' || ? || '%')");
        args.push(Box::new(q.clone()));
        args.push(Box::new(q.clone()));
    }

    if !preds.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&preds.join(" AND "));
    }
    sql.push_str(" ORDER BY p.date DESC, p.created_at DESC");

    let mut stmt = conn.prepare(&sql)?;
    let refs: Vec<&dyn ToSql> = args.iter().map(|a| a.as_ref()).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(refs), |row| {
        Ok(ProjectSummary {
            project: map_project(row)?,
            employee_count: row.get("employee_count")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_project(
    conn: &Connection,
    admin: &Admin,
    id: i64,
    changes: &ProjectChanges,
) -> AppResult<Project> {
    let mut project = get_project(conn, admin, id)?;

    if let Some(v) = &changes.name {
        if v.trim().is_empty() {
            return Err(AppError::InvalidInput("project name must not be empty".to_string()));
        }
        project.name = v.clone();
    }
    if let Some(v) = &changes.description {
        project.description = v.clone();
    }
    if let Some(d) = changes.date {
        project.date = d;
    }

    conn.execute(
        "UPDATE projects SET name = ?1, description = ?2, date = ?3 WHERE id = ?4",
        params![project.name, project.description, project.date_str(), id],
    )?;

    oplog(
        conn,
        "project_update",
        &format!("project {}", id),
        &format!("Project '{}' updated by {}", project.name, admin.username),
    )?;
    Ok(project)
}

/// Delete a project; hour records booked on it go too (FK cascade).
/// Returns the number of hour records that were removed.
pub fn delete_project(conn: &Connection, admin: &Admin, id: i64) -> AppResult<i64> {
    let project = get_project(conn, admin, id)?;

    let dependents: i64 = conn.query_row(
        "SELECT COUNT(*) FROM hour_records WHERE project_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;

    oplog(
        conn,
        "project_delete",
        &format!("project {}", id),
        &format!(
            "Project '{}' deleted by {} ({} hour records removed)",
            project.name, admin.username, dependents
        ),
    )?;
    Ok(dependents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

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

    fn seed(conn: &Connection, admin: &Admin, name: &str, date: &str) -> Project {
        create_project(
            conn,
            admin,
            &NewProject {
                name: name.to_string(),
                description: String::new(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            },
        )
        .unwrap()
    }

    #[test]
    fn listing_is_newest_first() {
        let conn = test_conn();
        let admin = test_admin();
        seed(&conn, &admin, "Old", "2024-03-01");
        seed(&conn, &admin, "New", "2025-11-02");

        let all = list_projects(&conn, &admin, &ProjectFilter::default()).unwrap();
        assert_eq!(all[0].project.name, "New");
        assert_eq!(all[1].project.name, "Old");
    }

    #[test]
    fn month_and_year_filters_combine() {
        let conn = test_conn();
        let admin = test_admin();
        seed(&conn, &admin, "A", "2025-11-02");
        seed(&conn, &admin, "B", "2025-03-02");
        seed(&conn, &admin, "C", "2024-11-15");

        let nov_2025 = list_projects(
            &conn,
            &admin,
            &ProjectFilter {
                month: Some(11),
                year: Some(2025),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(nov_2025.len(), 1);
        assert_eq!(nov_2025[0].project.name, "A");

        let all_november = list_projects(
            &conn,
            &admin,
            &ProjectFilter {
                month: Some(11),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(all_november.len(), 2);
    }

    #[test]
    fn exact_date_wins_over_month_and_year() {
        let conn = test_conn();
        let admin = test_admin();
        seed(&conn, &admin, "A", "2025-11-02");
        seed(&conn, &admin, "B", "2025-03-02");

        let hits = list_projects(
            &conn,
            &admin,
            &ProjectFilter {
                date: NaiveDate::from_ymd_opt(2025, 3, 2),
                month: Some(11),
                year: Some(2025),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].project.name, "B");
    }

    #[test]
    fn search_covers_name_and_description() {
        let conn = test_conn();
        let admin = test_admin();
        create_project(
            &conn,
            &admin,
            &NewProject {
                name: "Baustelle Mitte".to_string(),
                description: "Drywall and wiring".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            },
        )
        .unwrap();

        for term in ["baustelle", "WIRING"] {
            let hits = list_projects(
                &conn,
                &admin,
                &ProjectFilter {
                    search: Some(term.to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
            assert_eq!(hits.len(), 1, "term {}", term);
        }
    }

    #[test]
    fn missing_project_is_not_found() {
        let conn = test_conn();
        let admin = test_admin();
        let err = get_project(&conn, &admin, 42).unwrap_err();
        assert!(matches!(err, AppError::NotFound("project", 42)));
    }
}
