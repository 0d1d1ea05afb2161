use crate::cli::commands::{ask_confirmation, open_authenticated};
use crate::cli::parser::{Cli, Commands, ProjectCommand};
use crate::config::Config;
use crate::db::projects;
use crate::db::projects::ProjectFilter;
use crate::errors::{AppError, AppResult};
use crate::models::project::{NewProject, ProjectChanges};
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::formatting::format_hours;
use crate::utils::table::Table;
use chrono::NaiveDate;

/// Lenient date filter parsing: an unreadable filter is dropped with a
/// warning instead of aborting the listing.
fn parse_date_filter(label: &str, value: &Option<String>) -> Option<NaiveDate> {
    let raw = value.as_deref()?;
    match parse_date(raw) {
        Some(d) => Some(d),
        None => {
            warning(format!(
                "Ignoring invalid {} filter '{}' (expected YYYY-MM-DD).",
                label, raw
            ));
            None
        }
    }
}

fn month_filter(month: &Option<u32>) -> Option<u32> {
    match month {
        Some(m) if (1..=12).contains(m) => Some(*m),
        Some(m) => {
            warning(format!("Ignoring invalid month filter '{}'.", m));
            None
        }
        None => None,
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Project(sub) = &cli.command else {
        return Ok(());
    };

    let (pool, admin) = open_authenticated(cli, cfg)?;
    let conn = &pool.conn;

    match sub {
        //
        // ADD
        //
        ProjectCommand::Add {
            name,
            date,
            description,
        } => {
            let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let new = NewProject {
                name: name.clone(),
                description: description.clone(),
                date: d,
            };
            let project = projects::create_project(conn, &admin, &new)?;
            success(format!(
                "Project #{} '{}' added for {}.",
                project.id, project.name, project.date
            ));
        }

        //
        // LIST
        //
        ProjectCommand::List {
            date,
            month,
            year,
            search,
        } => {
            let filter = ProjectFilter {
                date: parse_date_filter("date", date),
                month: month_filter(month),
                year: *year,
                search: search.clone(),
            };
            let list = projects::list_projects(conn, &admin, &filter)?;

            if list.is_empty() {
                info("No projects found.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "Name", "Date", "Employees", "Description"]);
            for s in &list {
                table.add_row(vec![
                    s.project.id.to_string(),
                    s.project.name.clone(),
                    s.project.date.to_string(),
                    s.employee_count.to_string(),
                    s.project.description.clone(),
                ]);
            }
            print!("{}", table.render());
            println!("{} project(s)", list.len());
        }

        //
        // SHOW
        //
        ProjectCommand::Show { id } => {
            let detail = projects::get_project_detail(conn, &admin, *id)?;
            let p = &detail.project;

            println!("📋 Project #{}", p.id);
            println!("   Name        : {}", p.name);
            println!("   Date        : {}", p.date);
            println!("   Description : {}", p.description);
            println!("   Created     : {}", p.created_at);

            if detail.crew.is_empty() {
                info("No hours recorded on this project yet.");
                return Ok(());
            }

            println!();
            let mut table = Table::new(["Record", "Employee", "Phone", "Hours"]);
            let mut total = 0.0;
            for r in &detail.crew {
                total += r.hours_worked;
                table.add_row(vec![
                    r.record_id.to_string(),
                    format!("#{} {}", r.employee_id, r.employee_name),
                    r.phone_number.clone(),
                    format_hours(r.hours_worked),
                ]);
            }
            print!("{}", table.render());
            println!(
                "{} employee(s), {} hours total",
                detail.crew.len(),
                format_hours(total)
            );
        }

        //
        // UPDATE
        //
        ProjectCommand::Update {
            id,
            name,
            description,
            date,
        } => {
            let parsed_date = match date {
                Some(raw) => {
                    Some(parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?)
                }
                None => None,
            };

            let changes = ProjectChanges {
                name: name.clone(),
                description: description.clone(),
                date: parsed_date,
            };

            if changes.name.is_none() && changes.description.is_none() && changes.date.is_none() {
                warning("Nothing to update: no fields were given.");
                return Ok(());
            }

            let project = projects::update_project(conn, &admin, *id, &changes)?;
            success(format!(
                "Project #{} '{}' updated ({}).",
                project.id, project.name, project.date
            ));
        }

        //
        // DEL
        //
        ProjectCommand::Del { id, yes } => {
            let project = projects::get_project(conn, &admin, *id)?;

            let prompt = format!(
                "Delete project #{} '{}' and all hours recorded on it? This action is irreversible.",
                project.id, project.name
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let dropped = projects::delete_project(conn, &admin, *id)?;
            success(format!(
                "Project #{} deleted along with {} hour record(s).",
                id, dropped
            ));
        }
    }

    Ok(())
}
