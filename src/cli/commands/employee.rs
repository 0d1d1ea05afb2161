use crate::cli::commands::{ask_confirmation, open_authenticated};
use crate::cli::parser::{Cli, Commands, EmployeeCommand};
use crate::config::Config;
use crate::db::employees;
use crate::db::employees::EmployeeFilter;
use crate::errors::AppResult;
use crate::models::employee::{EmployeeChanges, NewEmployee};
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::{format_hours, format_rate};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Employee(sub) = &cli.command else {
        return Ok(());
    };

    let (pool, admin) = open_authenticated(cli, cfg)?;
    let conn = &pool.conn;

    match sub {
        //
        // ADD
        //
        EmployeeCommand::Add {
            first_name,
            last_name,
            phone,
            role,
            rate,
        } => {
            let new = NewEmployee {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone_number: phone.clone(),
                role: role.clone(),
                hourly_rate: *rate,
            };
            let employee = employees::create_employee(conn, &admin, &new)?;
            success(format!(
                "Employee #{} {} added ({}, rate {}).",
                employee.id,
                employee.full_name(),
                employee.role,
                format_rate(employee.hourly_rate)
            ));
        }

        //
        // LIST
        //
        EmployeeCommand::List { role, search } => {
            let filter = EmployeeFilter {
                role: role.clone(),
                search: search.clone(),
            };
            let list = employees::list_employees(conn, &admin, &filter)?;

            if list.is_empty() {
                info("No employees found.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "Name", "Phone", "Role", "Rate"]);
            for e in &list {
                table.add_row(vec![
                    e.id.to_string(),
                    e.full_name(),
                    e.phone_number.clone(),
                    e.role.clone(),
                    format_rate(e.hourly_rate),
                ]);
            }
            print!("{}", table.render());
            println!("{} employee(s)", list.len());
        }

        //
        // SHOW
        //
        EmployeeCommand::Show { id } => {
            let detail = employees::get_employee_detail(conn, &admin, *id)?;
            let e = &detail.employee;

            println!("👤 Employee #{}", e.id);
            println!("   Name  : {}", e.full_name());
            println!("   Phone : {}", e.phone_number);
            println!("   Role  : {}", e.role);
            println!("   Rate  : {}", format_rate(e.hourly_rate));
            println!("   Since : {}", e.created_at);

            if detail.records.is_empty() {
                info("No hours recorded yet.");
                return Ok(());
            }

            println!();
            let mut table = Table::new(["Record", "Project", "Date", "Hours"]);
            let mut total = 0.0;
            for r in &detail.records {
                total += r.hours_worked;
                table.add_row(vec![
                    r.record_id.to_string(),
                    format!("#{} {}", r.project_id, r.project_name),
                    r.project_date.to_string(),
                    format_hours(r.hours_worked),
                ]);
            }
            print!("{}", table.render());
            println!(
                "{} record(s), {} hours total",
                detail.records.len(),
                format_hours(total)
            );
        }

        //
        // UPDATE
        //
        EmployeeCommand::Update {
            id,
            first_name,
            last_name,
            phone,
            role,
            rate,
            clear_rate,
        } => {
            let changes = EmployeeChanges {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone_number: phone.clone(),
                role: role.clone(),
                hourly_rate: if *clear_rate {
                    Some(None)
                } else {
                    rate.map(Some)
                },
            };

            if changes.first_name.is_none()
                && changes.last_name.is_none()
                && changes.phone_number.is_none()
                && changes.role.is_none()
                && changes.hourly_rate.is_none()
            {
                warning("Nothing to update: no fields were given.");
                return Ok(());
            }

            let employee = employees::update_employee(conn, &admin, *id, &changes)?;
            success(format!(
                "Employee #{} {} updated (rate {}).",
                employee.id,
                employee.full_name(),
                format_rate(employee.hourly_rate)
            ));
        }

        //
        // DEL
        //
        EmployeeCommand::Del { id, yes } => {
            let employee = employees::get_employee(conn, &admin, *id)?;

            let prompt = format!(
                "Delete employee #{} {} and all their hour records? This action is irreversible.",
                employee.id,
                employee.full_name()
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let dropped = employees::delete_employee(conn, &admin, *id)?;
            success(format!(
                "Employee #{} deleted along with {} hour record(s).",
                id, dropped
            ));
        }
    }

    Ok(())
}
