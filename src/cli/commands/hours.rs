use crate::cli::commands::{ask_confirmation, open_authenticated};
use crate::cli::parser::{Cli, Commands, HoursCommand};
use crate::config::Config;
use crate::core::record_hours::RecordHoursLogic;
use crate::db::hours;
use crate::db::hours::HourFilter;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::formatting::format_hours;
use crate::utils::table::Table;
use chrono::NaiveDate;

fn parse_bound(label: &str, value: &Option<String>) -> Option<NaiveDate> {
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

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Hours(sub) = &cli.command else {
        return Ok(());
    };

    let (pool, admin) = open_authenticated(cli, cfg)?;
    let conn = &pool.conn;

    match sub {
        //
        // RECORD
        //
        HoursCommand::Record {
            employee,
            project,
            hours,
        } => {
            let record = RecordHoursLogic::apply(conn, &admin, *employee, *project, *hours)?;
            let verb = if record.is_fresh() {
                "recorded"
            } else {
                "overwritten"
            };
            success(format!(
                "{} hours {} for employee #{} on project #{} (record #{}).",
                format_hours(record.hours_worked),
                verb,
                record.employee_id,
                record.project_id,
                record.id
            ));
        }

        //
        // LIST
        //
        HoursCommand::List {
            employee,
            project,
            from,
            to,
        } => {
            let filter = HourFilter {
                employee_id: *employee,
                project_id: *project,
                date_from: parse_bound("from", from),
                date_to: parse_bound("to", to),
            };
            let list = hours::list_hour_records(conn, &admin, &filter)?;

            if list.is_empty() {
                info("No hour records found.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "Employee", "Project", "Date", "Hours"]);
            let mut total = 0.0;
            for r in &list {
                total += r.hours_worked;
                table.add_row(vec![
                    r.id.to_string(),
                    format!("#{} {}", r.employee_id, r.employee_name),
                    format!("#{} {}", r.project_id, r.project_name),
                    r.project_date.to_string(),
                    format_hours(r.hours_worked),
                ]);
            }
            print!("{}", table.render());
            println!(
                "{} record(s), {} hours total",
                list.len(),
                format_hours(total)
            );
        }

        //
        // DEL
        //
        HoursCommand::Del { id, yes } => {
            let record = hours::get_hour_record(conn, &admin, *id)?;

            let prompt = format!(
                "Delete hour record #{} ({} hours, employee #{}, project #{})? This action is irreversible.",
                record.id,
                format_hours(record.hours_worked),
                record.employee_id,
                record.project_id
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            hours::delete_hour_record(conn, &admin, *id)?;
            success(format!("Hour record #{} deleted.", id));
        }
    }

    Ok(())
}
