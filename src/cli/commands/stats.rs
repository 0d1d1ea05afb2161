use crate::cli::commands::open_authenticated;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::month_name;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { month, year } = &cli.command {
        let (pool, admin) = open_authenticated(cli, cfg)?;

        let month = match month {
            Some(m) if !(1..=12).contains(m) => {
                warning(format!("Ignoring invalid month filter '{}'.", m));
                None
            }
            other => *other,
        };

        let s = stats::statistics(&pool.conn, &admin, month, *year)?;

        let period = match (s.month, s.year) {
            (Some(m), Some(y)) => format!("{} {}", month_name(m), y),
            (Some(m), None) => format!("{} of every year", month_name(m)),
            (None, Some(y)) => format!("year {}", y),
            (None, None) => "full archive".to_string(),
        };

        println!();
        println!("📊 Statistics ({}):", period);
        println!(
            "{}• Employees:{} {}{}{}",
            CYAN, RESET, GREEN, s.total_employees, RESET
        );
        println!(
            "{}• Projects:{} {}{}{}",
            CYAN, RESET, GREEN, s.total_projects, RESET
        );
        println!("{}• Total hours:{} {:.2}", CYAN, RESET, s.total_hours);
        println!();
    }

    Ok(())
}
