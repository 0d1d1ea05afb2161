use crate::cli::commands::open_authenticated;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::report_pdf;
use crate::ui::messages::{info, success};
use crate::utils::path::resolve_output_path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        employee,
        month,
        year,
        out,
        force,
    } = &cli.command
    {
        let (pool, admin) = open_authenticated(cli, cfg)?;

        let report = ReportLogic::generate(&pool.conn, &admin, cfg, *employee, *month, *year)?;

        let file = match out {
            Some(f) => f.clone(),
            None => ReportLogic::default_file_name(*employee, report.month, report.year),
        };
        let path = resolve_output_path(&file)?;
        ensure_writable(&path, *force)?;

        report_pdf::write_report(&report, &path)?;

        if report.empty_notice.is_some() {
            info(format!(
                "No hours recorded in {}; wrote an empty report.",
                report.period
            ));
        }
        success(format!(
            "Report for {} ({}) written to {}",
            report.employee_name,
            report.period,
            path.display()
        ));
    }

    Ok(())
}
