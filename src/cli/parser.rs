use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for hourbook
/// Administrative backend to track employees, projects and logged hours
#[derive(Parser)]
#[command(
    name = "hourbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Administrative backend CLI: track employees, projects and per-project working hours using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Admin token (falls back to the HOURBOOK_ADMIN_TOKEN environment variable)
    #[arg(global = true, long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, the database and the first admin
    Init {
        /// Username for the initial admin account
        #[arg(long = "admin-user", value_name = "NAME", default_value = "admin")]
        admin_user: String,

        /// Token for the initial admin (generated and printed once when omitted)
        #[arg(long = "admin-token", value_name = "TOKEN")]
        admin_token: Option<String>,
    },

    /// Manage employees
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Record and inspect logged hours
    #[command(subcommand)]
    Hours(HoursCommand),

    /// Show aggregate statistics, optionally narrowed to a period
    Stats {
        /// Only count projects and hours in this month (1-12)
        #[arg(long)]
        month: Option<u32>,

        /// Only count projects and hours in this year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Render a monthly PDF timesheet for one employee
    Report {
        /// Employee id
        #[arg(long, value_name = "ID")]
        employee: i64,

        /// Reporting month (1-12)
        #[arg(long)]
        month: u32,

        /// Reporting year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Output file (defaults to employee_<id>_report_<year>_<month>.pdf in the cwd)
        #[arg(long, value_name = "FILE")]
        out: Option<String>,

        /// Overwrite the output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export logged hours in various formats
    Export {
        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Filter export by year/month/day or a custom range.
        ///
        /// Supported formats:
        /// - YYYY                   → entire year (e.g. "2025")
        /// - YYYY-MM                → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD             → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format:
        /// - YYYY:YYYY              → year range
        /// - YYYY-MM:YYYY-MM        → month range
        /// - YYYY-MM-DD:YYYY-MM-DD  → day range
        ///
        /// Special value:
        /// - all                    → export the entire archive
        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup into a zip archive
        #[arg(long)]
        compress: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Add an employee
    Add {
        /// First name
        first_name: String,

        /// Last name
        last_name: String,

        /// Phone number (must be unique)
        #[arg(long, value_name = "PHONE")]
        phone: String,

        /// Role, e.g. "Electrician"
        #[arg(long, value_name = "ROLE")]
        role: String,

        /// Hourly rate in EUR (leave out for unrated employees)
        #[arg(long, value_name = "RATE")]
        rate: Option<f64>,
    },

    /// List employees
    List {
        /// Filter by role (substring, case-insensitive)
        #[arg(long)]
        role: Option<String>,

        /// Search in names and phone numbers (substring, case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one employee with all their hour records
    Show {
        /// Employee id
        id: i64,
    },

    /// Update employee fields
    Update {
        /// Employee id
        id: i64,

        #[arg(long = "first-name", value_name = "NAME")]
        first_name: Option<String>,

        #[arg(long = "last-name", value_name = "NAME")]
        last_name: Option<String>,

        #[arg(long, value_name = "PHONE")]
        phone: Option<String>,

        #[arg(long, value_name = "ROLE")]
        role: Option<String>,

        /// New hourly rate in EUR
        #[arg(long, value_name = "RATE", conflicts_with = "clear_rate")]
        rate: Option<f64>,

        /// Remove the hourly rate entirely
        #[arg(long = "clear-rate")]
        clear_rate: bool,
    },

    /// Delete an employee and all their hour records
    Del {
        /// Employee id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Add a project
    Add {
        /// Project name
        name: String,

        /// Project date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: String,

        /// Free-form description
        #[arg(long, value_name = "TEXT", default_value = "")]
        description: String,
    },

    /// List projects with the number of employees booked on each
    List {
        /// Only projects on this exact date (YYYY-MM-DD); overrides --month/--year
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Only projects in this month (1-12)
        #[arg(long)]
        month: Option<u32>,

        /// Only projects in this year
        #[arg(long)]
        year: Option<i32>,

        /// Search in name and description (substring, case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one project with every employee booked on it
    Show {
        /// Project id
        id: i64,
    },

    /// Update project fields
    Update {
        /// Project id
        id: i64,

        #[arg(long, value_name = "NAME")]
        name: Option<String>,

        #[arg(long, value_name = "TEXT")]
        description: Option<String>,

        /// New project date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },

    /// Delete a project and all hours recorded on it
    Del {
        /// Project id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HoursCommand {
    /// Record hours for an employee on a project (overwrites a previous booking)
    Record {
        /// Employee id
        #[arg(long, value_name = "ID")]
        employee: i64,

        /// Project id
        #[arg(long, value_name = "ID")]
        project: i64,

        /// Worked hours (defaults to 0)
        #[arg(long)]
        hours: Option<f64>,
    },

    /// List hour records
    List {
        /// Filter by employee id
        #[arg(long, value_name = "ID")]
        employee: Option<i64>,

        /// Filter by project id
        #[arg(long, value_name = "ID")]
        project: Option<i64>,

        /// Only records whose project date is on or after this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<String>,

        /// Only records whose project date is on or before this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: Option<String>,
    },

    /// Delete a single hour record
    Del {
        /// Record id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
