use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for timecard:
/// a multi-tenant timeclock over SQLite.
#[derive(Parser)]
#[command(
    name = "timecard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Multi-tenant timeclock: clock in/out against projects and locations, run payroll reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for problems")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
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

    /// Manage organizations
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage work locations
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// Clock in: open a new time entry
    In {
        #[arg(long, help = "User id (defaults to default_user from config)")]
        user: Option<String>,

        #[arg(long, help = "Organization id (defaults to default_organization)")]
        org: Option<i64>,

        #[arg(long, help = "Project worked on")]
        project: Option<i64>,

        #[arg(long, help = "Work location")]
        location: Option<i64>,
    },

    /// Clock out: close an open time entry
    Out {
        /// Id of the entry to close
        entry: i64,
    },

    /// Show the most recent time entry for a user
    Status {
        #[arg(long, help = "User id (defaults to default_user from config)")]
        user: Option<String>,
    },

    /// Inspect and correct time entries
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Payroll and project reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export time entries or payroll data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file path (absolute)")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or A:B spans)"
        )]
        range: Option<String>,

        #[arg(long, help = "Export the payroll report instead of raw entries")]
        payroll: bool,

        #[arg(long, help = "Organization filter (required with --payroll)")]
        org: Option<i64>,

        #[arg(long, short = 'f', help = "Overwrite output file without confirmation")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a .zip")]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum OrgAction {
    /// Create a new organization
    Add {
        name: String,
    },
    /// List organizations
    List,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a new user in an organization
    Add {
        #[arg(long)]
        email: String,

        #[arg(long, help = "Organization id (defaults to default_organization)")]
        org: Option<i64>,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long = "job-title")]
        job_title: Option<String>,

        #[arg(long = "pay-rate", help = "Hourly pay rate")]
        pay_rate: Option<f64>,

        #[arg(long, help = "Mark the user as an organization manager")]
        manager: bool,
    },
    /// List users of an organization
    List {
        #[arg(long)]
        org: Option<i64>,
    },
    /// Update a user's hourly pay rate
    SetRate {
        /// User id
        id: String,
        /// New hourly rate
        rate: f64,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project in an organization
    Add {
        name: String,

        #[arg(long)]
        org: Option<i64>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List projects of an organization
    List {
        #[arg(long)]
        org: Option<i64>,
    },
    /// Delete a project by id
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum LocationAction {
    /// Create a work location in an organization
    Add {
        name: String,

        #[arg(long)]
        org: Option<i64>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List work locations of an organization
    List {
        #[arg(long)]
        org: Option<i64>,
    },
    /// Delete a location by id
    Del {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Show a single entry by id
    Get {
        id: i64,
    },
    /// List entries for a user
    List {
        #[arg(long, help = "User id (defaults to default_user from config)")]
        user: Option<String>,

        #[arg(
            long,
            help = "Scope to an organization (with --from/--to, includes open entries)"
        )]
        org: Option<i64>,

        #[arg(long, value_name = "DATE", help = "Start date (YYYY-MM-DD), inclusive")]
        from: Option<String>,

        #[arg(long, value_name = "DATE", help = "End date (YYYY-MM-DD), inclusive")]
        to: Option<String>,
    },
    /// Correct an entry's timestamps, project or location
    Update {
        id: i64,

        #[arg(long = "in", value_name = "TS", help = "New clock-in (RFC 3339 or 'YYYY-MM-DD HH:MM', UTC)")]
        clock_in: Option<String>,

        #[arg(long = "out", value_name = "TS", help = "New clock-out (RFC 3339 or 'YYYY-MM-DD HH:MM', UTC)")]
        clock_out: Option<String>,

        #[arg(long)]
        project: Option<i64>,

        #[arg(long)]
        location: Option<i64>,
    },
    /// Delete an entry permanently
    Del {
        id: i64,

        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Hours and pay per user across an organization
    Payroll {
        #[arg(long)]
        org: Option<i64>,

        #[arg(long, value_name = "DATE", help = "Start date (YYYY-MM-DD), inclusive")]
        from: String,

        #[arg(long, value_name = "DATE", help = "End date (YYYY-MM-DD), inclusive")]
        to: String,
    },
    /// Hours and pay per user for one project
    Project {
        /// Project id
        project: i64,

        #[arg(long)]
        org: Option<i64>,

        #[arg(long, value_name = "DATE")]
        from: String,

        #[arg(long, value_name = "DATE")]
        to: String,
    },
}
