use crate::export::{ExportFormat, ExportTarget};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rCleanOps
#[derive(Parser)]
#[command(
    name = "rcleanops",
    version = env!("CARGO_PKG_VERSION"),
    about = "Run a cleaning-services business from the terminal: clients, sites, staff, services, work orders and reports on SQLite",
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

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "check",
            help = "Check the configuration file for missing keys and add their defaults"
        )]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup into a .zip archive
        #[arg(long)]
        compress: bool,

        /// Overwrite an existing destination without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Operator accounts and session
    User {
        #[command(subcommand)]
        action: UserCmd,
    },

    /// Customers
    Client {
        #[command(subcommand)]
        action: ClientCmd,
    },

    /// Serviced sites owned by clients
    Object {
        #[command(subcommand)]
        action: ObjectCmd,
    },

    /// Staff
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Service catalog
    Service {
        #[command(subcommand)]
        action: ServiceCmd,
    },

    /// Work orders
    Schedule {
        #[command(subcommand)]
        action: ScheduleCmd,
    },

    /// Preview the cost a work order would get, and which pricing rule applies
    Cost {
        #[arg(long)]
        object: i64,

        #[arg(long)]
        service: i64,

        /// Explicit cost; ignored when not a non-negative number
        #[arg(long, allow_hyphen_values = true)]
        cost: Option<String>,
    },

    /// Key figures and the next upcoming work orders
    Dashboard,

    /// Aggregate reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },

    /// Export a table as CSV, JSON or XLSX
    Export {
        /// Table to export
        #[arg(long, value_enum)]
        what: ExportTarget,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

// ---------------------------
// Users
// ---------------------------

#[derive(Subcommand)]
pub enum UserCmd {
    /// Create an operator account
    Register {
        #[arg(long)]
        username: String,

        /// At least 6 characters
        #[arg(long)]
        password: String,

        #[arg(long = "name")]
        full_name: String,

        #[arg(long)]
        email: Option<String>,

        /// manager | admin
        #[arg(long)]
        role: Option<String>,
    },

    /// Verify the credentials and open a session
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Close the current session
    Logout,

    /// Show the logged-in operator
    Whoami,

    /// List operator accounts
    List,

    /// Delete an operator account
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

// ---------------------------
// Clients
// ---------------------------

#[derive(Args, Clone, Debug)]
pub struct ClientArgs {
    #[arg(long = "name")]
    pub full_name: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long = "company")]
    pub company_name: Option<String>,

    #[arg(long = "contact")]
    pub contact_person: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ClientCmd {
    /// Add a client
    Add(ClientArgs),

    /// Rewrite a client; omitted optional fields are cleared
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ClientArgs,
    },

    /// Delete a client without objects
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List clients with their object count
    List,

    /// Show one client
    Show { id: i64 },
}

// ---------------------------
// Objects
// ---------------------------

#[derive(Args, Clone, Debug)]
pub struct ObjectArgs {
    /// Owning client id
    #[arg(long)]
    pub client: i64,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub address: String,

    /// Area of the site, > 0
    #[arg(long, allow_hyphen_values = true)]
    pub area: Option<String>,

    /// office | apartment | house | warehouse | retail | industrial | other
    #[arg(long = "type")]
    pub object_type: Option<String>,

    #[arg(long = "access")]
    pub access_info: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ObjectCmd {
    /// Add a serviced site
    Add(ObjectArgs),

    /// Rewrite a site; omitted optional fields are cleared
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ObjectArgs,
    },

    /// Delete a site without work orders
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List sites with their client
    List,

    /// Show one site
    Show { id: i64 },
}

// ---------------------------
// Employees
// ---------------------------

#[derive(Args, Clone, Debug)]
pub struct EmployeeArgs {
    #[arg(long = "name")]
    pub full_name: String,

    #[arg(long)]
    pub position: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Identity document reference
    #[arg(long = "document")]
    pub id_document: Option<String>,

    /// Hire date (YYYY-MM-DD)
    #[arg(long = "hired")]
    pub hire_date: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub salary: Option<String>,

    /// active | inactive
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Add an employee
    Add(EmployeeArgs),

    /// Rewrite an employee; omitted optional fields are cleared
    Edit {
        id: i64,

        #[command(flatten)]
        fields: EmployeeArgs,
    },

    /// Delete an employee; their work orders become unassigned
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List employees
    List {
        #[arg(long, help = "Only active employees")]
        active: bool,
    },

    /// Show one employee
    Show { id: i64 },
}

// ---------------------------
// Services
// ---------------------------

#[derive(Args, Clone, Debug)]
pub struct ServiceArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Price per unit, >= 0
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Billing unit; the configured area unit (default "sq.m") scales the price by object area
    #[arg(long)]
    pub unit: Option<String>,

    /// Default duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ServiceCmd {
    /// Add a catalog service
    Add(ServiceArgs),

    /// Rewrite a service; omitted optional fields are cleared
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ServiceArgs,
    },

    /// Delete a service without work orders
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List the catalog
    List,

    /// Show one service
    Show { id: i64 },
}

// ---------------------------
// Schedules
// ---------------------------

#[derive(Args, Clone, Debug)]
pub struct ScheduleArgs {
    #[arg(long)]
    pub object: i64,

    #[arg(long)]
    pub service: i64,

    #[arg(long)]
    pub employee: Option<i64>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Time of day (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    /// Duration override in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// scheduled | completed | cancelled
    #[arg(long)]
    pub status: Option<String>,

    /// Explicit cost; when missing or not a non-negative number the cost is derived from the catalog
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ScheduleFilterArgs {
    /// scheduled | completed | cancelled
    #[arg(long)]
    pub status: Option<String>,

    /// First date included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum ScheduleCmd {
    /// Add a work order
    Add(ScheduleArgs),

    /// Rewrite a work order (cost derived again unless --cost is given)
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ScheduleArgs,
    },

    /// Delete a work order
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List work orders, newest first
    List {
        #[command(flatten)]
        filter: ScheduleFilterArgs,
    },

    /// Show one work order
    Show { id: i64 },
}

// ---------------------------
// Reports
// ---------------------------

#[derive(Subcommand)]
pub enum ReportKind {
    /// Orders and revenue per client
    Clients,
    /// Orders, revenue and last service per site
    Objects,
    /// Workload and revenue per employee
    Employees,
    /// Orders and revenue per service
    Services,
    /// Filtered work orders with totals
    Schedules {
        #[command(flatten)]
        filter: ScheduleFilterArgs,
    },
}
