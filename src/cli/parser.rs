use crate::core::backup::ArchiveFormat;
use crate::export::ExportFormat;
use crate::models::IndicatorUnit;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for MetaHub
/// Goal tracking from the terminal: indicators, planned actions and sub-tasks on SQLite
#[derive(Parser)]
#[command(
    name = "metahub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track goals as indicators and plan the actions that move them, using SQLite",
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

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

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

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create, edit, delete or list indicators
    Indicator {
        #[command(subcommand)]
        command: IndicatorCommand,
    },

    /// Manage the actions planned for an indicator
    Action {
        #[command(subcommand)]
        command: ActionCommand,
    },

    /// Manage the checklist of an action
    Subtask {
        #[command(subcommand)]
        command: SubTaskCommand,
    },

    /// Show the board: values, warnings and pending actions by deadline
    Show {
        /// Only this indicator
        id: Option<i64>,

        #[arg(long = "today", value_name = "DATE", help = "Reference date (YYYY-MM-DD)")]
        today: Option<String>,

        #[arg(long = "completed", help = "Also list completed actions")]
        completed: bool,
    },

    /// Show or update the user profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, help = "Phone number (empty string clears it)")]
        phone: Option<String>,
    },

    /// Turn WhatsApp notifications on or off (basic plan)
    Notifications {
        #[arg(value_enum)]
        state: Switch,
    },

    /// Show the current plan and its limits
    Plan {
        #[arg(long = "upgrade", help = "Print the checkout link for the basic plan")]
        upgrade: bool,
    },

    /// Apply a payment-provider webhook event
    Webhook {
        #[arg(long, value_name = "FILE", help = "JSON event body")]
        payload: String,

        #[arg(long, value_name = "HEADER", help = "Signature header (t=…,v1=…)")]
        signature: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_enum,
            num_args = 0..=1,
            default_missing_value = "zip",
            help = "Compress the copy (zip or tar-gz)"
        )]
        compress: Option<ArchiveFormat>,
    },

    /// Export indicators and actions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum IndicatorCommand {
    /// Create an indicator
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, value_enum, default_value = "number")]
        unit: IndicatorUnit,

        #[arg(long, allow_hyphen_values = true, help = "Starting value")]
        initial: f64,

        #[arg(long, allow_hyphen_values = true, help = "Goal value")]
        target: f64,

        #[arg(long)]
        description: Option<String>,
    },

    /// Edit an indicator
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, help = "Description (empty string clears it)")]
        description: Option<String>,

        #[arg(long, value_enum)]
        unit: Option<IndicatorUnit>,

        #[arg(long, allow_hyphen_values = true)]
        target: Option<f64>,

        #[arg(
            long,
            allow_hyphen_values = true,
            conflicts_with = "initial",
            help = "Set the current value; the starting value is derived from it"
        )]
        current: Option<f64>,

        #[arg(long, allow_hyphen_values = true, help = "Set the starting value")]
        initial: Option<f64>,
    },

    /// Delete an indicator with all its actions
    Del { id: i64 },

    /// List indicators
    List,
}

#[derive(Subcommand)]
pub enum ActionCommand {
    /// Add an action to an indicator
    Add {
        indicator: i64,

        #[arg(long)]
        title: String,

        #[arg(long)]
        responsible: String,

        #[arg(long, allow_hyphen_values = true, help = "Amount added once completed")]
        contribution: f64,

        #[arg(long, value_name = "DATE", help = "Deadline (YYYY-MM-DD)")]
        deadline: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Edit an action
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        responsible: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        contribution: Option<f64>,

        #[arg(long, value_name = "DATE", conflicts_with = "clear_deadline")]
        deadline: Option<String>,

        #[arg(long = "clear-deadline")]
        clear_deadline: bool,

        #[arg(long, help = "Description (empty string clears it)")]
        description: Option<String>,
    },

    /// Mark an action completed, or pending again
    Toggle { id: i64 },

    /// Delete an action with its sub-tasks
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum SubTaskCommand {
    /// Add a sub-task to an action
    Add {
        action: i64,

        #[arg(long)]
        title: String,

        #[arg(long)]
        responsible: String,

        #[arg(long, value_name = "DATE")]
        deadline: Option<String>,
    },

    /// Edit a sub-task
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        responsible: Option<String>,

        #[arg(long, value_name = "DATE", conflicts_with = "clear_deadline")]
        deadline: Option<String>,

        #[arg(long = "clear-deadline")]
        clear_deadline: bool,
    },

    /// Mark a sub-task done, or open again
    Toggle { id: i64 },

    /// Delete a sub-task
    Del { id: i64 },
}
