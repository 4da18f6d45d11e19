use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rattendance.
/// Each subcommand is one chat command issued by `--user` in workspace `--chat`.
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance, break monitoring and payroll for chat workspaces, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend the current time is this wall-clock value (YYYY-MM-DD HH:MM[:SS])
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    /// Id of the user issuing the command
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Id of the workspace (chat group) the command is issued in
    #[arg(global = true, long = "chat", allow_negative_numbers = true)]
    pub chat: Option<i64>,

    /// Override the owner identity for this invocation
    #[arg(global = true, long = "owner", hide = true)]
    pub owner: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the current configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Register yourself in the workspace
    Register {
        /// Chat handle (defaults to the user id)
        #[arg(long = "handle")]
        handle: Option<String>,

        /// Full name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Check in for today
    In,

    /// Check out for today
    Out,

    /// Start or end a restroom break
    Toilet,

    /// Start or end a smoking break
    Smoke,

    /// Request leave (approved automatically)
    Leave {
        /// Leave type: sick, personal, ...
        kind: String,

        /// Free-text reason
        #[arg(num_args = 0..)]
        reason: Vec<String>,
    },

    /// Leave the company
    Resign,

    /// Show today's attendance and running breaks
    Status,

    /// [admin] Set scheduled work hours, e.g. 08:00-17:00
    SetWork { hours: String },

    /// [admin] Set rest days, e.g. Sunday,2026-02-10 (or "none")
    SetOff { days: String },

    /// [admin] Set a user's base salary
    SetSalary { target: String, amount: String },

    /// [admin] Set the perfect-attendance bonus
    SetBonus { amount: String },

    /// [admin] Set the restroom break limit in minutes
    SetToilet { minutes: i64 },

    /// [admin] Set the smoking break limit in minutes
    SetSmoke { minutes: i64 },

    /// [admin] Terminate an employee (@handle or user id)
    Fire { target: String },

    /// [owner] Grant admin rights for a number of days
    #[command(name = "setadmin")]
    SetAdmin { target: String, days: i64 },

    /// [admin] Attendance of one day (default: today)
    ReportDay { date: Option<String> },

    /// [admin] Monthly payroll (default: current month)
    ReportMonth {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long = "format", value_enum, requires = "file")]
        format: Option<ExportFormat>,

        #[arg(long = "file", value_name = "FILE", requires = "format")]
        file: Option<String>,
    },

    /// Run one overtime scan over every workspace
    Scan,

    /// Run the periodic overtime scan until Ctrl-C
    Watch,

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "limit", default_value_t = 50)]
        limit: usize,
    },
}
