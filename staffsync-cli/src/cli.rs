use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "staffsync")]
#[command(about = "Terminal client for the StaffSync staff-management server")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Server URL (overrides STAFFSYNC_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Server(ServerCommand),
    /// Search and sort a table stored as JSON
    Table {
        /// File with `{"columns": [...], "rows": [[...], ...]}`
        file: PathBuf,
        /// Only show rows containing this text
        #[arg(long, short = 'f')]
        filter: Option<String>,
        /// Sort by this column index; repeat to click a header again
        #[arg(long, short = 's')]
        sort: Vec<usize>,
        /// Print as CSV instead of aligned columns
        #[arg(long)]
        csv: bool,
    },
}

/// Subcommands that talk to the server.
#[derive(Subcommand, Debug)]
pub enum ServerCommand {
    /// Check in or out for today
    Attendance,
    /// Show notifications queued on the server
    Notifications {
        /// Keep polling until interrupted
        #[arg(long, short = 'w')]
        watch: bool,
    },
    /// Delete an employee record
    DeleteEmployee {
        /// Employee ID.
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Generate payroll for an employee
    Payroll {
        /// Employee ID.
        employee_id: i64,
        /// Pay period, e.g. 2024-05
        period: String,
    },
}
