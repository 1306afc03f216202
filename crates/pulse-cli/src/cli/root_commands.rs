use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Account and session management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Task tracking.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Pull the latest state from the remote database.
    Sync,
}
