use clap::{Args, Subcommand};

/// Task tracking subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Add a task for the signed-in account.
    Add(TaskAddArgs),
    /// List tasks, newest first.
    List(TaskListArgs),
    /// Edit an existing task.
    Update(TaskUpdateArgs),
    /// Delete a task by id.
    Delete {
        /// Task id, for example 20260209001.
        id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct TaskAddArgs {
    /// What the task is about.
    pub description: String,

    /// Start time as HH:MM or RFC 3339.
    #[arg(long, default_value = "")]
    pub start: String,

    /// End time as HH:MM or RFC 3339.
    #[arg(long, default_value = "")]
    pub end: String,

    /// Date the times belong to (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TaskListArgs {
    /// Only show tasks starting on this date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    /// Load every page instead of the first one.
    #[arg(long)]
    pub all: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TaskUpdateArgs {
    /// Task id to edit.
    pub id: String,

    /// New description.
    #[arg(long)]
    pub description: Option<String>,

    /// New start time as HH:MM or RFC 3339. Pass "" to clear.
    #[arg(long)]
    pub start: Option<String>,

    /// New end time as HH:MM or RFC 3339. Pass "" to clear.
    #[arg(long)]
    pub end: Option<String>,

    /// Date the times belong to (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}
