//! CLI command definitions using clap
//!
//! [`Cli`] describes the process arguments. [`SessionLine`] describes one line
//! typed into a running session; lines are split shell-style before clap sees
//! them so titles can be quoted.

use crate::app::{Intent, LoginProvider};
use crate::models::{Priority, TaskDraft, TaskPatch, TaskStatus};
use crate::storage::FilterCategory;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

/// Task dashboard with filter tabs, statistics and a debug sidebar
#[derive(Parser, Debug)]
#[command(name = "taskflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load the initial task list from a YAML file
    #[arg(long, value_name = "FILE", conflicts_with = "empty")]
    pub seed: Option<PathBuf>,

    /// Start with no tasks instead of the demo set
    #[arg(long)]
    pub empty: bool,

    /// Start already signed in
    #[arg(long)]
    pub skip_login: bool,

    /// Start with the debug sidebar visible
    #[arg(long)]
    pub show_sidebar: bool,

    /// Pause before a completed status is committed (0 disables)
    #[arg(long, value_name = "MS", default_value_t = 300)]
    pub completion_delay_ms: u64,
}

/// One line of session input
#[derive(Parser, Debug)]
#[command(name = "taskflow", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Sign in (any provider is accepted)
    Login {
        /// google, github, facebook or demo
        #[arg(value_parser = parse_provider, default_value = "demo")]
        provider: LoginProvider,
    },

    /// Open the new-task form
    New,

    /// Close the new-task form
    Cancel,

    /// Create a task
    Add {
        /// Task title
        title: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority (low, medium, high)
        #[arg(short, long, value_parser = parse_priority, default_value = "medium")]
        priority: Priority,

        /// Initial status (pending, in-progress, completed)
        #[arg(short, long, value_parser = parse_status, default_value = "pending")]
        status: TaskStatus,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        due: NaiveDate,
    },

    /// Update task properties
    Update {
        /// Task ID
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// New status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<TaskStatus>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },

    /// Change task status from its card
    Status {
        /// Task ID
        id: u64,

        /// New status (pending, in-progress, completed)
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },

    /// Mark a task complete
    Complete {
        /// Task ID
        id: u64,
    },

    /// Start working on a task
    Start {
        /// Task ID
        id: u64,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },

    /// Switch the filter tab (all, pending, in-progress, completed, overdue)
    Filter {
        #[arg(value_parser = parse_filter)]
        category: FilterCategory,
    },

    /// Show one task card
    Show {
        /// Task ID
        id: u64,
    },

    /// Show or hide the debug sidebar
    Sidebar,

    /// Print the application state as JSON
    State,

    /// Redraw the current screen
    Refresh,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Errors from reading a session line
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unbalanced quotes: {0}")]
    Quote(#[from] shell_words::ParseError),
    #[error("{0}")]
    Usage(String),
}

/// What the session loop should do with a parsed line
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Dispatch(Intent),
    Show(u64),
    State,
    Refresh,
    Help(String),
    Quit,
}

impl From<SessionCommand> for SessionAction {
    fn from(command: SessionCommand) -> Self {
        match command {
            SessionCommand::Login { provider } => SessionAction::Dispatch(Intent::Login(provider)),
            SessionCommand::New => SessionAction::Dispatch(Intent::OpenForm),
            SessionCommand::Cancel => SessionAction::Dispatch(Intent::CloseForm),
            SessionCommand::Add {
                title,
                description,
                priority,
                status,
                due,
            } => SessionAction::Dispatch(Intent::Create(TaskDraft {
                title,
                description,
                priority,
                status,
                due_date: due,
            })),
            SessionCommand::Update {
                id,
                title,
                description,
                priority,
                status,
                due,
            } => SessionAction::Dispatch(Intent::Update {
                id,
                patch: TaskPatch {
                    title,
                    description,
                    priority,
                    status,
                    due_date: due,
                },
            }),
            SessionCommand::Status { id, status } => {
                SessionAction::Dispatch(Intent::SetStatus { id, status })
            }
            SessionCommand::Complete { id } => SessionAction::Dispatch(Intent::SetStatus {
                id,
                status: TaskStatus::Completed,
            }),
            SessionCommand::Start { id } => SessionAction::Dispatch(Intent::SetStatus {
                id,
                status: TaskStatus::InProgress,
            }),
            SessionCommand::Delete { id } => SessionAction::Dispatch(Intent::Delete(id)),
            SessionCommand::Filter { category } => {
                SessionAction::Dispatch(Intent::SetFilter(category))
            }
            SessionCommand::Show { id } => SessionAction::Show(id),
            SessionCommand::Sidebar => SessionAction::Dispatch(Intent::ToggleSidebar),
            SessionCommand::State => SessionAction::State,
            SessionCommand::Refresh => SessionAction::Refresh,
            SessionCommand::Quit => SessionAction::Quit,
        }
    }
}

/// Parse one session line. Blank lines mean "redraw".
pub fn parse_line(line: &str) -> Result<SessionAction, CommandError> {
    let words = shell_words::split(line)?;

    if words.is_empty() {
        return Ok(SessionAction::Refresh);
    }

    match SessionLine::try_parse_from(&words) {
        Ok(parsed) => Ok(parsed.command.into()),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp
            | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(SessionAction::Help(e.to_string()))
            }
            _ => Err(CommandError::Usage(e.to_string().trim_end().to_string())),
        },
    }
}

fn parse_provider(s: &str) -> Result<LoginProvider, String> {
    s.parse()
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    s.parse()
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse()
}

fn parse_filter(s: &str) -> Result<FilterCategory, String> {
    s.parse()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    crate::models::parse_date(s)
}
