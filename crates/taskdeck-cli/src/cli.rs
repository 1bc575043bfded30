use clap::{ArgAction, Args, Parser, Subcommand};
use taskdeck_core::models::{Priority, Status};
use taskdeck_core::view::{SortDirection, SortKey};

/// Taskdeck: projects, tags and tasks with a dashboard in your terminal
#[derive(Parser, Debug)]
#[command(name = "taskdeck", author, version, about, long_about = None)]
pub struct Cli {
    /// Start with an empty store instead of the sample data
    #[arg(long, global = true)]
    pub empty: bool,

    /// IANA timezone used for "today" (e.g. 'Europe/Berlin')
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to the dashboard when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show statistics, tasks due today, overdue and in-progress tasks
    Dashboard,
    /// List all tasks
    List(ListCommand),
    /// List tasks due today
    Today(ListOptions),
    /// Browse projects
    Project(ProjectCommand),
    /// List tags with their usage
    Tags,
    /// Interactive session with add, edit, toggle and delete actions
    Shell,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// A filter query (e.g. "status:todo and (project:project-2 or tag:tag-1)")
    #[arg(default_value = "")]
    pub query: String,

    #[command(flatten)]
    pub options: ListOptions,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListOptions {
    /// Only show tasks with these statuses
    #[arg(long = "status", num_args = 1..)]
    pub statuses: Vec<Status>,

    /// Only show tasks with these priorities
    #[arg(long = "priority", num_args = 1..)]
    pub priorities: Vec<Priority>,

    /// Sort key (priority, due, title)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl ListOptions {
    pub fn direction(&self) -> Option<SortDirection> {
        if self.asc {
            Some(SortDirection::Ascending)
        } else if self.desc {
            Some(SortDirection::Descending)
        } else {
            None
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectSubcommand {
    /// List projects with their task counts
    List,
    /// Show a project and its tasks
    Show(ShowProjectCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ShowProjectCommand {
    /// Project ID or name
    pub project: String,

    #[command(flatten)]
    pub options: ListOptions,
}
