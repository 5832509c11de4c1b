//! CLI argument parsing for tasktable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tt",
    about = "A local task tracker with search, pagination and CSV export",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/tasktable/logs/tasktable.log"
)]
pub struct Cli {
    /// Path to the SQLite database (default: tasks.db, or `database` from the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the database and schema if they don't exist
    Init,

    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Estimated time (free text)
        #[arg(short, long)]
        time: Option<String>,

        /// Category name
        #[arg(short, long)]
        category: Option<String>,

        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "high")]
        priority: String,
    },

    /// Edit a task; fields not given keep their current value
    Edit {
        /// Task ID
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// New estimated time
        #[arg(short, long)]
        time: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// List tasks, newest first
    List {
        /// Only tasks whose title, description or category contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Page number (1-based)
        #[arg(short = 'P', long, default_value = "1")]
        page: u32,

        /// Rows per page (default from config)
        #[arg(short = 'n', long)]
        page_size: Option<u32>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show {
        /// Task ID
        id: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip the done flag on one or more tasks
    Toggle {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Delete one or more tasks
    Delete {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<i64>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export every task to a CSV file
    Export {
        /// Destination (default: tasks.csv, or `export_path` from the config file)
        path: Option<PathBuf>,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Add a category
    Add {
        /// Category name
        name: String,
    },

    /// List categories
    List,
}
