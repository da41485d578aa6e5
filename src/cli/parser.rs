use clap::{Parser, Subcommand};

/// Command-line interface definition for rtrack
/// CLI application to track project time with pauses and hierarchical reports
#[derive(Parser)]
#[command(
    name = "rtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple time tracking CLI: record work per project, pause/resume, and report totals",
    long_about = None
)]
pub struct Cli {
    /// Override the data root directory (useful for tests or custom stores)
    #[arg(global = true, long = "root")]
    pub root: Option<String>,

    /// Override the workspace
    #[arg(global = true, long = "workspace", short = 'w')]
    pub workspace: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the workspace directories
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },

    /// Start a record for a project
    Start {
        /// Project name
        project: String,

        /// Note words; words starting with '+' become tags
        note: Vec<String>,

        #[arg(long = "at", help = "Start time (HH:MM or YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,
    },

    /// Stop the running record
    Stop {
        #[arg(long = "at", help = "End time (HH:MM or YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,
    },

    /// Pause the running record
    Pause {
        /// Pause note
        note: Vec<String>,

        #[arg(long = "at", help = "Pause start (HH:MM or YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,
    },

    /// Resume the paused record
    Resume {
        #[arg(long = "at", help = "Pause end (HH:MM or YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,
    },

    /// Remove the last pause of the running record
    Unpause,

    /// Show the running record
    Status,

    /// List records
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "project", short = 'P', help = "Only these projects")]
        projects: Vec<String>,

        #[arg(long = "tag", short = 't', help = "Only records with any of these tags")]
        tags: Vec<String>,

        #[arg(long = "reverse", short = 'r', help = "Most recent first")]
        reverse: bool,
    },

    /// Report time per project, including sub-projects
    Report {
        /// Projects to report on (default: all)
        projects: Vec<String>,

        #[arg(long, short, help = "Restrict to year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "tag", short = 't', help = "Only records with any of these tags")]
        tags: Vec<String>,

        #[arg(long = "archived", help = "Include archived projects")]
        archived: bool,
    },

    /// Delete the record started at the given date and time
    Del {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM:SS)
        time: String,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print entries of the internal log")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add {
        name: String,

        #[arg(long = "parent", help = "Parent project")]
        parent: Option<String>,

        #[arg(long = "archived", help = "Create as archived")]
        archived: bool,
    },

    /// List projects as a tree
    List,
}
