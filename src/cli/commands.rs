use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::LogLevel;

#[derive(Parser)]
#[command(
    name = "ctodo",
    about = concat!("ctodo v", env!("CARGO_PKG_VERSION"), " - tasks sorted into contexts"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different state file
    #[arg(long, global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log verbosity (RUST_LOG overrides)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Write logs to this file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in a context
    List(ListArgs),
    /// Add a task to a context (bottom)
    Add(AddArgs),
    /// List all contexts with task counts
    Contexts,
    /// Show completion statistics
    Stats,
}

#[derive(Args)]
pub struct ListArgs {
    /// Context to list (default: the current context)
    #[arg(long, conflicts_with = "all")]
    pub context: Option<String>,
    /// List every context
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Context to add to (default: the current context); created if missing
    #[arg(long)]
    pub context: Option<String>,
}
