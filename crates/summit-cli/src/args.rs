use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CallArgs, ObjectiveCommands, PlanCommands, TaskCommands};

/// Command-line interface for Summit
///
/// Summit organizes work as objectives, each broken into ordered plans made
/// of indexed tasks. Tasks can be linked to tasks tracked by an external agent
/// protocol. Everything the CLI does is also available as JSON-RPC through
/// `summit serve`.
#[derive(Parser)]
#[command(version, about, name = "summit")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/summit/summit.db
    #[arg(long, global = true, conflicts_with = "memory")]
    pub database_file: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process
    #[arg(long, global = true)]
    pub memory: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Default number of objectives per listing page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Summit CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage objectives
    #[command(alias = "o")]
    Objective {
        #[command(subcommand)]
        command: ObjectiveCommands,
    },
    /// Manage plans within objectives
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage tasks within plans
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Serve newline-delimited JSON-RPC on stdin/stdout
    Serve,
    /// Dispatch a single JSON-RPC method and print the response
    Call(CallArgs),
    /// List JSON-RPC methods with their parameter schemas
    Methods,
}
