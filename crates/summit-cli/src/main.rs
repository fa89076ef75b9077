//! Summit CLI Application
//!
//! Command-line interface for the Summit objective/plan/task hierarchy, plus
//! a stdio JSON-RPC server exposing the same operations.

mod args;
mod cli;
mod commands;
mod renderer;
mod serve;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use commands::{print_methods, Cli};
use log::info;
use renderer::TerminalRenderer;
use serve::run_stdio_server;
use summit_core::{params::ListObjectives, HierarchyBuilder, RpcHandler};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let Args {
        database_file,
        memory,
        no_color,
        page_size,
        command,
    } = Args::parse();

    if let Some(Methods) = command {
        return print_methods();
    }

    let mut builder = HierarchyBuilder::new();
    builder = if memory {
        builder.in_memory()
    } else {
        builder.with_database_path(database_file)
    };
    if let Some(size) = page_size {
        builder = builder.with_default_page_size(size);
    }
    let hierarchy = builder
        .build()
        .await
        .context("Failed to initialize hierarchy")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Summit started");

    match command {
        Some(Objective { command }) => {
            Cli::new(hierarchy, renderer)
                .handle_objective_command(command)
                .await
        }
        Some(Plan { command }) => {
            Cli::new(hierarchy, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(hierarchy, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Serve) => run_stdio_server(RpcHandler::new(hierarchy))
            .await
            .context("JSON-RPC server failed"),
        Some(Call(args)) => Cli::new(hierarchy, renderer).call(args).await,
        Some(Methods) => print_methods(),
        None => {
            Cli::new(hierarchy, renderer)
                .list_objectives(ListObjectives::default())
                .await
        }
    }
}
