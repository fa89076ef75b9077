//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! Each input line is one request and yields exactly one response line.
//! Blank lines are skipped. Logging goes to stderr, so stdout carries nothing
//! but responses.

use anyhow::{Context, Result};
use log::{debug, info};
use summit_core::RpcHandler;
use tokio::{
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    signal::unix::{signal, SignalKind},
};

/// Serves requests until stdin closes or the process is signalled.
pub async fn run_stdio_server(handler: RpcHandler) -> Result<()> {
    info!(
        "Starting Summit JSON-RPC server on stdio with {} methods",
        handler.method_names().len()
    );

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
                break;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
                break;
            }
        };
        let Some(line) = line else {
            info!("stdin closed, stopping server");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = handler.handle_str(&line).await;
        debug!("-> {}", response.id);

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        stdout.write_all(&payload).await?;
        stdout.flush().await?;
    }

    Ok(())
}
