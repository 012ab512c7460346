//! CLI entry point for the doclinks tool.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app;
mod cli;

use app::command_dispatcher::dispatch;
use app::terminal::{default_log_level, init_tracing};
use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    init_tracing(default_log_level(args.quiet, args.verbose));
    debug!(?args, "CLI arguments parsed");

    let exit = dispatch(args).await?;
    Ok(exit.into())
}
