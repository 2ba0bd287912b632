//! mdu - Parallel Disk Usage Counter
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use mdu::config::{CliArgs, DuConfig};
use mdu::walker::Driver;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        // A directory was unreadable somewhere; the lines still printed
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let args = CliArgs::parse();

    setup_logging();

    let config = DuConfig::from_args(args)?;

    let driver = Driver::new(config.thread_amount);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = driver
        .run(&config.paths, &mut out)
        .context("walk failed")?;

    Ok(summary.permission_ok)
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mdu=warn"));

    // Logs go to stderr; stdout carries nothing but the result lines
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
