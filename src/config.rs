//! Configuration types for mdu
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Parallel disk usage counter
///
/// Unknown flags are skipped rather than rejected, matching the getopt
/// behavior of classic du-style tools; real validation happens in
/// [`DuConfig::from_args`].
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mdu",
    version,
    about = "Report disk usage in 512-byte blocks, one line per path",
    after_help = "EXAMPLES:\n    \
        mdu /var/log\n    \
        mdu -j 8 /usr /opt\n    \
        mdu -j 4 .",
    ignore_errors = true
)]
pub struct CliArgs {
    /// Number of worker threads (1 = single-threaded recursive mode)
    #[arg(short = 'j', value_name = "NUM", default_value_t = 1)]
    pub threads: usize,

    /// Paths whose subtrees are measured, one output line each
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct DuConfig {
    /// Fixed worker pool size
    pub thread_amount: usize,

    /// Root paths, in output order
    pub paths: Vec<PathBuf>,
}

impl DuConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.threads == 0 || args.threads > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.threads,
                max: MAX_WORKERS,
            });
        }

        if args.paths.is_empty() {
            return Err(ConfigError::MissingPaths);
        }

        Ok(Self {
            thread_amount: args.threads,
            paths: args.paths,
        })
    }

    /// True when the walk runs on the worker pool instead of recursing
    pub fn is_parallel(&self) -> bool {
        self.thread_amount > 1
    }
}
