//! Error types for mdu
//!
//! This module defines the error hierarchy for the crate:
//! - Configuration and CLI errors
//! - Worker thread errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what went wrong
//! - Recoverable per-directory failures (unreadable directories, vanished
//!   entries) are NOT errors; they fold into the walk result and the
//!   process-wide permission flag

use thiserror::Error;

/// Top-level error type for the mdu application
#[derive(Error, Debug)]
pub enum MduError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (writing results, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// No path operands supplied
    #[error("missing path operand\nUsage: mdu [-j <threads>] <path>...")]
    MissingPaths,
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },
}

/// Result type alias for MduError
pub type Result<T> = std::result::Result<T, MduError>;
