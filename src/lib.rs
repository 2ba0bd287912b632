//! mdu - Parallel Disk Usage Counter
//!
//! A du-style tool that reports the aggregate on-disk block usage of one
//! or more filesystem subtrees, one line per root:
//!
//! ```text
//! <blocks>\t<path>
//! ```
//!
//! Block counts are `lstat`'s 512-byte units, summed over every entry
//! transitively reachable from the root. Symbolic links are counted, not
//! followed.
//!
//! # Features
//!
//! - **Parallel traversal**: a fixed pool of worker threads drains a
//!   shared task queue; each task scans one directory level and enqueues
//!   a new task per sub-directory it discovers.
//!
//! - **Clean termination**: the pool detects quiescence (queue empty and
//!   no worker mid-task) under a single mutex and shuts down via one
//!   sentinel task per worker.
//!
//! - **Permission tracking**: unreadable directories still contribute
//!   their own blocks, print a diagnostic, and flip the process exit
//!   code to failure.
//!
//! # Example
//!
//! ```bash
//! # Single-threaded, like plain du
//! mdu /var/log
//!
//! # Eight workers, several roots
//! mdu -j 8 /usr /opt /srv
//! ```

pub mod config;
pub mod error;
pub mod walker;

pub use config::{CliArgs, DuConfig};
pub use error::{MduError, Result};
pub use walker::{Driver, DuSummary};
