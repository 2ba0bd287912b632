//! Per-root orchestration
//!
//! The driver owns the shared task queue and walks the supplied roots in
//! input order. With a pool size above one it spawns the workers, seeds
//! the queue with the root, and joins them; otherwise it runs the
//! recursive walk on the calling thread. Either way the result line is
//! printed while no worker is active, then the per-root state is reset.

use crate::error::Result;
use crate::walker::queue::{Task, TaskQueue};
use crate::walker::scan::scan_tree;
use crate::walker::worker::Worker;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Result of measuring all roots
#[derive(Debug, Clone, Default)]
pub struct DuSummary {
    /// Number of roots measured (one output line each)
    pub roots: usize,

    /// True when every directory across all roots was readable
    pub permission_ok: bool,
}

/// Drives the walk over one or more root paths
pub struct Driver {
    queue: Arc<TaskQueue>,
}

impl Driver {
    /// Create a driver backed by a pool of `thread_amount` workers
    pub fn new(thread_amount: usize) -> Self {
        Self {
            queue: Arc::new(TaskQueue::new(thread_amount)),
        }
    }

    /// Measure every root in input order, writing one line per root.
    ///
    /// Output format per root: `<blocks>\t<path>\n`, the path exactly as
    /// supplied.
    pub fn run<W: Write>(&self, roots: &[PathBuf], out: &mut W) -> Result<DuSummary> {
        for root in roots {
            if self.queue.thread_amount() > 1 {
                self.run_parallel(root)?;
            } else {
                let tree = scan_tree(root);
                if tree.denied {
                    self.queue.note_permission_denied();
                }
                self.queue.add_blocks(tree.blocks);
            }

            debug!(
                root = %root.display(),
                blocks = self.queue.block_sum(),
                "root measured"
            );
            writeln!(out, "{}\t{}", self.queue.block_sum(), root.display())?;

            self.queue.reset();
        }

        Ok(DuSummary {
            roots: roots.len(),
            permission_ok: self.queue.permission_ok(),
        })
    }

    /// Spawn the pool, seed it with the root, and join every worker
    fn run_parallel(&self, root: &Path) -> Result<()> {
        let workers: Vec<Worker> = (0..self.queue.thread_amount())
            .map(|id| Worker::spawn(id, Arc::clone(&self.queue)))
            .collect::<std::result::Result<_, _>>()?;

        self.queue.enqueue(Task::Walk(root.to_path_buf()));

        for worker in workers {
            worker.join()?;
        }
        Ok(())
    }
}
