//! Worker threads for the parallel walk
//!
//! Each worker loops over the shared queue: block until a task is
//! available, run it outside the queue mutex, then fold the result back
//! into the shared accounting. Traversal tasks enqueue one new task per
//! sub-directory they discover, so every consumer is also a producer.
//!
//! The worker that completes the last traversal task observes the
//! quiescence snapshot and enqueues one shutdown sentinel per worker; the
//! first sentinel to execute raises the shutdown flag and every worker
//! exits the next time it sees it.

use crate::error::WorkerError;
use crate::walker::queue::{Task, TaskQueue};
use crate::walker::scan::scan_level;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// A worker thread consuming the task queue
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(id: usize, queue: Arc<TaskQueue>) -> Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("mdu-worker-{id}"))
            .spawn(move || worker_loop(id, &queue))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| WorkerError::Panicked { id: self.id }),
            None => Ok(()),
        }
    }
}

/// Main worker loop: runs until a sentinel has raised the shutdown flag
fn worker_loop(id: usize, queue: &TaskQueue) {
    debug!(worker = id, "worker starting");

    let mut executed = 0usize;
    while let Some(task) = queue.next_task() {
        run_task(queue, task);
        executed += 1;
    }

    debug!(worker = id, tasks = executed, "worker exiting");
}

/// Execute one task outside the queue mutex and fold its result back in.
///
/// A traversal task scans its directory level, flags a denial, and
/// enqueues a new traversal task per discovered sub-directory; those
/// enqueues happen while this worker still counts as running, so the
/// quiescence snapshot cannot fire in between. A sentinel raises the
/// shutdown flag and contributes nothing.
fn run_task(queue: &TaskQueue, task: Task) {
    let contribution = match task {
        Task::Walk(path) => {
            let scan = scan_level(&path);
            if scan.denied {
                queue.note_permission_denied();
            }
            for subdir in scan.subdirs {
                queue.enqueue(Task::Walk(subdir));
            }
            Some(scan.blocks)
        }
        Task::Shutdown => {
            queue.begin_shutdown();
            None
        }
    };

    if queue.finish_task(contribution) {
        queue.push_shutdown_tasks();
    }
}
