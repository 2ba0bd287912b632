//! Task queue shared by the worker pool
//!
//! A FIFO of traversal tasks plus the pool's shared accounting, all behind
//! a single mutex with an associated condvar. Invariants:
//!
//! - every field is read and written only under the mutex
//! - `running` changes in the same critical section as the dequeue that
//!   hands a task out, and as the accounting that retires it
//! - the quiescence predicate (queue empty AND `running == 0` after a
//!   traversal task) becomes true exactly once per root
//!
//! Shutdown protocol: when the quiescence snapshot fires, exactly
//! `thread_amount` sentinel tasks are enqueued. Each sentinel sets the
//! shutdown flag and contributes nothing; each worker exits its loop the
//! next time it observes the flag.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex, MutexGuard};

/// One unit of queued work
#[derive(Debug, PartialEq, Eq)]
pub enum Task {
    /// Traverse a single directory level
    Walk(PathBuf),

    /// Sentinel: cause exactly one worker to leave its loop
    Shutdown,
}

/// Mutable queue state; every field is guarded by [`TaskQueue::state`]
#[derive(Debug)]
struct QueueState {
    /// Pending tasks in FIFO order
    tasks: VecDeque<Task>,

    /// Workers currently between dequeue and accounting
    running: usize,

    /// Block accumulator for the current root
    block_sum: u64,

    /// False once any directory failed to open for reading; never reset
    permission_ok: bool,

    /// True once a sentinel has executed; ends the worker loops
    shutdown: bool,
}

/// Thread-safe task queue with pool accounting
pub struct TaskQueue {
    state: Mutex<QueueState>,
    cond: Condvar,
    thread_amount: usize,
}

impl TaskQueue {
    /// Create a queue for a pool of `thread_amount` workers
    pub fn new(thread_amount: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                running: 0,
                block_sum: 0,
                permission_ok: true,
                shutdown: false,
            }),
            cond: Condvar::new(),
            thread_amount,
        }
    }

    /// Fixed worker count this queue was built for
    pub fn thread_amount(&self) -> usize {
        self.thread_amount
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().expect("task queue mutex poisoned")
    }

    /// Append a task and wake one waiting worker
    pub fn enqueue(&self, task: Task) {
        let mut state = self.lock();
        state.tasks.push_back(task);
        self.cond.notify_one();
    }

    /// Blocking dequeue for the worker loop.
    ///
    /// Returns `None` once the shutdown flag is set, which is the worker's
    /// signal to exit. Otherwise waits on the condvar until a task is
    /// available and removes it, bumping `running` in the same critical
    /// section as the removal so no observer can see the queue empty while
    /// the task is in neither the FIFO nor a worker's hands.
    pub fn next_task(&self) -> Option<Task> {
        let mut state = self.lock();
        if state.shutdown {
            return None;
        }
        while state.tasks.is_empty() {
            state = self
                .cond
                .wait(state)
                .expect("task queue mutex poisoned");
        }
        let task = state.tasks.pop_front();
        state.running += 1;
        task
    }

    /// Record a finished task.
    ///
    /// `contribution` is `Some(blocks)` for a traversal task and `None` for
    /// a sentinel. The credit and the `running` decrement happen in one
    /// critical section; the returned flag is the quiescence snapshot taken
    /// in that same section (queue empty, nobody running, and the finished
    /// task was a traversal). The caller enqueues the sentinels outside the
    /// mutex when the snapshot fires.
    #[must_use]
    pub fn finish_task(&self, contribution: Option<u64>) -> bool {
        let mut state = self.lock();
        if let Some(blocks) = contribution {
            state.block_sum += blocks;
        }
        state.running -= 1;
        state.tasks.is_empty() && state.running == 0 && contribution.is_some()
    }

    /// Executed by a sentinel: flip the shutdown flag
    pub fn begin_shutdown(&self) {
        let mut state = self.lock();
        state.shutdown = true;
    }

    /// Enqueue one sentinel per worker
    pub fn push_shutdown_tasks(&self) {
        for _ in 0..self.thread_amount {
            self.enqueue(Task::Shutdown);
        }
    }

    /// Record an unreadable directory
    pub fn note_permission_denied(&self) {
        let mut state = self.lock();
        state.permission_ok = false;
    }

    /// Credit blocks directly; used by the sequential path
    pub fn add_blocks(&self, blocks: u64) {
        let mut state = self.lock();
        state.block_sum += blocks;
    }

    /// Accumulated block count for the current root
    pub fn block_sum(&self) -> u64 {
        self.lock().block_sum
    }

    /// True while no directory has been unreadable
    pub fn permission_ok(&self) -> bool {
        self.lock().permission_ok
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    /// True iff no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    /// Reset per-root state between roots.
    ///
    /// Drains residual tasks (sentinels a worker exited past without
    /// consuming), zeroes the accumulator and running count, clears the
    /// shutdown flag. The permission flag spans all roots and is left
    /// alone. Precondition: all workers joined.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.tasks.clear();
        state.running = 0;
        state.block_sum = 0;
        state.shutdown = false;
    }
}
