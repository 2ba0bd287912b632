//! Parallel directory walker
//!
//! # Architecture
//!
//! ```text
//!                   ┌──────────────────────────┐
//!                   │         Driver           │
//!                   │  one root at a time:     │
//!                   │  seed → spawn → join     │
//!                   └────────────┬─────────────┘
//!                                │
//!                   ┌────────────▼─────────────┐
//!                   │        TaskQueue         │
//!                   │  mutex + condvar FIFO    │
//!                   │  block_sum / running /   │
//!                   │  permission / shutdown   │
//!                   └────┬───────┬───────┬─────┘
//!                        │       │       │
//!                  ┌─────▼──┐ ┌──▼─────┐ ┌──▼─────┐
//!                  │Worker 0│ │Worker 1│ │Worker N│
//!                  │ scan   │ │ scan   │ │ scan   │
//!                  │ level  │ │ level  │ │ level  │
//!                  └────────┘ └────────┘ └────────┘
//! ```
//!
//! Workers pop a directory, scan one level, and push a task per
//! sub-directory they find. The walk is over exactly when the queue is
//! empty and nobody is mid-task; the worker that observes that snapshot
//! enqueues one shutdown sentinel per worker.

pub mod driver;
pub mod queue;
pub mod scan;
pub mod worker;

pub use driver::{Driver, DuSummary};
pub use queue::{Task, TaskQueue};
pub use scan::{join_entry, scan_level, scan_tree, LevelScan, TreeScan};
pub use worker::Worker;
