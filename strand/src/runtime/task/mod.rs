//! Tasks and task aggregation.
//!
//! A task is a spawned computation the scheduler drives on its own; its
//! [`JoinHandle`] is the way to observe it. This module also holds the
//! aggregators built on top of handles:
//! - [`gather`] / [`join_all`]: ordered results, fail on first failure,
//!   no cancellation,
//! - [`TaskGroup`]: wait for every member, then report.
//!
//! Plain `async` blocks and `async fn` calls are lazy: they do nothing
//! until awaited. [`spawn`] is what makes a computation eager.

mod core;
mod gather;
mod group;
mod handle;
mod state;

pub(crate) mod waker;

pub(crate) use self::core::{Runnable, TaskCell};

pub use self::core::spawn;
pub use gather::{JoinAll, gather, join_all};
pub use group::TaskGroup;
pub use handle::JoinHandle;
pub use state::{TaskId, TaskState};
