//! # Strand
//!
//! **Strand** is a single-threaded cooperative task scheduler with the
//! classic coordination primitives built on top of it.
//!
//! Every task runs on the thread that called [`Runtime::block_on`]. Exactly
//! one task executes at any instant, and it only gives the thread up at an
//! explicit suspension point: a [`sleep`](time::sleep), a
//! [`yield_now`], or a wait on a task, lock, semaphore, event or deferred
//! value. Code between two suspension points never interleaves with
//! another task.
//!
//! It offers:
//!
//! - **Eager tasks** through [`task::spawn`], with memoized
//!   [`JoinHandle`](task::JoinHandle)s
//! - **Aggregation** with [`task::gather`], [`task::TaskGroup`] and [`join!`]
//! - **Mutual exclusion** with [`sync::Lock`], [`sync::Mutex`] and the
//!   counting [`sync::Semaphore`], all served in FIFO order
//! - **Signalling** with the one-shot [`sync::Event`] and the
//!   single-assignment [`sync::Deferred`]
//! - **Timers** with [`time::sleep`] and [`time::instrumented`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strand::task;
//! use strand::time::sleep;
//! use std::time::Duration;
//!
//! #[strand::main]
//! async fn main() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(100)).await;
//!         "fetched"
//!     });
//!
//!     println!("{:?}", handle.await);
//! }
//! ```
//!
//! ## Failures
//!
//! A task fails when its computation panics. The failure is cached on the
//! task as a [`TaskError`] and surfaces to whoever awaits it.
//! [`task::gather`] returns the first failure it sees without cancelling
//! the other tasks.
//!
//! ## Modules
//!
//! - [`task`]: Spawning, join handles and aggregation
//! - [`sync`]: Locks, semaphores, events and deferred values
//! - [`time`]: Sleep and timing measurement

mod error;
mod runtime;
mod utils;

pub mod sync;
pub mod time;

pub use error::{AlreadySetError, TaskError};
pub use runtime::builder::RuntimeBuilder;
pub use runtime::observer::Observer;
pub use runtime::task;
pub use runtime::yield_now::yield_now;
pub use runtime::Runtime;

pub use strand_macros::{join, main, test};
