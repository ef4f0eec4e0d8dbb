//! Core runtime components.
//!
//! This module contains the scheduler and everything it needs to drive
//! tasks on a single thread:
//! - the run loop and task table,
//! - the FIFO ready queue reached by wakers,
//! - the timer queue behind [`sleep`](crate::time::sleep),
//! - the thread-local context that lets tasks reach their scheduler,
//! - the lifecycle [`Observer`] hook.

mod core;
mod queue;
mod scheduler;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod observer;
pub(crate) mod timer;
pub(crate) mod yield_now;

pub mod task;

pub use self::core::Runtime;
