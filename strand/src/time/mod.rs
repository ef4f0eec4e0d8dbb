//! Time utilities.
//!
//! - [`sleep`] / [`sleep_until`]: suspend the current task on the
//!   scheduler's timer queue,
//! - [`instrumented`]: measure how long a future takes.

mod instrumented;
mod sleep;

pub use instrumented::{Instrumented, instrumented};
pub use sleep::{Sleep, sleep, sleep_until};
