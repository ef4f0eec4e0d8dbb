use super::Runtime;
use super::observer::Observer;

use std::rc::Rc;

/// Initial size of the task table.
const DEFAULT_TASK_CAPACITY: usize = 64;

/// Builder for configuring and creating a runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new()
///     .task_capacity(16)
///     .build();
/// ```
pub struct RuntimeBuilder {
    /// Slots preallocated in the task table.
    task_capacity: usize,

    /// Lifecycle observer, if any.
    observer: Option<Rc<dyn Observer>>,
}

impl RuntimeBuilder {
    /// Creates a builder with the default configuration: room for 64 tasks
    /// before the table grows, and no observer.
    pub fn new() -> Self {
        Self {
            task_capacity: DEFAULT_TASK_CAPACITY,
            observer: None,
        }
    }

    /// Sets how many tasks fit in the task table before it grows.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn task_capacity(mut self, n: usize) -> Self {
        assert!(n > 0, "task_capacity must be > 0");

        self.task_capacity = n;
        self
    }

    /// Installs an observer notified of every task lifecycle transition.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    /// Builds the runtime with the configured options.
    pub fn build(self) -> Runtime {
        Runtime::with_config(self.task_capacity, self.observer)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
