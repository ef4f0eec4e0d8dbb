use super::builder::RuntimeBuilder;
use super::context;
use super::observer::Observer;
use super::scheduler::Scheduler;
use crate::TaskError;
use crate::task::JoinHandle;

use std::future::Future;
use std::rc::Rc;

use tracing::debug;

/// A single-threaded cooperative runtime.
///
/// `Runtime` is responsible for:
/// - holding the scheduler that interleaves tasks on the calling thread,
/// - providing the synchronous entry point, [`block_on`](Self::block_on).
///
/// A runtime is bound to the thread that created it (it is neither `Send`
/// nor `Sync`), and so are its tasks: they do not need to be `Send`.
pub struct Runtime {
    scheduler: Rc<Scheduler>,
}

impl Runtime {
    /// Creates a runtime with the default configuration.
    ///
    /// See [`Runtime::builder`] to configure it.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub(crate) fn with_config(task_capacity: usize, observer: Option<Rc<dyn Observer>>) -> Self {
        Self {
            scheduler: Rc::new(Scheduler::new(task_capacity, observer)),
        }
    }

    /// Returns a builder to configure a runtime.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Spawns a future onto the runtime ahead of a run.
    ///
    /// The task is queued and starts executing during the next call to
    /// [`block_on`](Self::block_on). Inside a run, prefer
    /// [`task::spawn`](crate::task::spawn).
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        self.scheduler.spawn(future)
    }

    /// Runs `future` as the entry task, blocking the current thread until
    /// it is terminal.
    ///
    /// Every task spawned along the way is driven as well. The entry
    /// task's output is returned; if the entry task fails, its
    /// [`TaskError`] is returned instead. Tasks still unfinished when the
    /// entry task ends are dropped with the run.
    ///
    /// # Panics
    ///
    /// Panics if called from within a running runtime.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let runtime = Runtime::new();
    /// let value = runtime.block_on(async { 42 });
    /// assert_eq!(value, Ok(42));
    /// ```
    pub fn block_on<F>(&self, future: F) -> Result<F::Output, TaskError>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        assert!(
            context::current().is_none(),
            "cannot start a runtime from within a runtime"
        );

        let scheduler = self.scheduler.clone();

        context::enter(scheduler.clone(), || {
            let entry = scheduler.spawn(future);
            debug!(task = %entry.id(), "run started");

            let outcome = loop {
                scheduler.fire_timers();
                scheduler.run_round();

                if let Some(outcome) = entry.take_outcome() {
                    break outcome;
                }

                scheduler.park();
            };

            debug!(
                task = %entry.id(),
                leftover = scheduler.task_count(),
                timers = scheduler.timer_count(),
                "run finished"
            );

            scheduler.shutdown();
            outcome
        })
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
