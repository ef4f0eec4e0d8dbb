use super::JoinHandle;
use super::state::{TaskId, TaskState};
use crate::TaskError;
use crate::runtime::context;
use crate::runtime::observer::Observer;
use crate::sync::wait_list::WaitList;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use tracing::{debug, trace, warn};

/// A task as seen by the scheduler, independent of its output type.
pub(crate) trait Runnable {
    fn id(&self) -> TaskId;

    /// Polls the task once. Returns `true` once the task is terminal.
    fn run(&self, cx: &mut Context<'_>) -> bool;

    /// Drops the computation of an unfinished task when its runtime winds
    /// down. The task never reaches a terminal state.
    fn abandon(&self);
}

/// A spawned computation and its cached outcome.
///
/// The scheduler owns the cell through its task table; every
/// [`JoinHandle`] shares it to observe the outcome.
pub(crate) struct TaskCell<T> {
    id: TaskId,

    /// The computation; taken out as soon as it finishes.
    future: RefCell<Option<Pin<Box<dyn Future<Output = T>>>>>,

    /// Terminal outcome, written exactly once.
    outcome: RefCell<Option<Result<T, TaskError>>>,

    state: Cell<TaskState>,

    /// Handles suspended on this task's completion.
    pub(crate) waiters: WaitList,

    observer: Option<Rc<dyn Observer>>,
}

impl<T> TaskCell<T> {
    pub(crate) fn new<F>(id: TaskId, future: F, observer: Option<Rc<dyn Observer>>) -> Self
    where
        F: Future<Output = T> + 'static,
    {
        Self {
            id,
            future: RefCell::new(Some(Box::pin(future))),
            outcome: RefCell::new(None),
            state: Cell::new(TaskState::Pending),
            waiters: WaitList::new(),
            observer,
        }
    }

    pub(crate) fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) fn state(&self) -> TaskState {
        self.state.get()
    }

    pub(crate) fn take_outcome(&self) -> Option<Result<T, TaskError>> {
        self.outcome.borrow_mut().take()
    }

    fn transition(&self, to: TaskState) {
        let from = self.state.replace(to);
        if from == to {
            return;
        }

        trace!(task = %self.id, %from, %to, "task transition");

        if let Some(observer) = &self.observer {
            observer.on_transition(self.id, from, to);
        }
    }

    fn complete(&self, outcome: Result<T, TaskError>) {
        let to = match &outcome {
            Ok(_) => {
                debug!(task = %self.id, "task completed");
                TaskState::Completed
            }
            Err(err) => {
                warn!(task = %self.id, error = %err, "task failed");
                TaskState::Failed
            }
        };

        *self.outcome.borrow_mut() = Some(outcome);
        self.transition(to);
        self.waiters.wake_all();
    }
}

impl<T: Clone> TaskCell<T> {
    pub(crate) fn peek_outcome(&self) -> Option<Result<T, TaskError>> {
        self.outcome.borrow().clone()
    }
}

impl<T> Runnable for TaskCell<T> {
    fn id(&self) -> TaskId {
        self.id
    }

    fn run(&self, cx: &mut Context<'_>) -> bool {
        let mut slot = self.future.borrow_mut();
        let Some(future) = slot.as_mut() else {
            return true;
        };

        self.transition(TaskState::Running);

        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| future.as_mut().poll(cx))) {
            Ok(Poll::Pending) => {
                self.transition(TaskState::Suspended);
                return false;
            }
            Ok(Poll::Ready(value)) => Ok(value),
            Err(payload) => Err(TaskError::panicked(self.id, payload)),
        };

        // Locals still held by the computation (lock permits among them)
        // are released here, before any awaiter observes the outcome.
        *slot = None;
        drop(slot);

        self.complete(outcome);
        true
    }

    fn abandon(&self) {
        let future = self.future.borrow_mut().take();
        drop(future);
    }
}

/// Spawns a future as a task onto the current runtime.
///
/// The task is queued immediately and makes progress on its own, whether
/// or not the returned handle is ever awaited. Futures that are only
/// awaited, never spawned, run lazily inside the awaiting task instead.
///
/// # Panics
///
/// Panics if called outside the context of a running runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let handle = strand::task::spawn(async { 21 * 2 });
/// assert_eq!(handle.await, Ok(42));
/// ```
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + 'static,
    F::Output: 'static,
{
    context::current()
        .expect("spawn must be called within the context of a runtime")
        .spawn(future)
}
