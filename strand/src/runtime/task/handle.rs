use super::core::TaskCell;
use super::state::{TaskId, TaskState};
use crate::TaskError;
use crate::sync::wait_list::Ticket;

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// A handle to a spawned task.
///
/// Awaiting the handle suspends until the task is terminal and yields its
/// outcome. The outcome is cached: any number of handles may await the
/// same task, and each await after completion returns a clone of it
/// without suspending.
///
/// Dropping a `JoinHandle` does **not** cancel the task; it only discards
/// the ability to observe its outcome.
pub struct JoinHandle<T> {
    pub(crate) task: Rc<TaskCell<T>>,

    /// Registration in the task's wait list while this handle is pending.
    ticket: Option<Ticket>,
}

impl<T> JoinHandle<T> {
    pub(crate) fn new(task: Rc<TaskCell<T>>) -> Self {
        Self { task, ticket: None }
    }

    /// The task's identity.
    pub fn id(&self) -> TaskId {
        self.task.id()
    }

    /// The task's current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.task.state()
    }

    /// Returns `true` once the task has completed or failed.
    pub fn is_finished(&self) -> bool {
        self.task.state().is_terminal()
    }

    /// Moves the outcome out of the task. Used for the entry task of a
    /// run, whose output need not be `Clone`.
    pub(crate) fn take_outcome(&self) -> Option<Result<T, TaskError>> {
        self.task.take_outcome()
    }
}

impl<T: Clone> JoinHandle<T> {
    /// Returns the task's outcome without suspending, or `None` while the
    /// task is still running.
    pub fn result(&self) -> Option<Result<T, TaskError>> {
        self.task.peek_outcome()
    }
}

impl<T> Clone for JoinHandle<T> {
    fn clone(&self) -> Self {
        Self::new(self.task.clone())
    }
}

impl<T: Clone> Future for JoinHandle<T> {
    type Output = Result<T, TaskError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(outcome) = this.task.peek_outcome() {
            this.task.waiters.remove(this.ticket.take());
            return Poll::Ready(outcome);
        }

        this.task.waiters.register(&mut this.ticket, cx.waker());
        Poll::Pending
    }
}

impl<T> Drop for JoinHandle<T> {
    fn drop(&mut self) {
        self.task.waiters.remove(self.ticket.take());
    }
}
