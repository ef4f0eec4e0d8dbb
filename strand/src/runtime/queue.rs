use crate::task::TaskId;

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Address of a task in the scheduler's table.
///
/// The index locates the slot; the id tells a live task apart from a
/// later occupant of the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TaskKey {
    pub(crate) index: usize,
    pub(crate) id: TaskId,
}

/// FIFO queue of tasks ready to be polled.
///
/// This is the only scheduler structure reachable from a [`Waker`], and
/// wakers must be `Send + Sync`, so the queue is guarded by a mutex and
/// pairs with a condition variable: the scheduler thread parks on it when
/// idle and any thread pushing a task wakes it.
///
/// [`Waker`]: std::task::Waker
pub(crate) struct ReadyQueue {
    queue: Mutex<VecDeque<TaskKey>>,
    condvar: Condvar,
}

impl ReadyQueue {
    pub(crate) fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<TaskKey>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a task and wakes the scheduler if it is parked.
    pub(crate) fn push(&self, key: TaskKey) {
        self.lock().push_back(key);
        self.condvar.notify_one();
    }

    /// Takes the task at the head of the queue.
    pub(crate) fn pop(&self) -> Option<TaskKey> {
        self.lock().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    /// Blocks the calling thread until a task is pushed or `deadline`
    /// passes. Without a deadline, only a push ends the wait.
    ///
    /// Returns immediately if the queue is not empty.
    pub(crate) fn park(&self, deadline: Option<Instant>) {
        let mut queue = self.lock();

        while queue.is_empty() {
            match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }

                    queue = self
                        .condvar
                        .wait_timeout(queue, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0;
                }
                None => {
                    queue = self
                        .condvar
                        .wait(queue)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }
}
