use super::{JoinHandle, spawn};
use crate::TaskError;

use std::future::Future;
use std::mem;

/// A scope collecting tasks that are waited on together.
///
/// Where [`gather`](super::gather) gives up at the first failure,
/// [`wait`](Self::wait) always lets every member reach a terminal state
/// before reporting. Members are never cancelled: a failing task does not
/// stop its siblings.
///
/// # Examples
///
/// ```rust,ignore
/// let mut group = TaskGroup::new();
/// for id in 0..2 {
///     group.spawn(fetch(id));
/// }
/// let results = group.wait().await?;
/// ```
pub struct TaskGroup<T> {
    handles: Vec<JoinHandle<T>>,
}

impl<T: 'static> TaskGroup<T> {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Spawns a task into the group.
    ///
    /// The task starts right away; the returned handle can be used to
    /// read its individual result after [`wait`](Self::wait).
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a running runtime.
    pub fn spawn<F>(&mut self, future: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + 'static,
    {
        let handle = spawn(future);
        self.handles.push(handle.clone());
        handle
    }

    /// Number of tasks spawned since the last [`wait`](Self::wait).
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<T: Clone + 'static> TaskGroup<T> {
    /// Waits until every member is terminal and empties the group.
    ///
    /// Returns all outputs in spawn order, or the error of the first
    /// failed member in spawn order.
    pub async fn wait(&mut self) -> Result<Vec<T>, TaskError> {
        let handles = mem::take(&mut self.handles);

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await);
        }

        outcomes.into_iter().collect()
    }
}

impl<T: 'static> Default for TaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}
