//! Error types surfaced by the scheduler and its primitives.

use crate::task::TaskId;

use std::any::Any;

use thiserror::Error;

/// The failure cause of a task.
///
/// A task fails when its computation panics. The panic is caught at the
/// poll boundary, so the scheduler and every other task keep running; the
/// cause is cached on the task and handed to whoever awaits it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The task's computation panicked.
    #[error("task {id} panicked: {message}")]
    Panicked {
        /// The task that failed.
        id: TaskId,
        /// The panic message, when the payload was a string.
        message: String,
    },
}

impl TaskError {
    /// Builds a [`TaskError::Panicked`] from a caught panic payload.
    pub(crate) fn panicked(id: TaskId, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            String::from("Box<dyn Any>")
        };

        TaskError::Panicked { id, message }
    }

    /// The task that failed.
    pub fn id(&self) -> TaskId {
        match self {
            TaskError::Panicked { id, .. } => *id,
        }
    }
}

/// Returned by [`Deferred::set`](crate::sync::Deferred::set) when the slot
/// already holds a value. The stored value is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deferred value is already set")]
pub struct AlreadySetError;
