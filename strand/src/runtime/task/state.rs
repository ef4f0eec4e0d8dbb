use std::fmt;

/// Lifecycle state of a task.
///
/// ```text
/// Pending ──► Running ──► Completed
///               │  ▲  └──► Failed
///               ▼  │
///            Suspended
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Spawned and queued, never polled.
    Pending,

    /// Currently executing between two suspension points.
    Running,

    /// Parked at a suspension point, waiting to be woken.
    Suspended,

    /// Finished with a value.
    Completed,

    /// Finished with a [`TaskError`](crate::TaskError).
    Failed,
}

impl TaskState {
    /// Returns `true` for [`Completed`](Self::Completed) and
    /// [`Failed`](Self::Failed).
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Suspended => "suspended",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        };

        f.write_str(name)
    }
}

/// Opaque identity of a task.
///
/// Identifiers are unique within a runtime and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
