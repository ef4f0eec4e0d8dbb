use crate::task::{TaskId, TaskState};

/// Receives task lifecycle transitions.
///
/// Observers are for narration and logging only: the scheduler behaves
/// the same with or without one, and an observer cannot influence
/// scheduling. Callbacks run on the scheduler thread, in the middle of a
/// round, so they should not block.
///
/// # Examples
///
/// ```rust,ignore
/// struct Narrator;
///
/// impl Observer for Narrator {
///     fn on_transition(&self, id: TaskId, from: TaskState, to: TaskState) {
///         println!("{id}: {from} -> {to}");
///     }
/// }
///
/// let runtime = Runtime::builder().observer(Narrator).build();
/// ```
pub trait Observer {
    /// A task was spawned in the [`Pending`](TaskState::Pending) state.
    fn on_spawn(&self, id: TaskId) {
        let _ = id;
    }

    /// A task moved from `from` to `to`.
    fn on_transition(&self, id: TaskId, from: TaskState, to: TaskState);
}
