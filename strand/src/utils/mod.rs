//! Internal data structures.
//!
//! [`Slab`] backs the scheduler's task table: tasks are addressed by a small
//! reusable index, paired with a [`TaskId`](crate::task::TaskId) so stale
//! wake-ups can be told apart from the slot's current occupant.

mod slab;

pub(crate) use slab::Slab;
