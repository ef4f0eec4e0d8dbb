//! Synchronization primitives for tasks.
//!
//! These primitives coordinate tasks running on the same runtime. Waiting
//! on any of them is a suspension point: the task is parked and the thread
//! moves on to other tasks.
//!
//! - [`Semaphore`]: up to N tasks in a critical section, FIFO hand-off.
//! - [`Lock`]: the capacity-1 semaphore.
//! - [`Mutex`]: a lock that owns the value it protects.
//! - [`Event`]: a one-shot broadcast flag.
//! - [`Deferred`]: a single-assignment value slot.
//!
//! [`Semaphore`] and [`Lock`] are interchangeable through the
//! [`Exclusive`] trait.
//!
//! Primitives are shared between tasks with `Rc`; they are bound to the
//! runtime's thread like the tasks using them.

mod deferred;
mod event;
mod lock;
mod mutex;
mod semaphore;

pub(crate) mod wait_list;

pub use deferred::{Deferred, DeferredWait};
pub use event::{Event, EventWait};
pub use lock::Lock;
pub use mutex::{Mutex, MutexGuard, MutexLock};
pub use semaphore::{Acquire, Permit, Semaphore};

/// A resource entered through scoped acquisition.
///
/// Acquiring yields a [`Permit`]; the resource is released when the permit
/// is dropped, whichever way the scope holding it exits. Up to
/// [`capacity`](Self::capacity) permits exist at once.
///
/// # Examples
///
/// ```rust,ignore
/// async fn access<R: Exclusive>(resource: &R, id: usize) {
///     let _permit = resource.acquire().await;
///     println!("{id} inside");
///     sleep(Duration::from_millis(10)).await;
/// }
/// ```
pub trait Exclusive {
    /// Returns a future resolving to a permit, suspending while none is
    /// available. Waiters are served in arrival order.
    fn acquire(&self) -> Acquire<'_>;

    /// Takes a permit if one is available without waiting.
    fn try_acquire(&self) -> Option<Permit<'_>>;

    /// Maximum number of permits held at once.
    fn capacity(&self) -> usize;

    /// Permits available right now.
    fn available(&self) -> usize;
}
