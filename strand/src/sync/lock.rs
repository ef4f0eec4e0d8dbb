use super::Exclusive;
use super::semaphore::{Acquire, Permit, Semaphore};

/// A mutual exclusion lock.
///
/// At most one task holds the lock. `Lock` guards no data of its own; it
/// serializes whatever critical section runs while its [`Permit`] is alive.
/// For a lock that owns the protected value, see [`Mutex`](super::Mutex).
///
/// This is the capacity-1 case of [`Semaphore`]: waiters are served in
/// FIFO order and a release hands the lock directly to the next waiter.
///
/// # Examples
///
/// ```rust,ignore
/// let lock = Rc::new(Lock::new());
///
/// let _held = lock.acquire().await;
/// // critical section
/// ```
#[derive(Debug)]
pub struct Lock {
    semaphore: Semaphore,
}

impl Lock {
    /// Creates an unlocked lock.
    pub fn new() -> Self {
        Self {
            semaphore: Semaphore::new(1),
        }
    }

    /// Returns a future resolving once the lock is held.
    pub fn acquire(&self) -> Acquire<'_> {
        self.semaphore.acquire()
    }

    /// Takes the lock if it is free right now.
    pub fn try_acquire(&self) -> Option<Permit<'_>> {
        self.semaphore.try_acquire()
    }

    pub fn is_locked(&self) -> bool {
        self.semaphore.available_permits() == 0
    }

    /// The number of tasks queued for the lock.
    pub fn waiting(&self) -> usize {
        self.semaphore.waiting()
    }
}

impl Exclusive for Lock {
    fn acquire(&self) -> Acquire<'_> {
        self.semaphore.acquire()
    }

    fn try_acquire(&self) -> Option<Permit<'_>> {
        self.semaphore.try_acquire()
    }

    fn capacity(&self) -> usize {
        1
    }

    fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for Lock {
    fn default() -> Self {
        Self::new()
    }
}
