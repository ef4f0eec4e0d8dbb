use super::lock::Lock;
use super::semaphore::{Acquire, Permit};

use std::cell::{RefCell, RefMut};
use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;
use std::task::{Context, Poll};

/// An asynchronous mutex.
///
/// `Mutex<T>` provides mutual exclusion over a value for tasks. Tasks that
/// cannot acquire the lock are suspended, never blocking the thread, and
/// are woken in arrival order when it becomes available.
pub struct Mutex<T> {
    lock: Lock,

    /// The protected value. Only borrowed while the lock is held, so the
    /// borrow never conflicts.
    data: RefCell<T>,
}

impl<T> Mutex<T> {
    /// Creates a new, unlocked mutex wrapping `value`.
    pub fn new(value: T) -> Self {
        Self {
            lock: Lock::new(),
            data: RefCell::new(value),
        }
    }

    /// Returns a future that resolves to a guard once the mutex is
    /// acquired.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut guard = mutex.lock().await;
    /// *guard += 1;
    /// ```
    pub fn lock(&self) -> MutexLock<'_, T> {
        MutexLock {
            mutex: self,
            acquire: self.lock.acquire(),
        }
    }

    /// Acquires the mutex if it is free right now.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        let permit = self.lock.try_acquire()?;
        Some(MutexGuard::new(self, permit))
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Mutable access without locking; the exclusive borrow proves no
    /// guard exists.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Future returned by [`Mutex::lock`].
pub struct MutexLock<'a, T> {
    mutex: &'a Mutex<T>,
    acquire: Acquire<'a>,
}

impl<'a, T> Future for MutexLock<'a, T> {
    type Output = MutexGuard<'a, T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match Pin::new(&mut this.acquire).poll(cx) {
            Poll::Ready(permit) => Poll::Ready(MutexGuard::new(this.mutex, permit)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Guard returned by [`Mutex::lock`]; releases the mutex when dropped.
pub struct MutexGuard<'a, T> {
    // Declared before the permit: the borrow ends before the next holder
    // is let in.
    data: RefMut<'a, T>,
    _permit: Permit<'a>,
}

impl<'a, T> MutexGuard<'a, T> {
    fn new(mutex: &'a Mutex<T>, permit: Permit<'a>) -> Self {
        Self {
            data: mutex.data.borrow_mut(),
            _permit: permit,
        }
    }
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
