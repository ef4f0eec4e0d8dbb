use super::wait_list::{Ticket, WaitList};
use crate::AlreadySetError;

use std::cell::OnceCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A single-assignment slot awaited by any number of tasks.
///
/// The slot starts empty. One [`set`](Self::set) fills it and releases
/// every waiting task; the value can then never change, and every later
/// [`wait`](Self::wait) returns it without suspending. A second `set`
/// fails with [`AlreadySetError`].
///
/// # Examples
///
/// ```rust,ignore
/// let slot = Rc::new(Deferred::new());
///
/// let writer = slot.clone();
/// task::spawn(async move {
///     sleep(Duration::from_millis(10)).await;
///     writer.set("hello").unwrap();
/// });
///
/// assert_eq!(slot.wait().await, "hello");
/// ```
pub struct Deferred<T> {
    value: OnceCell<T>,
    waiters: WaitList,
}

impl<T> Deferred<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            value: OnceCell::new(),
            waiters: WaitList::new(),
        }
    }

    /// Stores `value` and wakes every waiting task.
    ///
    /// Fails if the slot already holds a value, which is left untouched.
    pub fn set(&self, value: T) -> Result<(), AlreadySetError> {
        self.value.set(value).map_err(|_| AlreadySetError)?;
        self.waiters.wake_all();

        Ok(())
    }

    pub fn is_set(&self) -> bool {
        self.value.get().is_some()
    }

    /// The stored value, if set.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns a future resolving to a clone of the value once it is set.
    pub fn wait(&self) -> DeferredWait<'_, T> {
        DeferredWait {
            deferred: self,
            ticket: None,
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("value", &self.value.get())
            .field("waiting", &self.waiters.len())
            .finish()
    }
}

/// Future returned by [`Deferred::wait`].
pub struct DeferredWait<'a, T> {
    deferred: &'a Deferred<T>,
    ticket: Option<Ticket>,
}

impl<T: Clone> Future for DeferredWait<'_, T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(value) = this.deferred.get() {
            this.deferred.waiters.remove(this.ticket.take());
            return Poll::Ready(value.clone());
        }

        this.deferred.waiters.register(&mut this.ticket, cx.waker());
        Poll::Pending
    }
}

impl<T> Drop for DeferredWait<'_, T> {
    fn drop(&mut self) {
        self.deferred.waiters.remove(self.ticket.take());
    }
}
