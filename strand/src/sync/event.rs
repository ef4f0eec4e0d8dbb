use super::wait_list::{Ticket, WaitList};

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tracing::debug;

/// A one-shot broadcast flag.
///
/// Tasks [`wait`](Self::wait) until some task calls [`set`](Self::set).
/// Setting the event releases every waiter at once, in the order they
/// started waiting; once set, the event stays set and later waits return
/// without suspending. There is no reset.
#[derive(Default)]
pub struct Event {
    set: Cell<bool>,
    waiters: WaitList,
}

impl Event {
    /// Creates an event in the unset state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.set.get()
    }

    /// Sets the event and wakes every waiting task.
    ///
    /// Setting an event that is already set has no effect.
    pub fn set(&self) {
        if self.set.replace(true) {
            return;
        }

        let woken = self.waiters.wake_all();
        debug!(woken, "event set");
    }

    /// Returns a future that resolves once the event is set.
    pub fn wait(&self) -> EventWait<'_> {
        EventWait {
            event: self,
            ticket: None,
        }
    }

    /// The number of tasks currently waiting.
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }
}

/// Future returned by [`Event::wait`].
pub struct EventWait<'a> {
    event: &'a Event,
    ticket: Option<Ticket>,
}

impl Future for EventWait<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.event.is_set() {
            this.event.waiters.remove(this.ticket.take());
            return Poll::Ready(());
        }

        this.event.waiters.register(&mut this.ticket, cx.waker());
        Poll::Pending
    }
}

impl Drop for EventWait<'_> {
    fn drop(&mut self) {
        self.event.waiters.remove(self.ticket.take());
    }
}
