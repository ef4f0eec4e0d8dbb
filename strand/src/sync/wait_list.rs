use std::cell::{Cell, RefCell};
use std::mem;
use std::task::Waker;

/// A registration ticket held by a waiting future.
///
/// The epoch pins the ticket to one generation of the list, so a ticket
/// issued before [`WaitList::wake_all`] can never address a slot handed to
/// a later waiter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ticket {
    epoch: u64,
    index: usize,
}

/// Wakers parked on a broadcast condition (task completion, an event, a
/// deferred value).
///
/// Waiters are woken in registration order.
#[derive(Default)]
pub(crate) struct WaitList {
    slots: RefCell<Vec<Option<Waker>>>,
    epoch: Cell<u64>,
}

impl WaitList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `waker`, or refreshes the waker behind an existing ticket.
    pub(crate) fn register(&self, ticket: &mut Option<Ticket>, waker: &Waker) {
        let mut slots = self.slots.borrow_mut();

        if let Some(t) = ticket
            && t.epoch == self.epoch.get()
            && let Some(slot) = slots.get_mut(t.index)
        {
            match slot {
                Some(existing) if existing.will_wake(waker) => {}
                _ => *slot = Some(waker.clone()),
            }
            return;
        }

        slots.push(Some(waker.clone()));
        *ticket = Some(Ticket {
            epoch: self.epoch.get(),
            index: slots.len() - 1,
        });
    }

    /// Withdraws a registration. Stale tickets are ignored.
    pub(crate) fn remove(&self, ticket: Option<Ticket>) {
        let Some(t) = ticket else {
            return;
        };

        if t.epoch != self.epoch.get() {
            return;
        }

        if let Some(slot) = self.slots.borrow_mut().get_mut(t.index) {
            *slot = None;
        }
    }

    /// Wakes every registered waiter and starts a new epoch.
    pub(crate) fn wake_all(&self) -> usize {
        let slots = mem::take(&mut *self.slots.borrow_mut());
        self.epoch.set(self.epoch.get() + 1);

        let mut woken = 0;
        for waker in slots.into_iter().flatten() {
            waker.wake();
            woken += 1;
        }

        woken
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().iter().filter(|s| s.is_some()).count()
    }
}
