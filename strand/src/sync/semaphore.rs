use super::Exclusive;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use tracing::trace;

/// A counting semaphore.
///
/// Up to `capacity` tasks hold a [`Permit`] at the same time. A task that
/// finds no permit left is suspended and queued; waiters are served
/// strictly in arrival order.
///
/// A released permit never returns to the pool while tasks are queued:
/// it is handed directly to the head of the queue, so a task arriving
/// later cannot overtake one that is already waiting.
///
/// The semaphore is shared between tasks behind an `Rc`.
pub struct Semaphore {
    capacity: usize,
    state: RefCell<State>,
}

struct State {
    /// Permits available to new arrivals. Always `0` while `queue` is not
    /// empty.
    permits: usize,

    queue: VecDeque<Rc<Waiter>>,
}

/// A task queued on the semaphore.
struct Waiter {
    /// Set when a releasing task hands its permit to this waiter.
    granted: Cell<bool>,

    waker: RefCell<Waker>,
}

impl Semaphore {
    /// Creates a semaphore with `capacity` permits, all available.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "semaphore capacity must be > 0");

        Self {
            capacity,
            state: RefCell::new(State {
                permits: capacity,
                queue: VecDeque::new(),
            }),
        }
    }

    /// The number of permits the semaphore was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of permits that can be acquired without suspending.
    pub fn available_permits(&self) -> usize {
        self.state.borrow().permits
    }

    /// The number of tasks queued for a permit.
    pub fn waiting(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Returns a future resolving to a permit.
    ///
    /// The future completes immediately when a permit is available.
    /// Otherwise the task is queued behind the current waiters and
    /// suspended until a permit is handed to it.
    ///
    /// Dropping the future gives up the place in the queue.
    pub fn acquire(&self) -> Acquire<'_> {
        Acquire {
            semaphore: self,
            waiter: None,
        }
    }

    /// Takes a permit if one is available right now.
    pub fn try_acquire(&self) -> Option<Permit<'_>> {
        let mut state = self.state.borrow_mut();

        if state.permits == 0 {
            return None;
        }

        state.permits -= 1;
        Some(Permit { semaphore: self })
    }

    /// Gives a permit back: to the head waiter if there is one, to the
    /// pool otherwise.
    fn release(&self) {
        let next = {
            let mut state = self.state.borrow_mut();

            match state.queue.pop_front() {
                Some(waiter) => Some(waiter),
                None => {
                    state.permits += 1;
                    debug_assert!(state.permits <= self.capacity);
                    None
                }
            }
        };

        if let Some(waiter) = next {
            trace!("permit handed to queued waiter");

            waiter.granted.set(true);
            waiter.waker.borrow().wake_by_ref();
        }
    }

    /// Removes a waiter that gave up before being granted a permit.
    fn withdraw(&self, waiter: &Rc<Waiter>) {
        self.state
            .borrow_mut()
            .queue
            .retain(|queued| !Rc::ptr_eq(queued, waiter));
    }
}

impl Exclusive for Semaphore {
    fn acquire(&self) -> Acquire<'_> {
        Semaphore::acquire(self)
    }

    fn try_acquire(&self) -> Option<Permit<'_>> {
        Semaphore::try_acquire(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn available(&self) -> usize {
        self.available_permits()
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();

        f.debug_struct("Semaphore")
            .field("capacity", &self.capacity)
            .field("permits", &state.permits)
            .field("waiting", &state.queue.len())
            .finish()
    }
}

/// Future returned by [`Semaphore::acquire`] and [`Exclusive::acquire`].
pub struct Acquire<'a> {
    semaphore: &'a Semaphore,

    /// Our place in the queue, once we had to wait.
    waiter: Option<Rc<Waiter>>,
}

impl<'a> Future for Acquire<'a> {
    type Output = Permit<'a>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let semaphore = this.semaphore;

        if let Some(waiter) = &this.waiter {
            if waiter.granted.get() {
                this.waiter = None;
                return Poll::Ready(Permit { semaphore });
            }

            let mut waker = waiter.waker.borrow_mut();
            if !waker.will_wake(cx.waker()) {
                *waker = cx.waker().clone();
            }

            return Poll::Pending;
        }

        let mut state = semaphore.state.borrow_mut();

        if state.permits > 0 && state.queue.is_empty() {
            state.permits -= 1;
            return Poll::Ready(Permit { semaphore });
        }

        let waiter = Rc::new(Waiter {
            granted: Cell::new(false),
            waker: RefCell::new(cx.waker().clone()),
        });

        state.queue.push_back(waiter.clone());
        trace!(position = state.queue.len(), "queued for a permit");

        this.waiter = Some(waiter);
        Poll::Pending
    }
}

impl Drop for Acquire<'_> {
    fn drop(&mut self) {
        let Some(waiter) = self.waiter.take() else {
            return;
        };

        if waiter.granted.get() {
            // Handed a permit we will never use: pass it on.
            self.semaphore.release();
        } else {
            self.semaphore.withdraw(&waiter);
        }
    }
}

/// A permit from a [`Semaphore`] (or a held [`Lock`](super::Lock)).
///
/// The permit is released when dropped, on every exit path of the scope
/// holding it, including a panic unwinding out of the task.
#[must_use = "the permit is released as soon as it is dropped"]
pub struct Permit<'a> {
    semaphore: &'a Semaphore,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}

impl fmt::Debug for Permit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permit").finish_non_exhaustive()
    }
}
