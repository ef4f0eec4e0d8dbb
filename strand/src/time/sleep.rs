use crate::runtime::context;
use crate::runtime::timer::TimerShared;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

/// Creates a future that completes after the given duration.
///
/// Sleeping is a suspension point even for a zero duration: the task is
/// parked at least once and resumes after every task already ready, in
/// timer order. `sleep(Duration::ZERO)` is therefore a yield that goes
/// through the timer queue.
///
/// # Panics
///
/// Panics if polled outside of a running runtime.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
///
/// sleep(Duration::from_millis(10)).await;
/// ```
pub fn sleep(duration: Duration) -> Sleep {
    Sleep::new(Instant::now() + duration)
}

/// Creates a future that completes once `deadline` is reached.
///
/// See [`sleep`].
pub fn sleep_until(deadline: Instant) -> Sleep {
    Sleep::new(deadline)
}

/// Future returned by [`sleep`] and [`sleep_until`].
///
/// The timer is registered on first poll and cancelled if the future is
/// dropped before completion.
pub struct Sleep {
    deadline: Instant,

    /// Shared with the scheduler's timer queue once registered.
    timer: Option<Rc<TimerShared>>,
}

impl Sleep {
    fn new(deadline: Instant) -> Self {
        Self {
            deadline,
            timer: None,
        }
    }

    /// The instant at which the sleep completes.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let Some(timer) = &this.timer else {
            let shared = Rc::new(TimerShared {
                cancelled: Cell::new(false),
                fired: Cell::new(false),
                waker: RefCell::new(cx.waker().clone()),
            });

            context::current()
                .expect("Sleep polled outside of runtime")
                .register_timer(this.deadline, shared.clone());

            this.timer = Some(shared);
            return Poll::Pending;
        };

        if timer.fired.get() {
            return Poll::Ready(());
        }

        let mut waker = timer.waker.borrow_mut();
        if !waker.will_wake(cx.waker()) {
            *waker = cx.waker().clone();
        }

        Poll::Pending
    }
}

impl Drop for Sleep {
    fn drop(&mut self) {
        if let Some(timer) = &self.timer {
            timer.cancelled.set(true);
        }
    }
}
