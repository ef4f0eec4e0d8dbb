use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::task::Waker;
use std::time::Instant;

/// State shared between a [`Sleep`](crate::time::Sleep) future and its
/// entry in the timer queue.
pub(crate) struct TimerShared {
    /// Set by the sleep future when it is dropped before firing.
    pub(crate) cancelled: Cell<bool>,

    /// Set by the timer queue when the deadline is reached.
    pub(crate) fired: Cell<bool>,

    /// Waker of the task currently awaiting the sleep.
    pub(crate) waker: RefCell<Waker>,
}

/// An entry in the scheduler's timer queue.
struct TimerEntry {
    deadline: Instant,

    /// Registration order, breaking ties between equal deadlines.
    seq: u64,

    shared: Rc<TimerShared>,
}

impl TimerEntry {
    fn key(&self) -> (Instant, u64) {
        (self.deadline, self.seq)
    }
}

impl Eq for TimerEntry {}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Ord for TimerEntry {
    /// Reversed so that `BinaryHeap` pops the earliest `(deadline, seq)`
    /// first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timers ordered by deadline, then by registration order.
pub(crate) struct TimerQueue {
    heap: BinaryHeap<TimerEntry>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn insert(&mut self, deadline: Instant, shared: Rc<TimerShared>) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(TimerEntry {
            deadline,
            seq,
            shared,
        });
    }

    /// Removes every timer due at `now` and returns the wakers to notify,
    /// earliest first. Cancelled timers are discarded.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Vec<Waker> {
        let mut due = Vec::new();

        while let Some(entry) = self.heap.peek() {
            if entry.deadline > now {
                break;
            }

            let Some(entry) = self.heap.pop() else {
                break;
            };

            if entry.shared.cancelled.get() {
                continue;
            }

            entry.shared.fired.set(true);
            due.push(entry.shared.waker.borrow().clone());
        }

        due
    }

    /// Deadline of the earliest live timer.
    pub(crate) fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(entry) = self.heap.peek() {
            if !entry.shared.cancelled.get() {
                return Some(entry.deadline);
            }
            self.heap.pop();
        }

        None
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }
}
