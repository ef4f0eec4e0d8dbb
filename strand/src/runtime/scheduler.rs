use crate::runtime::observer::Observer;
use crate::runtime::queue::{ReadyQueue, TaskKey};
use crate::runtime::timer::{TimerQueue, TimerShared};
use crate::task::waker::{WakeSlot, make_waker};
use crate::task::{JoinHandle, Runnable, TaskCell, TaskId};
use crate::utils::Slab;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Waker};
use std::time::Instant;

use tracing::{debug, trace};

/// A task registered with the scheduler.
struct TaskSlot {
    runnable: Rc<dyn Runnable>,
    wake: Arc<WakeSlot>,
    waker: Waker,
}

/// The single-threaded scheduler behind a [`Runtime`](crate::Runtime).
///
/// It owns every task, the ready queue and the timer queue. Exactly one
/// task runs at a time; a task gives control back only by returning
/// `Poll::Pending` at a suspension point.
///
/// Scheduling proceeds in rounds:
/// 1. due timers fire, waking their tasks in deadline order,
/// 2. the tasks that are ready at the start of the round are polled in
///    FIFO order; tasks woken meanwhile wait for the next round,
/// 3. when nothing is ready, the thread parks until the next deadline or
///    an external wake-up.
pub(crate) struct Scheduler {
    tasks: RefCell<Slab<TaskSlot>>,
    ready: Arc<ReadyQueue>,
    timers: RefCell<TimerQueue>,
    observer: Option<Rc<dyn Observer>>,
    next_id: Cell<u64>,
}

impl Scheduler {
    pub(crate) fn new(task_capacity: usize, observer: Option<Rc<dyn Observer>>) -> Self {
        Self {
            tasks: RefCell::new(Slab::with_capacity(task_capacity)),
            ready: Arc::new(ReadyQueue::new()),
            timers: RefCell::new(TimerQueue::new()),
            observer,
            next_id: Cell::new(0),
        }
    }

    /// Registers a new task and queues it for its first poll.
    pub(crate) fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let cell = Rc::new(TaskCell::new(id, future, self.observer.clone()));
        let runnable: Rc<dyn Runnable> = cell.clone();

        let index = self.tasks.borrow_mut().insert_with(|index| {
            let wake = Arc::new(WakeSlot::new(TaskKey { index, id }, self.ready.clone()));
            let waker = make_waker(wake.clone());
            wake.schedule();

            TaskSlot {
                runnable,
                wake,
                waker,
            }
        });

        trace!(task = %id, slot = index, "task spawned");

        if let Some(observer) = &self.observer {
            observer.on_spawn(id);
        }

        JoinHandle::new(cell)
    }

    fn lookup(&self, key: TaskKey) -> Option<(Rc<dyn Runnable>, Arc<WakeSlot>, Waker)> {
        let tasks = self.tasks.borrow();
        let slot = tasks.get(key.index)?;

        // A stale wake-up for a finished task whose slot was reused.
        if slot.runnable.id() != key.id {
            return None;
        }

        Some((slot.runnable.clone(), slot.wake.clone(), slot.waker.clone()))
    }

    /// Polls every task that is ready at the start of the round, in the
    /// order they were woken. Returns the number of tasks polled.
    pub(crate) fn run_round(&self) -> usize {
        let batch = self.ready.len();
        let mut polled = 0;

        for _ in 0..batch {
            let Some(key) = self.ready.pop() else {
                break;
            };

            let Some((runnable, wake, waker)) = self.lookup(key) else {
                continue;
            };

            wake.clear();

            let mut cx = Context::from_waker(&waker);
            if runnable.run(&mut cx) {
                let finished = self.tasks.borrow_mut().remove(key.index);
                drop(finished);
            }

            polled += 1;
        }

        polled
    }

    /// Wakes the tasks whose timers are due.
    pub(crate) fn fire_timers(&self) -> usize {
        let due = self.timers.borrow_mut().pop_due(Instant::now());
        let fired = due.len();

        for waker in due {
            waker.wake();
        }

        if fired > 0 {
            trace!(fired, "timers fired");
        }

        fired
    }

    pub(crate) fn register_timer(&self, deadline: Instant, shared: Rc<TimerShared>) {
        self.timers.borrow_mut().insert(deadline, shared);
    }

    /// Parks the thread until a task becomes ready or the next timer is
    /// due. Returns immediately if a task is already ready.
    ///
    /// With no timer pending the wait only ends on a wake-up; if nothing
    /// can ever wake a task again, the run never returns.
    pub(crate) fn park(&self) {
        if self.ready.len() > 0 {
            return;
        }

        let deadline = self.timers.borrow_mut().next_deadline();
        self.ready.park(deadline);
    }

    /// Drops every unfinished task and pending timer at the end of a run.
    pub(crate) fn shutdown(&self) {
        let leftover = self.tasks.borrow_mut().drain();

        if !leftover.is_empty() {
            debug!(tasks = leftover.len(), "dropping unfinished tasks");
        }

        for slot in &leftover {
            slot.runnable.abandon();
        }
        drop(leftover);

        self.timers.borrow_mut().clear();
        self.ready.clear();
    }

    /// Number of live tasks.
    pub(crate) fn task_count(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub(crate) fn timer_count(&self) -> usize {
        self.timers.borrow().len()
    }
}
