use crate::runtime::queue::{ReadyQueue, TaskKey};

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{RawWaker, RawWakerVTable, Waker};

/// The state a task's [`Waker`] points at.
///
/// Tasks themselves live on the scheduler thread and are never shared; the
/// waker only carries the task's key and a handle to the ready queue. The
/// `queued` flag keeps a task from being queued twice between two polls.
pub(crate) struct WakeSlot {
    key: TaskKey,
    queued: AtomicBool,
    queue: Arc<ReadyQueue>,
}

impl WakeSlot {
    pub(crate) fn new(key: TaskKey, queue: Arc<ReadyQueue>) -> Self {
        Self {
            key,
            queued: AtomicBool::new(false),
            queue,
        }
    }

    /// Queues the task unless it is already waiting in the ready queue.
    pub(crate) fn schedule(&self) {
        if !self.queued.swap(true, Ordering::AcqRel) {
            self.queue.push(self.key);
        }
    }

    /// Called by the scheduler right before polling, so that a wake-up
    /// issued during the poll queues the task again.
    pub(crate) fn clear(&self) {
        self.queued.store(false, Ordering::Release);
    }
}

static VTABLE: RawWakerVTable = RawWakerVTable::new(clone_raw, wake_raw, wake_by_ref_raw, drop_raw);

/// Creates a [`Waker`] that re-queues the task behind `slot`.
///
/// The pointer stored in the `RawWaker` comes from `Arc::into_raw`, and
/// every vtable function below keeps the reference count balanced.
pub(crate) fn make_waker(slot: Arc<WakeSlot>) -> Waker {
    unsafe { Waker::from_raw(RawWaker::new(Arc::into_raw(slot) as *const (), &VTABLE)) }
}

fn clone_raw(ptr: *const ()) -> RawWaker {
    let arc = unsafe { Arc::from_raw(ptr as *const WakeSlot) };
    let cloned = arc.clone();
    mem::forget(arc);

    RawWaker::new(Arc::into_raw(cloned) as *const (), &VTABLE)
}

fn wake_raw(ptr: *const ()) {
    let arc = unsafe { Arc::from_raw(ptr as *const WakeSlot) };
    arc.schedule();
}

fn wake_by_ref_raw(ptr: *const ()) {
    let arc = unsafe { Arc::from_raw(ptr as *const WakeSlot) };
    arc.schedule();
    mem::forget(arc);
}

fn drop_raw(ptr: *const ()) {
    unsafe { drop(Arc::from_raw(ptr as *const WakeSlot)) };
}
