use crate::runtime::scheduler::Scheduler;

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    /// Scheduler of the run currently executing on this thread.
    ///
    /// Set for the duration of [`Runtime::block_on`](crate::Runtime::block_on),
    /// so that `spawn`, `sleep` and friends reach the scheduler without
    /// having a handle passed down to them.
    static CURRENT: RefCell<Option<Rc<Scheduler>>> = const { RefCell::new(None) };
}

/// Restores the previous context, on return and on unwind alike.
struct Reset(Option<Rc<Scheduler>>);

impl Drop for Reset {
    fn drop(&mut self) {
        let prev = self.0.take();
        CURRENT.with(|cell| *cell.borrow_mut() = prev);
    }
}

/// Runs `f` with `scheduler` installed as the current scheduler.
pub(crate) fn enter<R>(scheduler: Rc<Scheduler>, f: impl FnOnce() -> R) -> R {
    let prev = CURRENT.with(|cell| cell.replace(Some(scheduler)));
    let _reset = Reset(prev);

    f()
}

/// The scheduler of the current run, if any.
pub(crate) fn current() -> Option<Rc<Scheduler>> {
    CURRENT.with(|cell| cell.borrow().clone())
}
