use strand::task::{self, TaskState};
use strand::time::sleep;
use strand::{Observer, Runtime, RuntimeBuilder, TaskError, yield_now};

use std::cell::{Cell, RefCell};
use std::future::poll_fn;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::task::{Poll, Waker};
use std::thread;
use std::time::{Duration, Instant};

async fn fail_with(message: &'static str) -> u32 {
    panic!("{message}")
}

#[test]
fn test_block_on_returns_entry_output() {
    let rt = Runtime::new();

    let result = rt.block_on(async { 42 });

    assert_eq!(result, Ok(42));
}

#[test]
fn test_runtime_is_reusable() {
    let rt = RuntimeBuilder::new().task_capacity(1).build();

    assert_eq!(rt.block_on(async { 1 }), Ok(1));
    assert_eq!(rt.block_on(async { 2 }), Ok(2));
}

#[test]
fn test_spawned_task_runs_without_being_awaited() {
    let rt = Runtime::new();
    let flag = Rc::new(Cell::new(false));
    let f = flag.clone();

    let observed = rt.block_on(async move {
        task::spawn(async move { f.set(true) });
        yield_now().await;
        flag.get()
    });

    assert_eq!(observed, Ok(true));
}

#[test]
fn test_plain_future_runs_only_when_awaited() {
    let rt = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();

    rt.block_on(async move {
        let inner = l.clone();
        let fetch = async move { inner.borrow_mut().push("fetching") };

        l.borrow_mut().push("created");
        yield_now().await;
        l.borrow_mut().push("awaiting");
        fetch.await;
        l.borrow_mut().push("done");
    })
    .unwrap();

    assert_eq!(*log.borrow(), vec!["created", "awaiting", "fetching", "done"]);
}

#[test]
fn test_awaiting_finished_task_is_memoized() {
    let rt = Runtime::new();
    let runs = Rc::new(Cell::new(0));
    let r = runs.clone();

    let results = rt.block_on(async move {
        let handle = task::spawn(async move {
            r.set(r.get() + 1);
            7
        });

        let first = handle.clone().await;
        let second = handle.clone().await;
        let third = handle.await;
        (first, second, third)
    });

    assert_eq!(results, Ok((Ok(7), Ok(7), Ok(7))));
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_entry_failure_is_returned() {
    let rt = Runtime::new();

    let result = rt.block_on(fail_with("boom"));

    match result {
        Err(TaskError::Panicked { message, .. }) => assert_eq!(message, "boom"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_failure_surfaces_to_the_awaiter_only() {
    let rt = Runtime::new();

    let result = rt.block_on(async {
        let handle = task::spawn(fail_with("inner"));
        let id = handle.id();
        let outcome = handle.await;

        (id, outcome, "still running")
    });

    let (id, outcome, tail) = result.unwrap();
    let err = outcome.unwrap_err();
    assert_eq!(err.id(), id);
    assert_eq!(err.to_string(), format!("task {id} panicked: inner"));
    assert_eq!(tail, "still running");
}

#[test]
fn test_handle_reports_lifecycle_state() {
    let rt = Runtime::new();

    rt.block_on(async {
        let handle = task::spawn(async {
            sleep(Duration::from_millis(5)).await;
        });
        assert_eq!(handle.state(), TaskState::Pending);
        assert!(handle.result().is_none());

        yield_now().await;
        assert_eq!(handle.state(), TaskState::Suspended);

        let failing = task::spawn(fail_with("x"));

        handle.clone().await.unwrap();
        assert_eq!(handle.state(), TaskState::Completed);
        assert!(handle.is_finished());
        assert_eq!(handle.result(), Some(Ok(())));

        assert!(failing.clone().await.is_err());
        assert_eq!(failing.state(), TaskState::Failed);
    })
    .unwrap();
}

#[test]
fn test_ready_tasks_resume_in_fifo_order() {
    let rt = Runtime::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let o = order.clone();

    rt.block_on(async move {
        let handles: Vec<_> = (0..3)
            .map(|i| {
                let order = o.clone();
                task::spawn(async move {
                    order.borrow_mut().push(i);
                    yield_now().await;
                    order.borrow_mut().push(i);
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
    })
    .unwrap();

    assert_eq!(*order.borrow(), vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_runtime_spawn_before_run() {
    let rt = Runtime::new();

    let handle = rt.spawn(async { 5 });
    assert_eq!(handle.state(), TaskState::Pending);

    let result = rt.block_on(async move { handle.await });

    assert_eq!(result, Ok(Ok(5)));
}

struct SetOnDrop(Rc<Cell<bool>>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

#[test]
fn test_unfinished_tasks_are_dropped_with_the_run() {
    let rt = Runtime::new();
    let dropped = Rc::new(Cell::new(false));
    let guard = SetOnDrop(dropped.clone());

    let start = Instant::now();
    rt.block_on(async move {
        task::spawn(async move {
            let _guard = guard;
            sleep(Duration::from_secs(60)).await;
        });
        yield_now().await;
    })
    .unwrap();

    assert!(dropped.get());
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_nested_block_on_fails_the_entry_task() {
    let rt = Runtime::new();

    let result = rt.block_on(async { Runtime::new().block_on(async {}).is_ok() });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("cannot start a runtime from within a runtime"));
}

#[test]
#[should_panic(expected = "spawn must be called within the context of a runtime")]
fn test_spawn_outside_runtime_panics() {
    task::spawn(async {});
}

#[test]
#[should_panic(expected = "task_capacity must be > 0")]
fn test_zero_task_capacity_panics() {
    RuntimeBuilder::new().task_capacity(0);
}

#[test]
fn test_wake_from_another_thread() {
    let rt = Runtime::new();
    let (tx, rx) = mpsc::channel::<Waker>();
    let done = Arc::new(AtomicBool::new(false));
    let flag = done.clone();

    let waker_thread = thread::spawn(move || {
        let waker = rx.recv().unwrap();
        thread::sleep(Duration::from_millis(10));
        flag.store(true, Ordering::SeqCst);
        waker.wake();
    });

    let result = rt.block_on(async move {
        let mut sent = false;

        poll_fn(|cx| {
            if done.load(Ordering::SeqCst) {
                return Poll::Ready("woken");
            }

            if !sent {
                tx.send(cx.waker().clone()).unwrap();
                sent = true;
            }

            Poll::Pending
        })
        .await
    });

    waker_thread.join().unwrap();
    assert_eq!(result, Ok("woken"));
}

#[derive(Clone, Default)]
struct Recorder {
    spawned: Rc<Cell<usize>>,
    transitions: Rc<RefCell<Vec<(TaskState, TaskState)>>>,
}

impl Observer for Recorder {
    fn on_spawn(&self, _id: task::TaskId) {
        self.spawned.set(self.spawned.get() + 1);
    }

    fn on_transition(&self, _id: task::TaskId, from: TaskState, to: TaskState) {
        self.transitions.borrow_mut().push((from, to));
    }
}

#[test]
fn test_observer_sees_every_transition() {
    let recorder = Recorder::default();
    let rt = Runtime::builder().observer(recorder.clone()).build();

    rt.block_on(async {
        yield_now().await;
    })
    .unwrap();

    assert_eq!(recorder.spawned.get(), 1);
    assert_eq!(
        *recorder.transitions.borrow(),
        vec![
            (TaskState::Pending, TaskState::Running),
            (TaskState::Running, TaskState::Suspended),
            (TaskState::Suspended, TaskState::Running),
            (TaskState::Running, TaskState::Completed),
        ]
    );
}

#[strand::test]
async fn test_attribute_runs_async_body() {
    let handle = task::spawn(async { "from a task" });

    assert_eq!(handle.await, Ok("from a task"));
}
