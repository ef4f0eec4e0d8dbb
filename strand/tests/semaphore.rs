use strand::sync::Semaphore;
use strand::task::{self, gather};
use strand::time::sleep;
use strand::{Runtime, yield_now};

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Waker};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Enter(usize),
    Exit(usize),
}

#[test]
fn test_five_tasks_through_a_semaphore_of_two() {
    let rt = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let max_inside = Rc::new(Cell::new(0));
    let (l, m) = (log.clone(), max_inside.clone());

    rt.block_on(async move {
        let semaphore = Rc::new(Semaphore::new(2));
        let inside = Rc::new(Cell::new(0));

        let jobs = (0..5).map(|id| {
            let (semaphore, inside, log, max_inside) = (semaphore.clone(), inside.clone(), l.clone(), m.clone());

            async move {
                let _permit = semaphore.acquire().await;

                inside.set(inside.get() + 1);
                max_inside.set(max_inside.get().max(inside.get()));
                log.borrow_mut().push(Step::Enter(id));

                sleep(Duration::from_millis(10)).await;

                log.borrow_mut().push(Step::Exit(id));
                inside.set(inside.get() - 1);
            }
        });

        gather(jobs).await.unwrap();
        assert_eq!(semaphore.available_permits(), 2);
    })
    .unwrap();

    let log = log.borrow();
    let position = |step: Step| log.iter().position(|s| *s == step).unwrap();

    assert_eq!(max_inside.get(), 2);

    let entered: Vec<_> = log
        .iter()
        .filter_map(|s| match s {
            Step::Enter(id) => Some(*id),
            Step::Exit(_) => None,
        })
        .collect();
    assert_eq!(entered, vec![0, 1, 2, 3, 4]);

    let exited: Vec<_> = log
        .iter()
        .filter_map(|s| match s {
            Step::Exit(id) => Some(*id),
            Step::Enter(_) => None,
        })
        .collect();
    assert_eq!(exited, vec![0, 1, 2, 3, 4]);

    // First cohort {0, 1} enters together; each later task is admitted by
    // the release two places ahead of it.
    assert!(position(Step::Enter(1)) < position(Step::Exit(0)));
    for id in 2..5 {
        assert!(position(Step::Exit(id - 2)) < position(Step::Enter(id)));
    }
}

#[test]
fn test_released_permit_goes_to_the_queue_head() {
    let rt = Runtime::new();

    rt.block_on(async {
        let semaphore = Rc::new(Semaphore::new(1));
        let held = semaphore.try_acquire().unwrap();

        let s = semaphore.clone();
        let queued = task::spawn(async move {
            let _permit = s.acquire().await;
            "admitted"
        });

        yield_now().await;
        assert_eq!(semaphore.waiting(), 1);

        drop(held);
        assert_eq!(semaphore.available_permits(), 0);
        assert_eq!(semaphore.waiting(), 0);
        assert!(semaphore.try_acquire().is_none());

        assert_eq!(queued.await, Ok("admitted"));
        assert_eq!(semaphore.available_permits(), 1);
    })
    .unwrap();
}

#[test]
fn test_dropped_acquire_leaves_the_queue() {
    let semaphore = Semaphore::new(1);
    let mut cx = Context::from_waker(Waker::noop());

    let held = semaphore.try_acquire().unwrap();

    {
        let mut acquire = pin!(semaphore.acquire());
        assert!(acquire.as_mut().poll(&mut cx).is_pending());
        assert_eq!(semaphore.waiting(), 1);
    }

    assert_eq!(semaphore.waiting(), 0);
    drop(held);
    assert_eq!(semaphore.available_permits(), 1);
}

#[test]
fn test_granted_but_dropped_acquire_passes_the_permit_on() {
    let semaphore = Semaphore::new(1);
    let mut cx = Context::from_waker(Waker::noop());

    let held = semaphore.try_acquire().unwrap();

    let mut first = Box::pin(semaphore.acquire());
    let mut second = Box::pin(semaphore.acquire());
    assert!(first.as_mut().poll(&mut cx).is_pending());
    assert!(second.as_mut().poll(&mut cx).is_pending());

    drop(held);
    assert_eq!(semaphore.waiting(), 1);

    drop(first);
    assert_eq!(semaphore.waiting(), 0);

    let permit = match second.as_mut().poll(&mut cx) {
        std::task::Poll::Ready(permit) => permit,
        std::task::Poll::Pending => panic!("permit should have been handed on"),
    };

    assert_eq!(semaphore.available_permits(), 0);
    drop(permit);
    assert_eq!(semaphore.available_permits(), 1);
}

#[test]
fn test_try_acquire_respects_capacity() {
    let semaphore = Semaphore::new(2);
    assert_eq!(semaphore.capacity(), 2);

    let a = semaphore.try_acquire();
    let b = semaphore.try_acquire();
    let c = semaphore.try_acquire();

    assert!(a.is_some() && b.is_some());
    assert!(c.is_none());
    assert_eq!(semaphore.available_permits(), 0);

    drop(a);
    assert_eq!(semaphore.available_permits(), 1);
}

#[test]
#[should_panic(expected = "semaphore capacity must be > 0")]
fn test_zero_capacity_panics() {
    Semaphore::new(0);
}
