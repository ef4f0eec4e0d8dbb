use strand::task::{self, gather};
use strand::time::{instrumented, sleep, sleep_until};
use strand::{Runtime, yield_now};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[strand::test]
async fn test_sleep_basic() {
    let start = Instant::now();
    sleep(Duration::from_millis(50)).await;

    assert!(
        start.elapsed() >= Duration::from_millis(50),
        "Sleep should wait at least the specified duration"
    );
}

#[strand::test]
async fn test_sleep_until_deadline() {
    let deadline = Instant::now() + Duration::from_millis(20);
    let timer = sleep_until(deadline);
    assert_eq!(timer.deadline(), deadline);

    timer.await;
    assert!(Instant::now() >= deadline);
}

#[test]
fn test_zero_sleep_is_a_suspension_point() {
    let rt = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();

    rt.block_on(async move {
        let (a_log, b_log) = (l.clone(), l.clone());

        let a = task::spawn(async move {
            a_log.borrow_mut().push("a1");
            sleep(Duration::ZERO).await;
            a_log.borrow_mut().push("a2");
        });
        let b = task::spawn(async move {
            b_log.borrow_mut().push("b1");
            b_log.borrow_mut().push("b2");
        });

        a.await.unwrap();
        b.await.unwrap();
    })
    .unwrap();

    assert_eq!(*log.borrow(), vec!["a1", "b1", "b2", "a2"]);
}

#[test]
fn test_timers_fire_in_deadline_order() {
    let rt = Runtime::new();
    let woken = Rc::new(RefCell::new(Vec::new()));
    let w = woken.clone();

    rt.block_on(async move {
        let sleepers = [30u64, 10, 20].map(|ms| {
            let woken = w.clone();
            async move {
                sleep(Duration::from_millis(ms)).await;
                woken.borrow_mut().push(ms);
            }
        });

        gather(sleepers).await.unwrap();
    })
    .unwrap();

    assert_eq!(*woken.borrow(), vec![10, 20, 30]);
}

#[test]
fn test_yield_now_lets_ready_tasks_run() {
    let rt = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();

    rt.block_on(async move {
        let other = l.clone();
        let handle = task::spawn(async move { other.borrow_mut().push("other") });

        l.borrow_mut().push("before yield");
        yield_now().await;
        l.borrow_mut().push("after yield");

        handle.await.unwrap();
    })
    .unwrap();

    assert_eq!(*log.borrow(), vec!["before yield", "other", "after yield"]);
}

#[strand::test]
async fn test_instrumented_measures_from_first_poll() {
    let created = Instant::now();
    let measured = instrumented(async { sleep(Duration::from_millis(30)).await });

    sleep(Duration::from_millis(20)).await;
    let ((), elapsed) = measured.await;

    assert!(elapsed >= Duration::from_millis(30));
    assert!(elapsed < created.elapsed());
}
