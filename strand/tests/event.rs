use strand::sync::Event;
use strand::task;
use strand::{Runtime, yield_now};

use std::cell::RefCell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Waker};

#[test]
fn test_set_releases_every_waiter_in_order() {
    let rt = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();

    rt.block_on(async move {
        let event = Rc::new(Event::new());

        let waiters: Vec<_> = (0..3)
            .map(|id| {
                let (event, log) = (event.clone(), l.clone());
                task::spawn(async move {
                    event.wait().await;
                    log.borrow_mut().push(format!("released {id}"));
                })
            })
            .collect();

        yield_now().await;
        assert_eq!(event.waiting(), 3);

        l.borrow_mut().push(String::from("set"));
        event.set();
        assert_eq!(event.waiting(), 0);

        for waiter in waiters {
            waiter.await.unwrap();
        }
    })
    .unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["set", "released 0", "released 1", "released 2"]
    );
}

#[test]
fn test_wait_after_set_does_not_suspend() {
    let event = Event::new();
    event.set();

    let mut cx = Context::from_waker(Waker::noop());
    let wait = pin!(event.wait());

    assert!(wait.poll(&mut cx).is_ready());
}

#[test]
fn test_set_is_terminal() {
    let event = Event::new();
    assert!(!event.is_set());

    event.set();
    event.set();

    assert!(event.is_set());
}

#[test]
fn test_waiter_and_setter_gathered() {
    let rt = Runtime::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();

    rt.block_on(async move {
        let event = Rc::new(Event::new());

        let (e, log) = (event.clone(), l.clone());
        let waiter = task::spawn(async move {
            log.borrow_mut().push("waiting for the event");
            e.wait().await;
            log.borrow_mut().push("event set, proceeding");
        });

        let (e, log) = (event.clone(), l.clone());
        let setter = task::spawn(async move {
            log.borrow_mut().push("setting the event");
            e.set();
            log.borrow_mut().push("setting complete");
        });

        waiter.await.unwrap();
        setter.await.unwrap();
    })
    .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "waiting for the event",
            "setting the event",
            "setting complete",
            "event set, proceeding",
        ]
    );
}

#[test]
fn test_dropped_wait_is_unregistered() {
    let event = Event::new();
    let mut cx = Context::from_waker(Waker::noop());

    {
        let mut wait = pin!(event.wait());
        assert!(wait.as_mut().poll(&mut cx).is_pending());
        assert!(wait.as_mut().poll(&mut cx).is_pending());
        assert_eq!(event.waiting(), 1);
    }

    assert_eq!(event.waiting(), 0);
}
