//! Example: spawned tasks start eagerly and run concurrently.
//!
//! The runtime's own debug events are printed through `tracing-subscriber`,
//! and an [`Observer`] logs every task state transition.

use strand::task::{self, TaskId, TaskState};
use strand::time::{instrumented, sleep};
use strand::{Observer, Runtime};

use std::time::Duration;

use tracing::{Level, info};

struct Transitions;

impl Observer for Transitions {
    fn on_transition(&self, id: TaskId, from: TaskState, to: TaskState) {
        info!(task = %id, %from, %to, "transition");
    }
}

async fn fetch(id: u32) -> String {
    println!("fetching for id: {id}");
    sleep(Duration::from_secs(1)).await;
    println!("fetching completed!");
    format!("data fetched for {id}")
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let runtime = Runtime::builder().task_capacity(8).observer(Transitions).build();

    let outcome = runtime.block_on(instrumented(async {
        let t1 = task::spawn(fetch(1));
        let t2 = task::spawn(fetch(2));
        let t3 = task::spawn(fetch(3));

        let r1 = t1.await;
        let r2 = t2.await;
        let r3 = t3.await;

        println!("{r1:?}");
        println!("{r3:?}");
        println!("{r2:?}");
    }));

    match outcome {
        // About one second: the three fetches overlap.
        Ok(((), elapsed)) => println!("tasks completed in {:.2} seconds", elapsed.as_secs_f64()),
        Err(err) => eprintln!("run failed: {err}"),
    }
}
