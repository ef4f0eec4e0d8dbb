//! Example: a `TaskGroup` waits for all of its members before the scope
//! moves on.

use strand::task::TaskGroup;
use strand::time::{instrumented, sleep};
use std::time::Duration;

async fn fetch(id: u32) -> String {
    println!("fetching for id: {id}");
    sleep(Duration::from_secs(1)).await;
    println!("fetching completed!");
    format!("data fetched for {id}")
}

#[strand::main]
async fn main() {
    let ((), elapsed) = instrumented(async {
        let mut group = TaskGroup::new();
        let handles: Vec<_> = (0..2).map(|i| group.spawn(fetch(i))).collect();

        if let Err(err) = group.wait().await {
            eprintln!("group failed: {err}");
            return;
        }

        for handle in &handles {
            if let Some(Ok(res)) = handle.result() {
                println!("received result: {res}");
            }
        }
    })
    .await;

    println!("total time taken: {:.2} seconds", elapsed.as_secs_f64());
}
