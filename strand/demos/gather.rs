//! Example: `gather` runs futures concurrently and collects their results
//! in input order.

use strand::task::gather;
use strand::time::{instrumented, sleep};
use std::time::Duration;

async fn fetch(id: u32) -> String {
    println!();
    println!("fetching for id: {id}");
    sleep(Duration::from_secs(1)).await;
    println!("fetching completed!");
    println!();
    format!("data fetched for {id}")
}

#[strand::main]
async fn main() {
    let (results, elapsed) = instrumented(gather([fetch(1), fetch(2)])).await;

    match results {
        Ok(results) => {
            for res in results {
                println!("{res}");
            }
        }
        Err(err) => eprintln!("{err}"),
    }

    println!("total time taken: {:.2} seconds", elapsed.as_secs_f64());
}
