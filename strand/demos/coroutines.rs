//! Example: futures are lazy and only start when awaited.

use strand::time::sleep;
use std::time::Duration;

async fn get_data(delay: Duration, id: &str) -> String {
    println!();
    println!("fetching for id: {id}");
    sleep(delay).await;
    println!("fetching complete");
    println!();
    format!("data fetched for {id}")
}

#[strand::main]
async fn main() {
    println!("start of main");

    // Nothing runs yet: an un-awaited future is inert.
    let first = get_data(Duration::from_secs(1), "a");
    let second = get_data(Duration::from_secs(1), "b");

    println!("now starting the fetching below!");

    // Awaited one after the other, so this takes two seconds.
    let res = first.await;
    println!("done, result: {res}");
    let res = second.await;
    println!("done, result: {res}");

    println!("end of main");
}
