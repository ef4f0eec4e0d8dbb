//! Example: a `Deferred` value filled in by another task.

use strand::sync::Deferred;
use strand::task;
use strand::time::sleep;

use std::rc::Rc;
use std::time::Duration;

async fn set_value(slot: Rc<Deferred<String>>) {
    println!("setting the value after 1 second...");
    sleep(Duration::from_secs(1)).await;

    if let Err(err) = slot.set(String::from("Hello from the future!")) {
        eprintln!("{err}");
    }
}

#[strand::main]
async fn main() {
    let slot = Rc::new(Deferred::new());

    task::spawn(set_value(slot.clone()));

    println!("waiting for the result...");
    let result = slot.wait().await;
    println!("got result: {result}");
}
