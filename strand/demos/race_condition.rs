//! Example: the lost update that `lock` prevents.
//!
//! Each task reads the shared value, suspends, then writes back what it
//! read plus one. All four read `0`, so the final value is `1`.

use strand::task::gather;
use strand::time::sleep;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

async fn update(resource: Rc<Cell<u32>>) {
    let read = resource.get();

    println!();
    println!("resource before update: {read}");

    sleep(Duration::ZERO).await;

    resource.set(read + 1);
    println!("after update: {}", resource.get());
    println!();
}

#[strand::main]
async fn main() {
    let resource = Rc::new(Cell::new(0));

    let updates = (0..4).map(|_| update(resource.clone()));
    if let Err(err) = gather(updates).await {
        eprintln!("{err}");
    }

    println!("final value: {}", resource.get());
}
