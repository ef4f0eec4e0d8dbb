//! Example: a `Lock` serializes read-modify-write sections that span a
//! suspension point.

use strand::sync::Lock;
use strand::task::gather;
use strand::time::sleep;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

async fn update(lock: Rc<Lock>, resource: Rc<Cell<u32>>) {
    let _held = lock.acquire().await;

    println!();
    println!("resource before update: {}", resource.get());
    resource.set(resource.get() + 1);
    sleep(Duration::from_secs(1)).await;
    println!("after update: {}", resource.get());
    println!();
}

#[strand::main]
async fn main() {
    let lock = Rc::new(Lock::new());
    let resource = Rc::new(Cell::new(0));

    let updates = (0..4).map(|_| update(lock.clone(), resource.clone()));
    if let Err(err) = gather(updates).await {
        eprintln!("{err}");
    }

    println!("final value: {}", resource.get());
}
