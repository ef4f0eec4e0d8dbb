//! Example: a semaphore of two lets at most two tasks in at a time.

use strand::sync::Semaphore;
use strand::task::gather;
use strand::time::sleep;

use std::rc::Rc;
use std::time::Duration;

async fn access_resource(semaphore: Rc<Semaphore>, id: u32) {
    let _permit = semaphore.acquire().await;

    println!("accessing resource with id: {id}");
    sleep(Duration::from_secs(1)).await;
    println!("releasing resource with id: {id}");
}

#[strand::main]
async fn main() {
    let semaphore = Rc::new(Semaphore::new(2));

    let accesses = (0..5).map(|id| access_resource(semaphore.clone(), id));
    if let Err(err) = gather(accesses).await {
        eprintln!("{err}");
    }
}
