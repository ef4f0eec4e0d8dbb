//! Example: one task waits on an `Event` another task sets.

use strand::sync::Event;
use strand::task;

use std::rc::Rc;

async fn waiter(event: Rc<Event>) {
    println!("waiting for the event to be set");
    event.wait().await;
    println!("event set, proceeding");
}

async fn setter(event: Rc<Event>) {
    println!("setting the event");
    event.set();
    println!("setting complete");
}

#[strand::main]
async fn main() {
    let event = Rc::new(Event::new());

    let (waiting, setting) = strand::join!(
        task::spawn(waiter(event.clone())),
        task::spawn(setter(event.clone())),
    );

    if let (Ok(()), Ok(())) = (waiting, setting) {
        println!("both tasks done");
    }
}
