use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

/// Wraps a future and measures how long it takes to complete.
///
/// The returned future resolves to the wrapped output together with the
/// time elapsed since its **first poll**, which is when a lazy computation
/// actually starts.
///
/// # Examples
///
/// ```rust,ignore
/// let (results, elapsed) = instrumented(gather(jobs)).await;
/// println!("total time taken: {:.2} seconds", elapsed.as_secs_f64());
/// ```
pub fn instrumented<F: Future>(future: F) -> Instrumented<F> {
    Instrumented {
        future: Box::pin(future),
        started: None,
    }
}

/// Future returned by [`instrumented`].
pub struct Instrumented<F> {
    future: Pin<Box<F>>,
    started: Option<Instant>,
}

impl<F: Future> Future for Instrumented<F> {
    type Output = (F::Output, Duration);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let started = *this.started.get_or_insert_with(Instant::now);

        match this.future.as_mut().poll(cx) {
            Poll::Ready(output) => Poll::Ready((output, started.elapsed())),
            Poll::Pending => Poll::Pending,
        }
    }
}
