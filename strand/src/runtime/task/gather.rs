use super::{JoinHandle, spawn};
use crate::TaskError;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Spawns every future in `futures` and waits for all of them.
///
/// All futures are spawned at the call, so they run concurrently whether
/// or not the returned [`JoinAll`] is awaited right away. See
/// [`join_all`] for ordering and failure semantics.
///
/// # Panics
///
/// Panics if called outside the context of a running runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let pages = gather((1..=3).map(|id| fetch(id))).await?;
/// ```
pub fn gather<I>(futures: I) -> JoinAll<<I::Item as Future>::Output>
where
    I: IntoIterator,
    I::Item: Future + 'static,
    <I::Item as Future>::Output: Clone + 'static,
{
    join_all(futures.into_iter().map(spawn).collect())
}

/// Waits for a set of already spawned tasks.
///
/// Results come back in the order of `handles`, independent of the order
/// in which the tasks finish.
///
/// Failure is deliberately weak: the first failed task seen while
/// scanning `handles` in order makes the whole await fail with that
/// task's error, right away. The remaining tasks are **not** cancelled and
/// keep running; their outcomes stay available through their own handles.
pub fn join_all<T: Clone>(handles: Vec<JoinHandle<T>>) -> JoinAll<T> {
    let results = handles.iter().map(|_| None).collect();

    JoinAll { handles, results }
}

/// Future returned by [`gather`] and [`join_all`].
pub struct JoinAll<T> {
    handles: Vec<JoinHandle<T>>,

    /// Outputs collected so far, indexed like `handles`.
    results: Vec<Option<T>>,
}

// Outputs are only ever moved out of `results`, never pinned.
impl<T> Unpin for JoinAll<T> {}

impl<T> JoinAll<T> {
    /// Handles of the tasks being awaited, in input order.
    pub fn handles(&self) -> &[JoinHandle<T>] {
        &self.handles
    }
}

impl<T: Clone> Future for JoinAll<T> {
    type Output = Result<Vec<T>, TaskError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let mut pending = false;

        for (handle, slot) in this.handles.iter_mut().zip(this.results.iter_mut()) {
            if slot.is_some() {
                continue;
            }

            match Pin::new(handle).poll(cx) {
                Poll::Ready(Ok(value)) => *slot = Some(value),
                Poll::Ready(Err(err)) => return Poll::Ready(Err(err)),
                Poll::Pending => pending = true,
            }
        }

        if pending {
            return Poll::Pending;
        }

        match this.results.iter_mut().map(Option::take).collect::<Option<Vec<T>>>() {
            Some(values) => Poll::Ready(Ok(values)),
            None => Poll::Pending,
        }
    }
}
