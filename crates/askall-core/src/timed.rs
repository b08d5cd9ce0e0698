//! Wall-clock timing around a provider call.

use std::future::Future;
use std::time::{Duration, Instant};

/// A value together with how long it took to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Await `fut`, measuring only the time spent inside it.
pub async fn timed<F: Future>(fut: F) -> Timed<F::Output> {
    let start = Instant::now();
    let value = fut.await;
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}
