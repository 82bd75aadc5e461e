//! Concurrent fan-out with independent settlement.

use std::future::Future;

use futures::future::join_all;

/// The outcome of a [`settle_all`] run.
#[derive(Debug)]
pub struct Settled<T, E> {
    /// One outcome per task, in submission order.
    pub outcomes: Vec<Result<T, E>>,
}

impl<T, E> Settled<T, E> {
    /// Number of tasks that succeeded.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|r| r.is_ok()).count()
    }

    /// Number of tasks that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Iterates over the failures.
    pub fn errors(&self) -> impl Iterator<Item = &E> {
        self.outcomes.iter().filter_map(|r| r.as_ref().err())
    }
}

/// Runs every task concurrently and waits until all of them have settled.
///
/// A failing task never cancels or short-circuits its siblings.
pub async fn settle_all<I, F, T, E>(tasks: I) -> Settled<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    Settled {
        outcomes: join_all(tasks).await,
    }
}
