//! Deferred results with single-assignment settlement
//!
//! A [`Deferred`] is a computation outcome that becomes available later,
//! settling exactly once to either a success payload or a failure payload.
//! Its [`Settle`] counterpart is the write side: both settling methods
//! consume the handle, so a second transition is unrepresentable.

use fnflow_core::Error;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Write side of a deferred result; settling consumes the handle
pub struct Settle<T, E = Error>(oneshot::Sender<Result<T, E>>);

impl<T, E> Settle<T, E> {
    /// Settle the deferred result with a success payload
    pub fn fulfill(self, value: T) {
        let _ = self.0.send(Ok(value));
    }

    /// Settle the deferred result with a failure payload
    pub fn fail(self, error: E) {
        let _ = self.0.send(Err(error));
    }

    /// Settle the deferred result with an already-formed outcome
    pub fn settle(self, outcome: Result<T, E>) {
        let _ = self.0.send(outcome);
    }
}

/// Read side of a deferred result; await it to observe the outcome
pub struct Deferred<T, E = Error> {
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> Deferred<T, E> {
    /// Create an unsettled deferred result and its settle handle
    pub fn new() -> (Settle<T, E>, Self) {
        let (tx, rx) = oneshot::channel();
        (Settle(tx), Self { rx })
    }

    /// A deferred result already settled with a success payload
    pub fn fulfilled(value: T) -> Self {
        let (settle, deferred) = Self::new();
        settle.fulfill(value);
        deferred
    }

    /// A deferred result already settled with a failure payload
    pub fn failed(error: E) -> Self {
        let (settle, deferred) = Self::new();
        settle.fail(error);
        deferred
    }
}

impl<T, E> Future for Deferred<T, E>
where
    E: From<Error>,
{
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            // The settle handle was dropped without a transition; surface
            // that instead of pending forever.
            Poll::Ready(Err(_)) => Poll::Ready(Err(E::from(Error::unsettled("deferred")))),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fulfilled_deferred_resolves() {
        let (settle, deferred) = Deferred::<i32>::new();
        settle.fulfill(42);
        assert_eq!(deferred.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_failed_deferred_carries_the_error() {
        let (settle, deferred) = Deferred::<i32>::new();
        settle.fail(Error::sequencing("boom"));
        let err = deferred.await.err().unwrap();
        assert!(matches!(err, Error::Sequencing { .. }));
    }

    #[tokio::test]
    async fn test_dropped_settle_surfaces_unsettled() {
        let (settle, deferred) = Deferred::<i32>::new();
        drop(settle);
        let err = deferred.await.err().unwrap();
        assert!(matches!(err, Error::Unsettled { .. }));
    }

    #[tokio::test]
    async fn test_settlement_from_another_task() {
        let (settle, deferred) = Deferred::<&str>::new();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            settle.fulfill("later");
        });
        assert_eq!(deferred.await.unwrap(), "later");
    }

    #[tokio::test]
    async fn test_pre_settled_constructors() {
        assert_eq!(Deferred::<i32>::fulfilled(7).await.unwrap(), 7);
        assert!(Deferred::<i32>::failed(Error::sequencing("no"))
            .await
            .is_err());
    }
}
