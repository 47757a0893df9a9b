//! Sequential execution of deferred-producing steps
//!
//! Steps run strictly in order: each is invoked only after the previous
//! step's future has settled, and receives that step's resolved value as
//! its argument. The first failure aborts the remainder and becomes the
//! overall error, unwrapped and untransformed.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use tracing::trace;

/// A single pipeline step producing a deferred outcome
pub type SeriesStep<T, E> = Box<dyn FnOnce(T) -> BoxFuture<'static, Result<T, E>> + Send>;

/// Run boxed steps in order, threading each resolved value into the next
pub async fn run_in_series<T, E>(initial: T, steps: Vec<SeriesStep<T, E>>) -> Result<T, E> {
    let mut value = initial;
    for (index, step) in steps.into_iter().enumerate() {
        trace!(index, "running series step");
        value = step(value).await?;
    }
    Ok(value)
}

/// Builder for a sequential pipeline of asynchronous steps
pub struct Series<T, E> {
    initial: T,
    steps: Vec<SeriesStep<T, E>>,
}

impl<T, E> Series<T, E> {
    /// Start a series from a seed value
    pub fn new(initial: T) -> Self {
        Self {
            initial,
            steps: Vec::new(),
        }
    }

    /// Append a step receiving the prior step's resolved value
    #[must_use]
    pub fn then<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.steps.push(Box::new(move |value| f(value).boxed()));
        self
    }

    /// Number of queued steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether any steps are queued
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Execute the steps in order, settling with the last step's value or
    /// the first failure
    pub async fn run(self) -> Result<T, E> {
        run_in_series(self.initial, self.steps).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_values_thread_through_the_pipeline() {
        let result: Result<i32, fnflow_core::Error> = Series::new(0)
            .then(|_| async { Ok(1) })
            .then(|prev| async move { Ok(prev + 1) })
            .then(|prev| async move { Ok(prev + 1) })
            .run()
            .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_failure_stops_the_series() {
        let third_ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&third_ran);

        let result: Result<i32, String> = Series::new(1)
            .then(|prev| async move { Ok(prev + 1) })
            .then(|_| async { Err("midway failure".to_string()) })
            .then(move |prev| {
                flag.store(true, Ordering::SeqCst);
                async move { Ok(prev) }
            })
            .run()
            .await;

        assert_eq!(result.err().unwrap(), "midway failure");
        assert!(!third_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_steps_do_not_overlap() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let slow_log = Arc::clone(&log);
        let fast_log = Arc::clone(&log);
        let result: Result<i32, fnflow_core::Error> = Series::new(0)
            .then(move |prev| async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                slow_log.lock().push("slow");
                Ok(prev + 1)
            })
            .then(move |prev| async move {
                fast_log.lock().push("fast");
                Ok(prev + 1)
            })
            .run()
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(*log.lock(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_empty_series_settles_to_the_seed() {
        let series: Series<i32, fnflow_core::Error> = Series::new(9);
        assert!(series.is_empty());
        assert_eq!(series.run().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_run_in_series_with_boxed_steps() {
        let steps: Vec<SeriesStep<i32, fnflow_core::Error>> = vec![
            Box::new(|prev| async move { Ok(prev * 2) }.boxed()),
            Box::new(|prev| async move { Ok(prev + 1) }.boxed()),
        ];
        assert_eq!(run_in_series(5, steps).await.unwrap(), 11);
    }
}
