// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! [`AsyncLazy`]: a value produced once, in the background, on first access.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, OnceLock, PoisonError};

use futures::future::{self, BoxFuture, FutureExt, Shared};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::Instrument;

use super::config::LazyConfig;
use crate::errors::{BoxError, ProducerError};
use crate::spans;

type Outcome<T> = Result<T, ProducerError>;
type SharedOutcome<T> = Shared<BoxFuture<'static, Outcome<T>>>;

/// The two producer shapes. Fallible and infallible constructors both
/// normalize into one of these.
enum Producer<T> {
    Blocking(Box<dyn FnOnce() -> Result<T, BoxError> + Send>),
    Async(Box<dyn FnOnce() -> BoxFuture<'static, Result<T, BoxError>> + Send>),
}

impl<T> Producer<T> {
    fn kind(&self) -> &'static str {
        match self {
            Producer::Blocking(_) => "blocking",
            Producer::Async(_) => "async",
        }
    }
}

/// A value that is produced lazily and asynchronously, at most once.
///
/// The producer is not invoked until the first call to
/// [`get_value`](Self::get_value). That call dispatches it onto a tokio
/// runtime: synchronous producers run on the blocking pool, asynchronous
/// producers are spawned as a task. Every caller, concurrent or later,
/// receives a clone of the same shared outcome.
///
/// Failures are memoized exactly like successes. A producer that returns an
/// error or panics is never retried; every caller sees the same
/// [`ProducerError`].
///
/// `T` must be `Clone` because each caller gets its own copy of the value.
/// Wrap expensive values in an [`Arc`](std::sync::Arc).
///
/// # Example
///
/// ```rust
/// use junior_common::AsyncLazy;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), junior_common::ProducerError> {
/// let primes = AsyncLazy::new(|| {
///     (2..50_u32).filter(|n| (2..*n).all(|d| n % d != 0)).count()
/// });
///
/// assert!(!primes.is_started());
/// assert_eq!(primes.get_value().await?, 15);
/// assert_eq!(primes.get_value().await?, 15);
/// # Ok(())
/// # }
/// ```
pub struct AsyncLazy<T> {
    producer: Mutex<Option<Producer<T>>>,
    producer_kind: &'static str,
    outcome: OnceLock<SharedOutcome<T>>,
    config: LazyConfig,
}

impl<T> AsyncLazy<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a lazy value from a synchronous producer.
    ///
    /// The producer runs on the runtime's blocking pool, never on the
    /// calling thread.
    pub fn new<F>(producer: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::from_producer(Producer::Blocking(Box::new(move || {
            Ok::<T, BoxError>(producer())
        })))
    }

    /// Create a lazy value from a fallible synchronous producer.
    pub fn try_new<F, E>(producer: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: Into<BoxError>,
    {
        Self::from_producer(Producer::Blocking(Box::new(move || {
            producer().map_err(Into::<BoxError>::into)
        })))
    }

    /// Create a lazy value from a producer that returns a future.
    ///
    /// The producer is called inside a task spawned on the runtime and the
    /// future it returns is awaited there, so callers see `T` directly rather
    /// than a future of a future.
    ///
    /// # Example
    ///
    /// ```rust
    /// use junior_common::AsyncLazy;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let answer = AsyncLazy::from_future(|| async { 42 });
    /// assert_eq!(answer.get_value().await.unwrap(), 42);
    /// # }
    /// ```
    pub fn from_future<F, Fut>(producer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::from_producer(Producer::Async(Box::new(move || {
            let produced = producer();
            async move { Ok::<T, BoxError>(produced.await) }.boxed()
        })))
    }

    /// Create a lazy value from a producer that returns a fallible future.
    pub fn try_from_future<F, Fut, E>(producer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Self::from_producer(Producer::Async(Box::new(move || {
            let produced = producer();
            async move { produced.await.map_err(Into::<BoxError>::into) }.boxed()
        })))
    }

    fn from_producer(producer: Producer<T>) -> Self {
        Self {
            producer_kind: producer.kind(),
            producer: Mutex::new(Some(producer)),
            outcome: OnceLock::new(),
            config: LazyConfig::default(),
        }
    }

    /// Replace the configuration. Only affects a value that has not started.
    pub fn with_config(mut self, config: LazyConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &LazyConfig {
        &self.config
    }

    /// Get the value, producing it on first access.
    ///
    /// The first call dispatches the producer; the returned future resolves
    /// once it finishes. Later and concurrent calls join the same computation.
    /// Dropping the returned future does not cancel the producer.
    ///
    /// # Errors
    ///
    /// - [`ProducerError::Failed`], [`ProducerError::Panicked`] or
    ///   [`ProducerError::Cancelled`] if the single producer run did not
    ///   yield a value. These are returned to every caller.
    /// - [`ProducerError::NoRuntime`] if no runtime is configured and the
    ///   caller is not inside one. The producer is left untouched.
    pub fn get_value(&self) -> impl Future<Output = Outcome<T>> + Send + 'static {
        let outcome = self.shared_outcome();
        async move { outcome?.await }
    }

    /// Blocking form of [`get_value`](Self::get_value) for synchronous code.
    ///
    /// Blocks the current thread until the outcome is available. Do not call
    /// this from inside an async task: on a current-thread runtime it would
    /// deadlock the very worker the producer needs.
    ///
    /// A configured current-thread runtime does not need to be running for
    /// this to complete, since async producers on such a runtime are driven
    /// from the blocking pool. They cannot use tokio timers or IO unless some
    /// other thread is running that runtime.
    pub fn get_value_blocking(&self) -> Outcome<T> {
        futures::executor::block_on(self.get_value())
    }

    /// Returns `true` once the producer has been dispatched.
    pub fn is_started(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Returns `true` once the producer has finished, successfully or not.
    pub fn is_resolved(&self) -> bool {
        self.resolved_outcome().is_some()
    }

    /// The outcome, if the producer has finished. Never blocks and never
    /// starts the producer.
    pub fn try_get(&self) -> Option<Outcome<T>> {
        self.resolved_outcome()
    }

    fn shared_outcome(&self) -> Result<SharedOutcome<T>, ProducerError> {
        if let Some(shared) = self.outcome.get() {
            tracing::trace!(
                label = self.config.label(),
                "Joining already dispatched producer"
            );
            return Ok(shared.clone());
        }

        let Some(handle) = self.config.resolve_runtime() else {
            tracing::debug!(
                label = self.config.label(),
                "No runtime available, producer not dispatched"
            );
            return Err(ProducerError::NoRuntime);
        };

        // Racing first callers block here until the winner has dispatched.
        Ok(self
            .outcome
            .get_or_init(|| self.dispatch(&handle))
            .clone())
    }

    fn dispatch(&self, handle: &Handle) -> SharedOutcome<T> {
        let label = self.config.label().to_owned();
        let span = spans::dispatch_producer(&label, self.producer_kind);
        let _guard = span.enter();

        let producer = self
            .producer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let run_span = spans::run_producer(&label, self.producer_kind);

        let task: BoxFuture<'static, Outcome<T>> = match producer {
            Some(Producer::Blocking(produce)) => {
                tracing::debug!("Dispatching producer to blocking pool");
                let join = handle.spawn_blocking(move || run_span.in_scope(produce));
                async move { join.await?.map_err(ProducerError::failed) }.boxed()
            }
            // Nothing may be driving a current-thread runtime, so drive the
            // producer from a blocking thread instead of queueing a task on it
            Some(Producer::Async(produce))
                if matches!(handle.runtime_flavor(), RuntimeFlavor::CurrentThread) =>
            {
                tracing::debug!("Driving producer on blocking pool");
                let driver = handle.clone();
                let join = handle.spawn_blocking(move || {
                    driver.block_on(async move { produce().await }.instrument(run_span))
                });
                async move { join.await?.map_err(ProducerError::failed) }.boxed()
            }
            Some(Producer::Async(produce)) => {
                tracing::debug!("Spawning producer task");
                let join = handle.spawn(async move { produce().await }.instrument(run_span));
                async move { join.await?.map_err(ProducerError::failed) }.boxed()
            }
            // Taken by an earlier dispatch that panicked before the outcome was stored
            None => future::ready(Err(ProducerError::Cancelled)).boxed(),
        };

        async move {
            let outcome = task.await;
            match &outcome {
                Ok(_) => tracing::debug!(label = %label, "Producer completed"),
                Err(error) => tracing::debug!(label = %label, error = %error, "Producer failed"),
            }
            outcome
        }
        .boxed()
        .shared()
    }
}

impl<T> AsyncLazy<T>
where
    T: Clone,
{
    /// Poll the shared outcome once with a no-op waker. This drives the join
    /// handle directly, so a finished producer is seen even when every
    /// `get_value` future was dropped before completion.
    fn resolved_outcome(&self) -> Option<Outcome<T>> {
        let shared = self.outcome.get()?;
        shared.peek().cloned().or_else(|| shared.clone().now_or_never())
    }
}

impl<T> fmt::Debug for AsyncLazy<T>
where
    T: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncLazy")
            .field("label", &self.config.label())
            .field("producer_kind", &self.producer_kind)
            .field("started", &self.outcome.get().is_some())
            .field("resolved", &self.resolved_outcome().is_some())
            .finish()
    }
}
