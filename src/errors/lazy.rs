//! Error types for lazily produced async values.
//!
//! A producer failure is captured once and then handed to every caller, so
//! [`ProducerError`] is cheaply cloneable and shares the underlying error
//! through an [`Arc`].

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

/// Boxed error type accepted from fallible producers.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors delivered by [`AsyncLazy::get_value`](crate::AsyncLazy::get_value).
///
/// Every variant except [`NoRuntime`](ProducerError::NoRuntime) is memoized:
/// once the single producer invocation ends this way, every past and future
/// caller receives a clone of the same error.
///
/// # Examples
///
/// ```rust
/// use junior_common::{AsyncLazy, ProducerError};
///
/// # #[tokio::main]
/// # async fn main() {
/// let lazy = AsyncLazy::try_new(|| Err::<u32, _>(std::io::Error::other("disk on fire")));
///
/// match lazy.get_value().await {
///     Err(ProducerError::Failed { source }) => assert_eq!(source.to_string(), "disk on fire"),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// # }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProducerError {
    /// The producer returned an error.
    #[error("Producer failed: {source}")]
    Failed {
        /// The error returned by the producer, shared by all callers
        #[source]
        source: Arc<dyn StdError + Send + Sync>,
    },

    /// The producer panicked while computing the value.
    #[error("Producer panicked: {message}")]
    Panicked {
        /// The panic payload, if it was a string
        message: String,
    },

    /// The runtime shut down before the producer finished.
    #[error("Producer task was cancelled before it completed")]
    Cancelled,

    /// No runtime was available to dispatch the producer onto.
    ///
    /// This is the only non-memoized outcome: the producer has not been
    /// consumed and a later call made from within a runtime will start it.
    #[error("No tokio runtime available to dispatch the producer")]
    NoRuntime,
}

impl ProducerError {
    /// Wrap an error returned by a producer.
    pub fn failed(source: impl Into<BoxError>) -> Self {
        ProducerError::Failed {
            source: Arc::from(source.into()),
        }
    }

    /// Build a `Panicked` error from a panic payload.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ProducerError::Panicked { message }
    }

    /// Returns `true` if this outcome is cached permanently.
    pub fn is_memoized(&self) -> bool {
        !matches!(self, ProducerError::NoRuntime)
    }

    /// The error returned by the producer, if it returned one.
    pub fn producer_error(&self) -> Option<&Arc<dyn StdError + Send + Sync>> {
        match self {
            ProducerError::Failed { source } => Some(source),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for ProducerError {
    fn from(error: tokio::task::JoinError) -> Self {
        if error.is_panic() {
            ProducerError::from_panic(error.into_panic())
        } else {
            ProducerError::Cancelled
        }
    }
}
