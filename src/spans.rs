//! Tracing span helpers for junior-common operations.
//!
//! Business logic does not use `#[instrument]`; each instrumented operation
//! has a span helper here instead.
//!
//! Usage pattern:
//! ```rust,ignore
//! let span = spans::dispatch_producer(config.label(), kind);
//! let _guard = span.enter();
//! // Business logic here
//! ```

use tracing::{Level, Span};

/// Create span for the single dispatch of a lazy value's producer.
///
/// Parent: the caller that triggered first access
/// Children: run_producer span
#[inline]
pub(crate) fn dispatch_producer(label: &str, producer_kind: &'static str) -> Span {
    tracing::span!(
        Level::DEBUG,
        "junior_common.dispatch_producer",
        label = label,
        producer_kind = producer_kind,
    )
}

/// Create span for running a producer on a runtime worker.
///
/// Parent: dispatch_producer span
/// Children: whatever the producer itself records
#[inline]
pub(crate) fn run_producer(label: &str, producer_kind: &'static str) -> Span {
    tracing::debug_span!(
        "junior_common.run_producer",
        label = label,
        producer_kind = producer_kind,
    )
}
