//! Error types for the junior-common library.
//!
//! This module follows a hybrid approach:
//!
//! - **Component-specific errors** for fine-grained handling ([`InvalidRangeError`],
//!   [`ProducerError`])
//! - **Unified error type** ([`CommonError`]) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust
//! use junior_common::{InvalidRangeError, NonStrictRange};
//!
//! match NonStrictRange::new(10, 3) {
//!     Ok(range) => println!("Range: {range}"),
//!     Err(error) => assert_eq!(error.parameter(), "start"),
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust
//! use junior_common::{AsyncLazy, CommonError, StrictRange};
//!
//! async fn window_length(lazy: &AsyncLazy<(u64, u64)>) -> Result<u64, CommonError> {
//!     let (start, end) = lazy.get_value().await?;
//!     let window = StrictRange::new(start, end)?;
//!     // Both error types convert to CommonError via From implementations
//!     Ok(window.end() - window.start())
//! }
//! ```

mod lazy;
mod range;

pub use lazy::{BoxError, ProducerError};
pub use range::{
    InvalidRangeError, START_LESS_THAN_END_MESSAGE, START_LESS_THAN_OR_EQUAL_TO_END_MESSAGE,
};

/// Unified error type for all junior-common operations.
///
/// All component errors convert to `CommonError` via `From` implementations,
/// so `?` propagates them naturally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CommonError {
    /// A range was constructed from invalid bounds.
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] InvalidRangeError),

    /// A lazily produced value could not be produced.
    #[error("Lazy value error: {0}")]
    Producer(#[from] ProducerError),
}
