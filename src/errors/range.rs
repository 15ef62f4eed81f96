//! Error types for range construction.
//!
//! Ranges validate the relationship between their bounds when they are built,
//! so the only failure mode is an invalid pair of bounds.

use std::borrow::Cow;

/// Message used when a strict range receives `start >= end`.
pub const START_LESS_THAN_END_MESSAGE: &str = "Start value must be less than end value.";

/// Message used when a non-strict range receives `start > end`.
pub const START_LESS_THAN_OR_EQUAL_TO_END_MESSAGE: &str =
    "Start value must be less than or equal to end value.";

/// The bounds passed to a range constructor violate its ordering rule.
///
/// The range is never constructed; the caller has to supply corrected bounds.
///
/// # Examples
///
/// ```rust
/// use junior_common::{InvalidRangeError, StrictRange};
///
/// let error: InvalidRangeError = StrictRange::new(5, 5).unwrap_err();
/// assert_eq!(error.parameter(), "start");
/// assert_eq!(error.message(), "Start value must be less than end value.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (parameter: {parameter})")]
pub struct InvalidRangeError {
    parameter: &'static str,
    message: Cow<'static, str>,
}

impl InvalidRangeError {
    /// Create an error for the named parameter with a descriptive message.
    pub fn new(parameter: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            parameter,
            message: message.into(),
        }
    }

    /// Create the error reported when `start` is not strictly less than `end`.
    pub fn start_not_less_than_end() -> Self {
        Self::new("start", START_LESS_THAN_END_MESSAGE)
    }

    /// Create the error reported when `start` is greater than `end`.
    pub fn start_greater_than_end() -> Self {
        Self::new("start", START_LESS_THAN_OR_EQUAL_TO_END_MESSAGE)
    }

    /// Name of the offending constructor parameter.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// Description of the violated rule.
    pub fn message(&self) -> &str {
        &self.message
    }
}
