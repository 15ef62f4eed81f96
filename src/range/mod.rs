// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Immutable start/end ranges validated at construction time.
//!
//! A single value type, [`Range<T, P>`], carries two bounds and a validation
//! policy `P` that is fixed by its type. The common shapes have aliases:
//!
//! | Alias                         | Bounds      | Rule           |
//! |-------------------------------|-------------|----------------|
//! | [`StrictRange<T>`]            | `T`         | `start < end`  |
//! | [`NonStrictRange<T>`]         | `T`         | `start <= end` |
//! | [`NullableStrictRange<T>`]    | `Option<T>` | `start < end`  |
//! | [`NullableNonStrictRange<T>`] | `Option<T>` | `start <= end` |
//!
//! # Null ordering
//!
//! Nullable ranges use the ordering of [`Option`]: `None` is lower than any
//! `Some(_)`, and two `None` bounds are equal. So `(None, Some(x))` is a valid
//! strict range, `(Some(x), None)` never is, and `(None, None)` is valid only
//! for the non-strict alias.
//!
//! # Example
//!
//! ```rust
//! use junior_common::{NonStrictRange, NullableStrictRange, StrictRange};
//!
//! let hours = StrictRange::new(9, 17)?;
//! assert_eq!((*hours.start(), *hours.end()), (9, 17));
//!
//! assert!(StrictRange::new(9, 9).is_err());
//! assert!(NonStrictRange::new(9, 9).is_ok());
//!
//! // An open start is lower than every concrete end
//! assert!(NullableStrictRange::new(None, Some(17)).is_ok());
//! assert!(NullableStrictRange::new(Some(9), None).is_err());
//! # Ok::<(), junior_common::InvalidRangeError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::errors::InvalidRangeError;

mod policy;
#[cfg(feature = "serde")]
mod serde_impls;

pub use policy::{
    RangeKind, RangePolicy, StartLessThanEnd, StartLessThanOrEqualToEnd, Unconstrained,
};

/// A range whose start must be less than its end.
pub type StrictRange<T> = Range<T, StartLessThanEnd>;

/// A range whose start must be less than or equal to its end.
pub type NonStrictRange<T> = Range<T, StartLessThanOrEqualToEnd>;

/// A range of optional bounds whose start must be less than its end.
///
/// `None` is ordered lower than any `Some(_)`.
pub type NullableStrictRange<T> = Range<Option<T>, StartLessThanEnd>;

/// A range of optional bounds whose start must be less than or equal to its end.
///
/// `None` is ordered lower than any `Some(_)`.
pub type NullableNonStrictRange<T> = Range<Option<T>, StartLessThanOrEqualToEnd>;

/// An immutable pair of bounds validated by the policy `P`.
///
/// The fields are private and no method hands out mutable access, so the
/// policy's rule holds for the whole lifetime of the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<T, P = Unconstrained> {
    start: T,
    end: T,
    policy: PhantomData<P>,
}

impl<T, P> Range<T, P>
where
    T: PartialOrd,
    P: RangePolicy,
{
    /// Create a range, validating the bounds against `P`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRangeError`] naming the `start` parameter when the
    /// bounds violate the policy's rule.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use junior_common::NonStrictRange;
    ///
    /// let range = NonStrictRange::new('a', 'z').unwrap();
    /// assert_eq!(range.to_string(), "a..=z");
    ///
    /// let error = NonStrictRange::new('z', 'a').unwrap_err();
    /// assert_eq!(error.parameter(), "start");
    /// ```
    pub fn new(start: T, end: T) -> Result<Self, InvalidRangeError> {
        if let Err(error) = P::validate(&start, &end) {
            tracing::trace!(kind = %P::KIND, "Rejected range bounds");
            return Err(error);
        }

        Ok(Self {
            start,
            end,
            policy: PhantomData,
        })
    }
}

impl<T, P> Range<T, P>
where
    P: RangePolicy,
{
    /// The start bound.
    pub fn start(&self) -> &T {
        &self.start
    }

    /// The end bound.
    pub fn end(&self) -> &T {
        &self.end
    }

    /// The rule this range was validated against.
    pub fn kind(&self) -> RangeKind {
        P::KIND
    }

    /// Consume the range, returning `(start, end)`.
    pub fn into_parts(self) -> (T, T) {
        (self.start, self.end)
    }
}

impl<T, P> TryFrom<(T, T)> for Range<T, P>
where
    T: PartialOrd,
    P: RangePolicy,
{
    type Error = InvalidRangeError;

    fn try_from((start, end): (T, T)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl<T, P> TryFrom<std::ops::Range<T>> for Range<T, P>
where
    T: PartialOrd,
    P: RangePolicy,
{
    type Error = InvalidRangeError;

    fn try_from(range: std::ops::Range<T>) -> Result<Self, Self::Error> {
        Self::new(range.start, range.end)
    }
}

impl<T, P> fmt::Debug for Range<T, P>
where
    T: fmt::Debug,
    P: RangePolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("kind", &P::KIND)
            .finish()
    }
}

impl<T, P> fmt::Display for Range<T, P>
where
    T: fmt::Display,
    P: RangePolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match P::KIND {
            RangeKind::Strict => write!(f, "{}..{}", self.start, self.end),
            RangeKind::NonStrict => write!(f, "{}..={}", self.start, self.end),
            RangeKind::Unconstrained => write!(f, "({}, {})", self.start, self.end),
        }
    }
}
