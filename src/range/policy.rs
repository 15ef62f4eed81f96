// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Validation policies for [`Range`](super::Range).
//!
//! A policy is a zero-sized marker chosen at the type level. Each marker maps
//! to a [`RangeKind`], which holds the actual comparison rule, so the rule can
//! also be inspected at runtime.

use std::fmt;

use crate::errors::InvalidRangeError;

/// The relationship a range enforces between its start and end bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    /// No ordering constraint.
    Unconstrained,
    /// `start < end`
    Strict,
    /// `start <= end`
    NonStrict,
}

impl RangeKind {
    /// Check `start` and `end` against this rule.
    ///
    /// The comparison must succeed for the bounds to be accepted, so
    /// incomparable values (such as `NaN`) are rejected by the ordered kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use junior_common::RangeKind;
    ///
    /// assert!(RangeKind::NonStrict.check(&3, &3).is_ok());
    /// assert!(RangeKind::Strict.check(&3, &3).is_err());
    /// assert!(RangeKind::Strict.check(&f64::NAN, &1.0).is_err());
    /// ```
    pub fn check<T>(self, start: &T, end: &T) -> Result<(), InvalidRangeError>
    where
        T: PartialOrd + ?Sized,
    {
        match self {
            RangeKind::Unconstrained => Ok(()),
            RangeKind::Strict if start < end => Ok(()),
            RangeKind::Strict => Err(InvalidRangeError::start_not_less_than_end()),
            RangeKind::NonStrict if start <= end => Ok(()),
            RangeKind::NonStrict => Err(InvalidRangeError::start_greater_than_end()),
        }
    }
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKind::Unconstrained => f.write_str("unconstrained"),
            RangeKind::Strict => f.write_str("start < end"),
            RangeKind::NonStrict => f.write_str("start <= end"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level selector for a [`RangeKind`].
///
/// Implemented only by the markers in this module.
pub trait RangePolicy: sealed::Sealed {
    /// The rule this policy enforces.
    const KIND: RangeKind;

    /// Check bounds against [`Self::KIND`].
    fn validate<T>(start: &T, end: &T) -> Result<(), InvalidRangeError>
    where
        T: PartialOrd + ?Sized,
    {
        Self::KIND.check(start, end)
    }
}

/// Accepts any pair of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Unconstrained;

/// Requires `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StartLessThanEnd;

/// Requires `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StartLessThanOrEqualToEnd;

impl sealed::Sealed for Unconstrained {}
impl sealed::Sealed for StartLessThanEnd {}
impl sealed::Sealed for StartLessThanOrEqualToEnd {}

impl RangePolicy for Unconstrained {
    const KIND: RangeKind = RangeKind::Unconstrained;
}

impl RangePolicy for StartLessThanEnd {
    const KIND: RangeKind = RangeKind::Strict;
}

impl RangePolicy for StartLessThanOrEqualToEnd {
    const KIND: RangeKind = RangeKind::NonStrict;
}
