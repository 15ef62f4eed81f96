// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Serde support for ranges.
//!
//! Ranges serialize as `{ "start": .., "end": .. }`. Deserialization runs the
//! same validation as [`Range::new`], so an invalid document is rejected
//! instead of producing a range that breaks its policy.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Range, RangePolicy};

#[derive(Deserialize)]
#[serde(rename = "Range", deny_unknown_fields)]
struct RawRange<T> {
    start: T,
    end: T,
}

impl<T, P> Serialize for Range<T, P>
where
    T: Serialize,
    P: RangePolicy,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Range", 2)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.end()
    }
}

impl<'de, T, P> Deserialize<'de> for Range<T, P>
where
    T: Deserialize<'de> + PartialOrd,
    P: RangePolicy,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawRange { start, end } = RawRange::deserialize(deserializer)?;
        Range::new(start, end).map_err(D::Error::custom)
    }
}
