// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Common building blocks shared across applications.
//!
//! - [`range`]: immutable start/end ranges whose ordering rule is checked at
//!   construction ([`StrictRange`], [`NonStrictRange`], and their nullable
//!   counterparts).
//! - [`lazy`]: [`AsyncLazy`], a value produced once in the background on first
//!   access and shared by every caller.
//! - [`errors`]: component errors and the unified [`CommonError`].

pub mod errors;
pub mod lazy;
pub mod range;

mod spans;

pub use errors::*;
pub use lazy::*;
pub use range::*;
