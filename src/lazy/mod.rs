// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Lazily produced async values.
//!
//! [`AsyncLazy`] wraps a producer, synchronous or future-returning, and runs it
//! at most once on a tokio runtime the first time the value is requested.
//! [`LazyConfig`] selects the runtime and a label for tracing output.

mod async_lazy;
mod config;

pub use async_lazy::AsyncLazy;
pub use config::{LazyConfig, LazyConfigBuilder};
