// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for junior-common integration tests
//!
//! Provides an invocation counter for asserting how often producers run and
//! a one-time tracing subscriber setup.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

/// Shared counter of producer invocations
///
/// Cloning shares the same count, so a clone can be moved into a producer
/// while the test keeps the original for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let calls = InvocationCounter::new();
/// let lazy = AsyncLazy::new({
///     let calls = calls.clone();
///     move || calls.record()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvocationCounter {
    count: Arc<AtomicUsize>,
}

impl InvocationCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an invocation and return the count including it
    pub fn record(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of invocations so far
    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Wait until at least `expected` invocations were recorded, or panic after `timeout`
    pub async fn wait_for(&self, expected: usize, timeout: Duration) {
        tokio::time::timeout(timeout, async {
            while self.get() < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("expected {expected} invocations, saw {}", self.get()));
    }
}

/// Install a fmt subscriber honoring `RUST_LOG`, once per test binary
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
