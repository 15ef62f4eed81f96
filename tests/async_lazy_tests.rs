// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for AsyncLazy
//!
//! These tests validate the exactly-once, memoized behavior of lazily produced
//! values under concurrent access, for both synchronous and future-returning
//! producers.

mod helpers;

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use helpers::{init_tracing, InvocationCounter};
use junior_common::{AsyncLazy, LazyConfigBuilder, ProducerError};
use tokio::sync::Barrier;

const CALLERS: usize = 32;

/// Concurrent first access from many tasks runs a synchronous producer once
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_single_invocation() {
    init_tracing();
    let calls = InvocationCounter::new();
    let lazy = Arc::new(AsyncLazy::new({
        let calls = calls.clone();
        move || {
            // Keep the producer busy so racing callers overlap with it
            thread::sleep(Duration::from_millis(50));
            calls.record()
        }
    }));
    let barrier = Arc::new(Barrier::new(CALLERS));

    let mut tasks = Vec::with_capacity(CALLERS);
    for _ in 0..CALLERS {
        let lazy = lazy.clone();
        let barrier = barrier.clone();
        tasks.push(tokio::spawn(async move {
            barrier.wait().await;
            lazy.get_value().await
        }));
    }

    for task in tasks {
        let value = task.await.unwrap().unwrap();
        assert_eq!(value, 1, "Every caller must observe the first invocation");
    }
    assert_eq!(calls.get(), 1, "Producer must run exactly once");
}

/// Concurrent first access from plain OS threads through the blocking accessor
#[test]
fn test_concurrent_threads_blocking_accessor() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let calls = InvocationCounter::new();
    let lazy = Arc::new(
        AsyncLazy::new({
            let calls = calls.clone();
            move || {
                thread::sleep(Duration::from_millis(20));
                calls.record()
            }
        })
        .with_config(
            LazyConfigBuilder::new()
                .runtime(runtime.handle().clone())
                .label("threads")
                .build(),
        ),
    );
    let barrier = Arc::new(std::sync::Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lazy = lazy.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                lazy.get_value_blocking()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }
    assert_eq!(calls.get(), 1);
}

/// A synchronous producer never runs on the caller's thread
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sync_producer_runs_off_caller_thread() {
    let caller = thread::current().id();
    let lazy = AsyncLazy::new(|| thread::current().id());

    let producer_thread = lazy.get_value().await.unwrap();
    assert_ne!(producer_thread, caller);
}

/// A failure is captured once and handed to every caller, including late ones
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failure_is_memoized() {
    let calls = InvocationCounter::new();
    let lazy = AsyncLazy::<u32>::try_new({
        let calls = calls.clone();
        move || {
            calls.record();
            Err(std::io::Error::other("config file missing"))
        }
    });

    let first = lazy.get_value().await.unwrap_err();
    let first_source = first.producer_error().cloned().expect("Failed variant");
    assert_eq!(first_source.to_string(), "config file missing");
    assert!(lazy.is_resolved());

    // Later callers get the very same error instead of a retry
    for _ in 0..5 {
        let again = lazy.get_value().await.unwrap_err();
        let source = again.producer_error().expect("Failed variant");
        assert!(Arc::ptr_eq(source, &first_source));
    }
    assert_eq!(calls.get(), 1, "Failed producer must not be retried");
}

/// Concurrent callers of a failing producer all observe the failure
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_failure() {
    let calls = InvocationCounter::new();
    let lazy = Arc::new(AsyncLazy::<String>::try_from_future({
        let calls = calls.clone();
        move || async move {
            calls.record();
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err("upstream unavailable")
        }
    }));

    let results = futures::future::join_all((0..CALLERS).map(|_| lazy.get_value())).await;

    assert_eq!(results.len(), CALLERS);
    for result in results {
        assert!(matches!(result, Err(ProducerError::Failed { .. })));
    }
    assert_eq!(calls.get(), 1);
}

/// A panicking producer is reported as Panicked to every caller
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_panic_is_memoized() {
    let calls = InvocationCounter::new();
    let lazy = AsyncLazy::<u8>::new({
        let calls = calls.clone();
        move || {
            calls.record();
            panic!("producer exploded");
        }
    });

    for _ in 0..3 {
        match lazy.get_value().await {
            Err(ProducerError::Panicked { message }) => assert_eq!(message, "producer exploded"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
    assert_eq!(calls.get(), 1);
}

/// A future-returning producer resolves to the inner value, not a nested future
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_producer_is_flattened() {
    let lazy = AsyncLazy::from_future(|| async {
        // The producer's own work may itself run elsewhere
        tokio::spawn(async { 42 }).await.unwrap()
    });

    let value: i32 = lazy.get_value().await.unwrap();
    assert_eq!(value, 42);
    assert_eq!(lazy.try_get().unwrap().unwrap(), 42);
}

/// Dropping the caller's future does not cancel the dispatched producer
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dropped_caller_does_not_cancel_producer() {
    let calls = InvocationCounter::new();
    let lazy = AsyncLazy::from_future({
        let calls = calls.clone();
        move || async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            calls.record()
        }
    });

    drop(lazy.get_value());
    assert!(lazy.is_started());

    calls.wait_for(1, Duration::from_secs(5)).await;
    assert_eq!(lazy.get_value().await.unwrap(), 1);
    assert_eq!(calls.get(), 1);
}

/// A finished producer is visible to the non-blocking accessors even if no
/// caller ever awaited it
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_outcome_visible_without_awaiting_caller() {
    let lazy = AsyncLazy::new(|| 5_u8);

    drop(lazy.get_value());
    assert!(lazy.is_started());

    tokio::time::timeout(Duration::from_secs(5), async {
        while !lazy.is_resolved() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("producer should finish");

    assert_eq!(lazy.try_get().unwrap().unwrap(), 5);
}

/// An async producer completes on a configured current-thread runtime that no
/// thread is driving
#[test]
fn test_async_producer_on_idle_current_thread_runtime() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let lazy = Arc::new(
        AsyncLazy::from_future(|| async { 1_u8 }).with_config(
            LazyConfigBuilder::new()
                .runtime(runtime.handle().clone())
                .label("idle-current-thread")
                .build(),
        ),
    );

    let (sender, receiver) = mpsc::channel();
    let caller = {
        let lazy = lazy.clone();
        thread::spawn(move || {
            let _ = sender.send(lazy.get_value_blocking());
        })
    };

    let outcome = receiver
        .recv_timeout(Duration::from_secs(5))
        .expect("blocking accessor should not hang");
    assert_eq!(outcome.unwrap(), 1);
    caller.join().unwrap();
    assert!(lazy.is_resolved());
}

/// Without a runtime nothing is dispatched and the producer stays available
#[test]
fn test_no_runtime_then_runtime() {
    let calls = InvocationCounter::new();
    let lazy = AsyncLazy::new({
        let calls = calls.clone();
        move || calls.record()
    });

    let error = lazy.get_value_blocking().unwrap_err();
    assert!(matches!(error, ProducerError::NoRuntime));
    assert!(!error.is_memoized());
    assert!(!lazy.is_started());
    assert_eq!(calls.get(), 0);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    // get_value must be called from inside the runtime to find it
    let value = runtime.block_on(async { lazy.get_value().await }).unwrap();
    assert_eq!(value, 1);
    assert_eq!(calls.get(), 1);
}

/// Values that are not cheap to clone can be shared behind an Arc
#[tokio::test]
async fn test_arc_value_is_shared() {
    let lazy = AsyncLazy::new(|| Arc::new(vec![0_u8; 1024]));

    let first = lazy.get_value().await.unwrap();
    let second = lazy.get_value().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
