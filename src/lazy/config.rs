// SPDX-FileCopyrightText: 2025 Junior Common Contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for lazily produced async values
//!
//! # Example: Using defaults
//!
//! ```rust
//! use junior_common::LazyConfig;
//!
//! // Dispatches onto whichever tokio runtime is current at first access
//! let config = LazyConfig::default();
//! assert!(config.runtime.is_none());
//! ```
//!
//! # Example: Dedicated runtime
//!
//! ```rust
//! use junior_common::{AsyncLazy, LazyConfigBuilder};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let config = LazyConfigBuilder::new()
//!     .runtime(runtime.handle().clone())
//!     .label("settings")
//!     .build();
//!
//! let settings = AsyncLazy::new(|| String::from("loaded")).with_config(config);
//!
//! // No ambient runtime is needed here since the handle is configured
//! assert_eq!(settings.get_value_blocking().unwrap(), "loaded");
//! ```

use tokio::runtime::Handle;

/// Configuration for [`AsyncLazy`](crate::AsyncLazy)
///
/// Use [`LazyConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, Default)]
pub struct LazyConfig {
    /// Runtime the producer is dispatched onto
    /// Default: None (the runtime current at first access)
    pub runtime: Option<Handle>,

    /// Name recorded on the tracing spans and events of this value
    /// Default: None
    pub label: Option<String>,
}

impl LazyConfig {
    /// Resolve the runtime to dispatch onto.
    ///
    /// Returns the configured handle if set, otherwise the runtime the caller
    /// is currently running in, if any.
    pub fn resolve_runtime(&self) -> Option<Handle> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
    }

    /// Label for tracing output, `"unlabeled"` if none was set.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("unlabeled")
    }
}

/// Builder for [`LazyConfig`]
///
/// # Example
///
/// ```rust
/// use junior_common::LazyConfigBuilder;
///
/// let config = LazyConfigBuilder::new()
///     .label("exchange-rates")
///     .build();
/// assert_eq!(config.label(), "exchange-rates");
/// ```
#[derive(Debug, Default)]
pub struct LazyConfigBuilder {
    config: LazyConfig,
}

impl LazyConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch the producer onto the given runtime
    ///
    /// A current-thread runtime does not need to be running. Async producers
    /// on it are driven from its blocking pool, and then cannot rely on tokio
    /// timers or IO unless another thread is running the runtime.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.config.runtime = Some(handle);
        self
    }

    /// Set the label recorded in tracing output
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> LazyConfig {
        self.config
    }
}
