// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applier configuration.

/// Default bound on nested parent and dependency application.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// What to do when a style is reached again while it is still being applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum CycleHandling {
    /// Fail the `apply` call with [`StyleError::Cycle`](crate::StyleError::Cycle).
    #[default]
    Error,
    /// Panic in debug builds; in release builds skip the repeated style.
    DebugAssert,
    /// Skip the repeated style.
    Ignore,
}

/// Configuration for a [`StyleApplier`](crate::StyleApplier).
///
/// # Example
///
/// ```rust
/// use restyle::{ApplierConfig, CycleHandling};
///
/// let config = ApplierConfig::default()
///     .with_max_depth(8)
///     .with_cycle_handling(CycleHandling::Ignore);
///
/// assert_eq!(config.max_depth, 8);
/// assert_eq!(config.cycle_handling, CycleHandling::Ignore);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ApplierConfig {
    /// Maximum nesting of parent and dependency styles below one `apply`.
    pub max_depth: usize,
    /// Policy for styles that (transitively) require themselves.
    pub cycle_handling: CycleHandling,
}

impl Default for ApplierConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_handling: CycleHandling::default(),
        }
    }
}

impl ApplierConfig {
    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the cycle policy.
    #[must_use]
    pub fn with_cycle_handling(mut self, cycle_handling: CycleHandling) -> Self {
        self.cycle_handling = cycle_handling;
        self
    }
}
