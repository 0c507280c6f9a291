// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

/// Policies shared by the band engines.
///
/// The default is strict in debug builds and lenient in release builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackerConfig {
    /// Panic when a layer that always scrolls off is stacked after a pinned layer.
    ///
    /// When false, the violation is logged and the offending layer is treated as pinned.
    pub strict_ordering: bool,
    /// Log host size reports that disagree with the engine's own computation.
    pub report_divergence: bool,
}

impl Default for StackerConfig {
    fn default() -> Self {
        Self {
            strict_ordering: cfg!(debug_assertions),
            report_divergence: true,
        }
    }
}

impl StackerConfig {
    /// Set [`strict_ordering`](Self::strict_ordering).
    #[must_use]
    pub const fn with_strict_ordering(mut self, strict: bool) -> Self {
        self.strict_ordering = strict;
        self
    }

    /// Set [`report_divergence`](Self::report_divergence).
    #[must_use]
    pub const fn with_report_divergence(mut self, report: bool) -> Self {
        self.report_divergence = report;
        self
    }
}
