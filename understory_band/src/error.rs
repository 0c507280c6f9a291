// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced by band engines.

use core::fmt::Debug;

/// Configuration errors reported when mutating a layer registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError<K: Debug> {
    /// A layer of this kind is already registered; the existing registration is kept.
    #[error("a layer of kind {kind:?} is already registered")]
    DuplicateLayer {
        /// Kind that was registered twice.
        kind: K,
    },
}

/// The band host reported a size that differs from the engine's last computation.
///
/// Returned (and logged) by the engines' height-change notification. The engine keeps
/// using its own values for the next offset pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "band host reports height {reported_height} (min {reported_min_height}), \
     engine computed {expected_height} (min {expected_min_height})"
)]
pub struct SizeDivergence {
    /// Total height reported by the host.
    pub reported_height: i32,
    /// Min height reported by the host.
    pub reported_min_height: i32,
    /// Total height last computed by the engine.
    pub expected_height: i32,
    /// Min height last computed by the engine.
    pub expected_min_height: i32,
}

impl SizeDivergence {
    /// Compare a host report against the engine's values.
    ///
    /// Returns `None` when they agree.
    pub fn check(reported: (i32, i32), expected: (i32, i32)) -> Option<Self> {
        (reported != expected).then_some(Self {
            reported_height: reported.0,
            reported_min_height: reported.1,
            expected_height: expected.0,
            expected_min_height: expected.1,
        })
    }
}
