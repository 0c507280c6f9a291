// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Band size aggregation.
//!
//! [`aggregate_sizes`] walks the visible layers in stack order and produces a
//! [`StackLayout`]: the band's total height, its min height (the part that never
//! scrolls away), and a per-layer decision on whether the layer scrolls off.
//!
//! ## Scroll-off rule
//!
//! A layer scrolls off iff its policy is [`ScrollPolicy::Always`], or its policy is
//! [`ScrollPolicy::Default`] and no earlier layer in the walk has contributed to the
//! min height yet. [`ScrollPolicy::Never`] layers are pinned and contribute their
//! full height to the min height.
//!
//! An `Always` layer walked after the min height became nonzero is an ordering error.
//! See [`StackerConfig::strict_ordering`] for how it is handled.

use alloc::vec::Vec;

use crate::config::StackerConfig;
use crate::kind::StackKind;

/// Scroll-off policy of a layer, in the engine-independent vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollPolicy {
    /// Always scrolls off with the band.
    Always,
    /// Never scrolls off; contributes to the min height.
    Never,
    /// Scrolls off unless a pinned layer precedes it in the walk.
    Default,
}

/// Decide whether a layer with `policy` scrolls off, given the min height accumulated
/// by the layers walked before it.
pub const fn should_scroll_off(policy: ScrollPolicy, min_height_so_far: i32) -> bool {
    match policy {
        ScrollPolicy::Always => true,
        ScrollPolicy::Never => false,
        ScrollPolicy::Default => min_height_so_far == 0,
    }
}

/// Per-layer input to [`aggregate_sizes`]. Only effectively visible layers are passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SizeInput<K> {
    /// Layer kind.
    pub kind: K,
    /// Reported height in pixels.
    pub height: i32,
    /// Scroll-off policy.
    pub policy: ScrollPolicy,
    /// Whether the layer takes up room in the band. Overlays report false.
    pub contributes: bool,
}

/// A laid-out layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayerSize<K> {
    /// Layer kind.
    pub kind: K,
    /// Height in pixels, never negative.
    pub height: i32,
    /// Whether the layer scrolls off with the band (false means pinned).
    pub scrolls_off: bool,
    /// Whether the layer takes up room in the band.
    pub contributes: bool,
}

/// Output of [`aggregate_sizes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackLayout<K> {
    /// Visible layers in stack order.
    pub layers: Vec<LayerSize<K>>,
    /// Sum of contributing layer heights.
    pub total_height: i32,
    /// Sum of contributing, pinned layer heights.
    pub total_min_height: i32,
}

impl<K> Default for StackLayout<K> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            total_height: 0,
            total_min_height: 0,
        }
    }
}

impl<K: StackKind> StackLayout<K> {
    /// The laid-out entry for `kind`, if it is visible.
    pub fn get(&self, kind: K) -> Option<&LayerSize<K>> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// The `(total_height, total_min_height)` pair.
    pub fn totals(&self) -> (i32, i32) {
        (self.total_height, self.total_min_height)
    }
}

/// Clamp a reported layer height to be non-negative, logging bad reports.
pub fn sanitize_height<K: StackKind>(kind: K, height: i32) -> i32 {
    if height < 0 {
        log::warn!("layer {kind:?} reported negative height {height}; using 0");
        return 0;
    }
    height
}

/// Sum heights and decide scroll-off for the visible layers in `inputs`.
///
/// Inputs are walked in stack order regardless of the order they are given in.
///
/// # Panics
///
/// Panics on an ordering violation when `config.strict_ordering` is set.
pub fn aggregate_sizes<K: StackKind>(
    inputs: impl IntoIterator<Item = SizeInput<K>>,
    config: &StackerConfig,
) -> StackLayout<K> {
    let mut inputs: Vec<SizeInput<K>> = inputs.into_iter().collect();
    inputs.sort_by_key(|input| input.kind.stack_index());

    let mut layout = StackLayout {
        layers: Vec::with_capacity(inputs.len()),
        total_height: 0,
        total_min_height: 0,
    };
    for input in inputs {
        let height = sanitize_height(input.kind, input.height);
        if !input.contributes {
            layout.layers.push(LayerSize {
                kind: input.kind,
                height,
                scrolls_off: false,
                contributes: false,
            });
            continue;
        }

        let mut scrolls_off = should_scroll_off(input.policy, layout.total_min_height);
        if scrolls_off && layout.total_min_height > 0 {
            assert!(
                !config.strict_ordering,
                "layer {:?} scrolls off but is stacked after pinned layers",
                input.kind
            );
            log::error!(
                "layer {:?} scrolls off but is stacked after pinned layers; pinning it",
                input.kind
            );
            scrolls_off = false;
        }

        layout.total_height += height;
        if !scrolls_off {
            layout.total_min_height += height;
        }
        layout.layers.push(LayerSize {
            kind: input.kind,
            height,
            scrolls_off,
            contributes: true,
        });
    }
    layout
}
