// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset reconciliation for the bottom band.
//!
//! ## Two regions
//!
//! The band splits into a scroll-off region (layers that leave as the band scrolls)
//! and a pinned region (layers that only give way down to the min height). The walk
//! keeps one cursor per region, on an axis where `0` is the top of the band and
//! `total_height` its bottom:
//!
//! - the scroll cursor starts at the band offset; a scroll-off layer advances it by
//!   its height, takes `cursor - total_height` as its offset, and the cursor is then
//!   clamped so it never passes the pinned cursor;
//! - the pinned cursor starts at `total_height - min_height_offset`; a pinned layer
//!   advances it by its height, takes `cursor - total_height`, and the cursor is then
//!   clamped to `total_height`.
//!
//! ## Animated cycles
//!
//! During a height animation each layer's offset is combined with the one dispatched
//! last cycle so it only travels in the direction the band moves (see
//! [`Travel`](understory_band::Travel)). Hiding layers have no ideal offset; they are
//! seeded right below the layer above them.

use understory_band::{Edge, KindMap, StackLayout};

use super::types::BottomLayerType;

/// What the settle pass needs to know about one registered layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayerSlot {
    /// Layer kind.
    pub(crate) kind: BottomLayerType,
    /// Sanitized height.
    pub(crate) height: i32,
    /// Effective visibility this cycle.
    pub(crate) visible: bool,
    /// Whether the layer is animating out.
    pub(crate) hiding: bool,
}

impl LayerSlot {
    /// Whether the layer gets a computed offset this cycle (as opposed to its hidden one).
    pub(crate) const fn is_tracked(&self) -> bool {
        self.visible || self.hiding
    }
}

/// Resting-relative offsets for every laid-out layer.
pub(crate) fn ideal_offsets(
    layout: &StackLayout<BottomLayerType>,
    band_offset: i32,
    min_height_offset: i32,
) -> KindMap<BottomLayerType, i32> {
    let total = layout.total_height;
    // A stale min height offset from before a height change would open a gap.
    let min_height_offset = min_height_offset.clamp(0, layout.total_min_height);

    let mut layer_band_offset = band_offset;
    let mut min_height_band_offset = total - min_height_offset;
    let mut out = KindMap::new();
    for layer in &layout.layers {
        if layer.scrolls_off {
            layer_band_offset += layer.height;
            out.insert(layer.kind, layer_band_offset - total);
            layer_band_offset = layer_band_offset.min(min_height_band_offset);
        } else {
            min_height_band_offset += layer.height;
            out.insert(layer.kind, min_height_band_offset - total);
            min_height_band_offset = min_height_band_offset.min(total);
        }
    }
    out
}

/// Final offsets for tracked layers (visible or hiding), in stack order.
///
/// Untracked layers get no entry; the dispatch stage sends them their hidden offset.
pub(crate) fn settle_offsets(
    slots: &[LayerSlot],
    ideal: &KindMap<BottomLayerType, i32>,
    previous: &KindMap<BottomLayerType, i32>,
    band_offset: i32,
    total_height: i32,
    animated: bool,
) -> KindMap<BottomLayerType, i32> {
    let travel = Edge::Bottom.travel(band_offset);
    let mut above = band_offset - total_height;
    let mut out = KindMap::new();
    for slot in slots.iter().filter(|slot| slot.is_tracked()) {
        let ideal = ideal
            .get(slot.kind)
            .copied()
            .unwrap_or(above + slot.height);
        let offset = if animated {
            let previous = previous
                .get(slot.kind)
                .copied()
                .unwrap_or_else(|| Edge::Bottom.untracked_previous(ideal, slot.height));
            travel.settle(ideal, previous)
        } else {
            ideal
        };
        out.insert(slot.kind, offset);
        above = offset;
    }
    out
}
