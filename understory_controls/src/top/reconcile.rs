// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset reconciliation for the top band.
//!
//! Offsets are top-edge positions, so the walk keeps a single cursor (the top of the
//! next layer) plus a floor for pinned layers:
//!
//! - the cursor starts at the band offset (negative while scrolled away);
//! - a scrollable layer takes the cursor and pushes it down by its height;
//! - a pinned layer takes `max(cursor, floor)`, where the floor starts at
//!   `min_height_offset - total_min_height` and grows by each pinned height;
//! - an overlay takes `cursor - height`, hanging off the bottom of the content above
//!   it, and moves nothing.
//!
//! Anchored layers are placed against a neighbor instead. A top-anchored one keeps
//! its top edge on the bottom of the layers above it; a bottom-anchored one keeps its
//! bottom edge on the top of the layer below it (or the bottom of the band). Hiding
//! layers have no ideal offset, so they always follow their anchor. Showing layers
//! follow it while the band animates and take their ideal offset at rest.

use understory_band::{Edge, KindMap, StackLayout};

use super::types::{Anchor, TopLayerType, TopLayerVisibility};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TopSlot {
    pub(crate) kind: TopLayerType,
    pub(crate) height: i32,
    pub(crate) visible: bool,
    pub(crate) visibility: TopLayerVisibility,
    pub(crate) contributes: bool,
}

impl TopSlot {
    pub(crate) const fn is_tracked(&self) -> bool {
        self.visible || self.visibility.is_hiding()
    }
}

pub(crate) fn ideal_offsets(
    layout: &StackLayout<TopLayerType>,
    band_offset: i32,
    min_height_offset: i32,
) -> KindMap<TopLayerType, i32> {
    let min_height_offset = min_height_offset.clamp(0, layout.total_min_height);
    let mut cursor = band_offset;
    let mut floor = min_height_offset - layout.total_min_height;
    let mut out = KindMap::new();
    for layer in &layout.layers {
        if !layer.contributes {
            out.insert(layer.kind, cursor - layer.height);
        } else if layer.scrolls_off {
            out.insert(layer.kind, cursor);
            cursor += layer.height;
        } else {
            let top = cursor.max(floor);
            out.insert(layer.kind, top);
            cursor = top + layer.height;
            floor += layer.height;
        }
    }
    out
}

/// Bottom of the band content on the viewport axis.
pub(crate) fn band_bottom(
    layout: &StackLayout<TopLayerType>,
    band_offset: i32,
    min_height_offset: i32,
) -> i32 {
    let min_height_offset = min_height_offset.clamp(0, layout.total_min_height);
    (band_offset + layout.total_height).max(min_height_offset)
}

/// Neighbor a tracked layer is placed against instead of its ideal offset.
///
/// Hiding layers have no ideal offset and always follow their anchor. Showing layers
/// follow it only while the band animates.
fn attachment(slot: &TopSlot, animated: bool) -> Option<Anchor> {
    if slot.visibility.is_hiding() || animated {
        slot.visibility.anchor()
    } else {
        None
    }
}

pub(crate) fn settle_offsets(
    slots: &[TopSlot],
    ideal: &KindMap<TopLayerType, i32>,
    previous: &KindMap<TopLayerType, i32>,
    band_offset: i32,
    band_bottom: i32,
    animated: bool,
) -> KindMap<TopLayerType, i32> {
    let travel = Edge::Top.travel(band_offset);
    let settle = |slot: &TopSlot, target: i32| {
        if !animated {
            return target;
        }
        let previous = previous
            .get(slot.kind)
            .copied()
            .unwrap_or_else(|| Edge::Top.untracked_previous(target, slot.height));
        travel.settle(target, previous)
    };

    // Top down: everything except layers attached to the layer below them.
    let mut out = KindMap::new();
    let mut bottom = band_offset;
    for slot in slots.iter().filter(|slot| slot.is_tracked()) {
        let ideal = ideal.get(slot.kind).copied();
        let offset = match (attachment(slot, animated), ideal) {
            (Some(Anchor::Bottom), ideal) => {
                if let Some(ideal) = ideal
                    && slot.contributes
                {
                    bottom = ideal + slot.height;
                }
                continue;
            }
            (Some(Anchor::Top), _) | (None, None) => settle(slot, bottom),
            (None, Some(ideal)) => settle(slot, ideal),
        };
        out.insert(slot.kind, offset);
        if slot.contributes {
            bottom = offset + slot.height;
        }
    }

    // Bottom up: bottom-anchored layers sit on whatever is below them.
    let mut below = band_bottom;
    for slot in slots.iter().rev().filter(|slot| slot.is_tracked()) {
        let offset = match out.get(slot.kind).copied() {
            Some(offset) => offset,
            None => {
                let offset = settle(slot, below - slot.height);
                out.insert(slot.kind, offset);
                offset
            }
        };
        if slot.contributes {
            below = offset;
        }
    }
    out
}
