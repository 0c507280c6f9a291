// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The top band engine.

use alloc::boxed::Box;
use alloc::vec::Vec;

use understory_band::{
    BandCore, BandSizer, Edge, KindMap, LayerState, SizeDivergence, StackError,
    StackerConfig, sanitize_height,
};

use super::reconcile::{TopSlot, band_bottom, ideal_offsets, settle_offsets};
use super::types::{TopLayer, TopLayerType, TopLayerVisibility};

#[derive(Copy, Clone, Debug)]
struct Snapshot {
    state: LayerState<TopLayerType>,
    visibility: TopLayerVisibility,
}

/// Stacks [`TopLayer`]s down from the top edge and keeps their offsets in sync with a
/// [`BandSizer`].
///
/// Same pipeline as [`BottomStacker`](crate::bottom::BottomStacker), with top-edge
/// sign conventions, overlay layers that take no room, and anchored visibility
/// transitions. Layers entering an anchored transition get
/// [`prepare_for_height_adjustment_animation`](TopLayer::prepare_for_height_adjustment_animation)
/// once, at the first animated update that sees the new state.
pub struct TopStacker<S: BandSizer> {
    core: BandCore<TopLayerType, dyn TopLayer, S>,
    prepared: KindMap<TopLayerType, TopLayerVisibility>,
}

impl<S: BandSizer> core::fmt::Debug for TopStacker<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TopStacker")
            .field("core", &self.core)
            .field("prepared", &self.prepared)
            .finish()
    }
}

impl<S: BandSizer> TopStacker<S> {
    /// Create an empty stacker driving `sizer`, with the default config.
    pub fn new(sizer: S) -> Self {
        Self::with_config(sizer, StackerConfig::default())
    }

    /// Create an empty stacker driving `sizer`.
    pub fn with_config(sizer: S, config: StackerConfig) -> Self {
        Self {
            core: BandCore::new(Edge::Top, sizer, config),
            prepared: KindMap::new(),
        }
    }

    /// Register a layer under its [`layer_type`](TopLayer::layer_type).
    pub fn add_layer<L: TopLayer + 'static>(
        &mut self,
        layer: L,
    ) -> Result<(), StackError<TopLayerType>> {
        self.core.add_layer(layer.layer_type(), Box::new(layer))
    }

    /// Remove the layer of type `kind`. Returns false if none is registered.
    ///
    /// Hiding layers are kept until their animation settles.
    pub fn remove_layer(&mut self, kind: TopLayerType) -> bool {
        let removed = self
            .core
            .remove_layer(kind, |layer| layer.visibility().is_hiding());
        if !self.core.layers().contains(kind) {
            self.prepared.remove(kind);
        }
        removed
    }

    /// Run the full pipeline now, reading band offsets from the sizer.
    pub fn request_update(&mut self, animate: bool) {
        let snapshot = self.snapshot();
        self.core
            .relayout(snapshot.iter().map(|layer| layer.state), animate);
        let (band_offset, min_height_offset) = self.core.band_position();
        self.reposition(&snapshot, band_offset, min_height_offset, animate);
    }

    /// Ask for a coalesced pipeline run at the host's next opportunity.
    pub fn request_update_posted(&mut self, animate: bool) {
        self.core.post_update(animate);
    }

    /// Perform the coalesced posted run, if any. Returns whether one ran.
    pub fn run_posted_update(&mut self) -> bool {
        let Some(animate) = self.core.take_posted_update() else {
            return false;
        };
        self.request_update(animate);
        true
    }

    /// Install the hook called when a posted run needs scheduling.
    pub fn set_update_hook(&mut self, hook: impl FnMut() + 'static) {
        self.core.set_update_hook(hook);
    }

    /// Whether a posted run is waiting.
    pub const fn is_update_pending(&self) -> bool {
        self.core.is_update_pending()
    }

    /// The host moved the band: recompute and dispatch with the given offsets.
    pub fn on_offset_changed(&mut self, scroll_offset: i32, min_height_offset: i32, animate: bool) {
        let snapshot = self.snapshot();
        self.core
            .relayout(snapshot.iter().map(|layer| layer.state), animate);
        self.reposition(&snapshot, scroll_offset, min_height_offset, animate);
    }

    /// The host resized the band. Returns a mismatch with the last computed totals.
    pub fn on_height_changed(&mut self, total: i32, min_height: i32) -> Option<SizeDivergence> {
        self.core.on_height_changed(total, min_height)
    }

    /// Last computed total height. Overlays are not included.
    pub fn total_height(&self) -> i32 {
        self.core.total_height()
    }

    /// Last computed min height.
    pub fn total_min_height(&self) -> i32 {
        self.core.total_min_height()
    }

    /// Last offset dispatched to a visible or hiding layer.
    pub fn offset_of(&self, kind: TopLayerType) -> Option<i32> {
        self.core.offset_of(kind)
    }

    /// Effective visibility from the last pipeline run.
    pub fn is_visible(&self, kind: TopLayerType) -> bool {
        self.core.is_visible(kind)
    }

    /// Registered layers, retiring ones included.
    pub fn layer_count(&self) -> usize {
        self.core.layer_count()
    }

    /// The band host.
    pub fn sizer(&self) -> &S {
        self.core.sizer()
    }

    /// The band host, mutably.
    pub fn sizer_mut(&mut self) -> &mut S {
        self.core.sizer_mut()
    }

    /// Active configuration.
    pub fn config(&self) -> &StackerConfig {
        self.core.config()
    }

    fn snapshot(&self) -> Vec<Snapshot> {
        self.core
            .layers()
            .iter()
            .map(|(kind, layer)| {
                let visibility = layer.visibility();
                Snapshot {
                    state: LayerState {
                        kind,
                        height: sanitize_height(kind, layer.height()),
                        policy: layer.scroll_behavior().into(),
                        class: visibility.class(),
                        contributes: layer.contributes_to_total_height(),
                    },
                    visibility,
                }
            })
            .collect()
    }

    fn prepare_transitions(&mut self, snapshot: &[Snapshot], animated: bool) {
        for layer in snapshot {
            let kind = layer.state.kind;
            if !layer.visibility.is_transitioning() {
                self.prepared.remove(kind);
                continue;
            }
            if !animated || self.prepared.get(kind) == Some(&layer.visibility) {
                continue;
            }
            let current = self
                .core
                .offset_of(kind)
                .unwrap_or(Edge::Top.hidden_offset(layer.state.height));
            log::trace!("preparing {kind:?} for {:?} at {current}", layer.visibility);
            if let Some(handle) = self.core.layers_mut().get_mut(kind) {
                handle.prepare_for_height_adjustment_animation(current);
            }
            self.prepared.insert(kind, layer.visibility);
        }
    }

    fn reposition(
        &mut self,
        snapshot: &[Snapshot],
        band_offset: i32,
        min_height_offset: i32,
        animated: bool,
    ) {
        self.prepare_transitions(snapshot, animated);

        let layout = self.core.layout();
        let ideal = ideal_offsets(layout, band_offset, min_height_offset);
        let slots: Vec<TopSlot> = snapshot
            .iter()
            .map(|layer| TopSlot {
                kind: layer.state.kind,
                height: layer.state.height,
                visible: self.core.is_visible(layer.state.kind),
                visibility: layer.visibility,
                contributes: layer.state.contributes,
            })
            .collect();
        let resting = self
            .core
            .is_resting(animated, band_offset, min_height_offset);
        let finals = settle_offsets(
            &slots,
            &ideal,
            self.core.offsets(),
            band_offset,
            band_bottom(layout, band_offset, min_height_offset),
            animated && !resting,
        );
        log::trace!(
            "top band offset {band_offset} (min {min_height_offset}), animated: {animated}, resting: {resting}"
        );
        self.core.dispatch(
            snapshot.iter().map(|layer| (layer.state.kind, layer.state.height)),
            &finals,
            resting,
            |layer, offset, at_rest| layer.on_offset_update(offset, at_rest),
        );
        let layers = self.core.layers();
        self.prepared.retain(|kind, _| layers.contains(kind));
    }
}
