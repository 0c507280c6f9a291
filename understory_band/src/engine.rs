// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edge-independent half of a band engine.
//!
//! [`BandCore`] owns everything a stacker keeps between runs apart from its offset
//! math: the layer registry, the last resolved visibility and layout, the offset
//! cache, the band sizer, and the posted-update state.
//!
//! ## Usage
//!
//! 1) Read every registered layer into a [`LayerState`].
//! 2) [`BandCore::relayout`]: resolve visibility, aggregate sizes, and push changed
//!    totals to the sizer. Read the band offsets *after* this step; an animated
//!    height change displaces them.
//! 3) Compute final offsets for the tracked layers. This part depends on the edge.
//! 4) [`BandCore::dispatch`] them. Untracked layers get their hidden offset, and
//!    retired layers are dropped once they reach it.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::config::StackerConfig;
use crate::error::{SizeDivergence, StackError};
use crate::kind::{KindMap, StackKind};
use crate::motion::{Edge, at_resting_position};
use crate::pending::PostedUpdates;
use crate::registry::LayerRegistry;
use crate::size::{ScrollPolicy, SizeInput, StackLayout, aggregate_sizes};
use crate::sizer::BandSizer;
use crate::visibility::{VisibilityClass, resolve_visibility};

/// One registered layer, read once at the start of a pipeline run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayerState<K> {
    /// Layer kind.
    pub kind: K,
    /// Height, already passed through [`sanitize_height`](crate::sanitize_height).
    pub height: i32,
    /// Scroll-off policy.
    pub policy: ScrollPolicy,
    /// Raw visibility, classified.
    pub class: VisibilityClass,
    /// Whether the layer takes up room in the band.
    pub contributes: bool,
}

/// Registry, caches and host of one band.
///
/// `L` is the engine's layer trait object, e.g. `dyn BottomLayer`.
pub struct BandCore<K: StackKind, L: ?Sized, S: BandSizer> {
    edge: Edge,
    layers: LayerRegistry<K, L>,
    visible: KindMap<K, bool>,
    layout: StackLayout<K>,
    offsets: KindMap<K, i32>,
    sizer: S,
    config: StackerConfig,
    posted: PostedUpdates,
}

impl<K: StackKind, L: ?Sized, S: BandSizer> core::fmt::Debug for BandCore<K, L, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BandCore")
            .field("edge", &self.edge)
            .field("layers", &self.layers)
            .field("visible", &self.visible)
            .field("totals", &self.layout.totals())
            .field("offsets", &self.offsets)
            .field("config", &self.config)
            .field("posted", &self.posted)
            .finish_non_exhaustive()
    }
}

impl<K: StackKind, L: ?Sized, S: BandSizer> BandCore<K, L, S> {
    /// An empty band anchored to `edge`, driving `sizer`.
    pub fn new(edge: Edge, sizer: S, config: StackerConfig) -> Self {
        Self {
            edge,
            layers: LayerRegistry::new(),
            visible: KindMap::new(),
            layout: StackLayout::default(),
            offsets: KindMap::new(),
            sizer,
            config,
            posted: PostedUpdates::new(),
        }
    }

    /// The edge this band is anchored to.
    pub const fn edge(&self) -> Edge {
        self.edge
    }

    /// Register `layer` under `kind`. Rejections are logged and returned.
    pub fn add_layer(&mut self, kind: K, layer: Box<L>) -> Result<(), StackError<K>> {
        let edge = self.edge;
        self.layers
            .register(kind, layer)
            .inspect_err(|err| log::warn!("rejected {edge} layer: {err}"))
    }

    /// Remove the layer of type `kind`. Returns false if none is registered.
    ///
    /// If `is_hiding` says the layer is animating out and it has a cached offset, it
    /// is retired instead: [`dispatch`](Self::dispatch) drops it once it gets its
    /// hidden offset.
    pub fn remove_layer(&mut self, kind: K, is_hiding: impl FnOnce(&L) -> bool) -> bool {
        let hiding = self.layers.get(kind).is_some_and(is_hiding);
        if hiding && self.offsets.contains(kind) {
            log::debug!("retiring hiding {} layer {kind:?}", self.edge);
            return self.layers.retire(kind);
        }
        self.offsets.remove(kind);
        self.visible.remove(kind);
        self.layers.unregister(kind).is_some()
    }

    /// Registered layers.
    pub fn layers(&self) -> &LayerRegistry<K, L> {
        &self.layers
    }

    /// Registered layers, mutably.
    pub fn layers_mut(&mut self) -> &mut LayerRegistry<K, L> {
        &mut self.layers
    }

    /// Resolve visibility and sizes for `states`, telling the sizer about new totals.
    ///
    /// # Panics
    ///
    /// Panics on an ordering violation when the config is strict.
    pub fn relayout(&mut self, states: impl IntoIterator<Item = LayerState<K>>, animate: bool) {
        let states: Vec<LayerState<K>> = states.into_iter().collect();
        let classes: Vec<_> = states.iter().map(|state| (state.kind, state.class)).collect();
        self.visible = resolve_visibility(&classes);

        let visible = &self.visible;
        let inputs = states
            .iter()
            .filter(|state| visible.get(state.kind).copied().unwrap_or(false))
            .map(|state| SizeInput {
                kind: state.kind,
                height: state.height,
                policy: state.policy,
                contributes: state.contributes,
            });
        let layout = aggregate_sizes(inputs, &self.config);

        let changed = layout.totals() != self.layout.totals();
        self.layout = layout;
        if changed {
            let (total, min_height) = self.layout.totals();
            log::debug!(
                "{} band resized to {total} (min {min_height}), animate: {animate}",
                self.edge
            );
            self.sizer.set_animate_height_changes(animate);
            self.sizer.set_height(total, min_height);
        }
    }

    /// Layout from the last [`relayout`](Self::relayout).
    pub fn layout(&self) -> &StackLayout<K> {
        &self.layout
    }

    /// Offsets dispatched to tracked layers on the last run.
    pub fn offsets(&self) -> &KindMap<K, i32> {
        &self.offsets
    }

    /// The sizer's current `(scroll_offset, min_height_offset)`.
    pub fn band_position(&self) -> (i32, i32) {
        (self.sizer.scroll_offset(), self.sizer.min_height_offset())
    }

    /// Whether a run at these band offsets dispatches resting positions.
    pub fn is_resting(&self, animated: bool, band_offset: i32, min_height_offset: i32) -> bool {
        at_resting_position(
            animated,
            band_offset,
            min_height_offset,
            self.layout.total_min_height,
        )
    }

    /// Hand every `(kind, height)` in `layers` its offset through `deliver`.
    ///
    /// Kinds with an entry in `finals` get it and are cached; the rest get their
    /// hidden offset with `at_resting_position = true`. A retired layer is sent its
    /// hidden offset once `resting` (or once it is no longer tracked), then dropped.
    pub fn dispatch(
        &mut self,
        layers: impl IntoIterator<Item = (K, i32)>,
        finals: &KindMap<K, i32>,
        resting: bool,
        mut deliver: impl FnMut(&mut L, i32, bool),
    ) {
        for (kind, height) in layers {
            let retiring = self.layers.is_retiring(kind);
            let tracked = finals
                .get(kind)
                .copied()
                .filter(|_| !(retiring && resting));
            let (offset, at_rest) = match tracked {
                Some(offset) => {
                    self.offsets.insert(kind, offset);
                    (offset, resting)
                }
                None => {
                    self.offsets.remove(kind);
                    (self.edge.hidden_offset(height), true)
                }
            };
            if let Some(layer) = self.layers.get_mut(kind) {
                deliver(layer, offset, at_rest);
            }
            if retiring && tracked.is_none() {
                log::debug!("dropping retired {} layer {kind:?}", self.edge);
                self.layers.unregister(kind);
                self.visible.remove(kind);
            }
        }
    }

    /// Post a coalesced run request.
    pub fn post_update(&mut self, animate: bool) {
        self.posted.post(animate);
    }

    /// Consume the posted run, returning its coalesced animate flag.
    pub fn take_posted_update(&mut self) -> Option<bool> {
        self.posted.take()
    }

    /// Install the hook called when a posted run needs scheduling.
    pub fn set_update_hook(&mut self, hook: impl FnMut() + 'static) {
        self.posted.set_hook(hook);
    }

    /// Whether a posted run is waiting.
    pub const fn is_update_pending(&self) -> bool {
        self.posted.is_pending()
    }

    /// Compare a host size report with the last computed totals, logging a mismatch
    /// when configured to.
    pub fn on_height_changed(&self, total: i32, min_height: i32) -> Option<SizeDivergence> {
        let divergence = SizeDivergence::check((total, min_height), self.layout.totals());
        if self.config.report_divergence
            && let Some(divergence) = &divergence
        {
            log::warn!("{} band: {divergence}", self.edge);
        }
        divergence
    }

    /// Last computed total height.
    pub fn total_height(&self) -> i32 {
        self.layout.total_height
    }

    /// Last computed min height.
    pub fn total_min_height(&self) -> i32 {
        self.layout.total_min_height
    }

    /// Last offset dispatched to a tracked layer.
    pub fn offset_of(&self, kind: K) -> Option<i32> {
        self.offsets.get(kind).copied()
    }

    /// Effective visibility from the last [`relayout`](Self::relayout).
    pub fn is_visible(&self, kind: K) -> bool {
        self.visible.get(kind).copied().unwrap_or(false)
    }

    /// Registered layers, retiring ones included.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The band host.
    pub fn sizer(&self) -> &S {
        &self.sizer
    }

    /// The band host, mutably.
    pub fn sizer_mut(&mut self) -> &mut S {
        &mut self.sizer
    }

    /// Active configuration.
    pub fn config(&self) -> &StackerConfig {
        &self.config
    }
}
