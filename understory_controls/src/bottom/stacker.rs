// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bottom band engine.

use alloc::boxed::Box;
use alloc::vec::Vec;

use understory_band::{
    BandCore, BandSizer, Edge, LayerState, SizeDivergence, StackError, StackerConfig,
    sanitize_height,
};

use super::reconcile::{LayerSlot, ideal_offsets, settle_offsets};
use super::types::{BottomLayer, BottomLayerType};

/// Stacks [`BottomLayer`]s against the bottom edge and keeps their offsets in sync
/// with a [`BandSizer`].
///
/// Registration ([`add_layer`](Self::add_layer), [`remove_layer`](Self::remove_layer))
/// never recomputes anything. Call [`request_update`](Self::request_update) (or post
/// one) after changing layers, and forward the host's notifications to
/// [`on_offset_changed`](Self::on_offset_changed) and
/// [`on_height_changed`](Self::on_height_changed).
pub struct BottomStacker<S: BandSizer> {
    core: BandCore<BottomLayerType, dyn BottomLayer, S>,
}

impl<S: BandSizer> core::fmt::Debug for BottomStacker<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BottomStacker")
            .field("core", &self.core)
            .finish()
    }
}

impl<S: BandSizer> BottomStacker<S> {
    /// Create an empty stacker driving `sizer`, with the default config.
    pub fn new(sizer: S) -> Self {
        Self::with_config(sizer, StackerConfig::default())
    }

    /// Create an empty stacker driving `sizer`.
    pub fn with_config(sizer: S, config: StackerConfig) -> Self {
        Self {
            core: BandCore::new(Edge::Bottom, sizer, config),
        }
    }

    /// Register a layer under its [`layer_type`](BottomLayer::layer_type).
    ///
    /// A second layer of the same type is rejected unless the first one is still
    /// animating out after [`remove_layer`](Self::remove_layer), in which case it is
    /// replaced.
    pub fn add_layer<L: BottomLayer + 'static>(
        &mut self,
        layer: L,
    ) -> Result<(), StackError<BottomLayerType>> {
        self.core.add_layer(layer.layer_type(), Box::new(layer))
    }

    /// Remove the layer of type `kind`. Returns false if none is registered.
    ///
    /// A layer that is mid-way through hiding stays registered and keeps receiving
    /// offsets until it is dispatched at rest (or stops hiding); then it is dropped.
    pub fn remove_layer(&mut self, kind: BottomLayerType) -> bool {
        self.core
            .remove_layer(kind, |layer| layer.visibility().is_hiding())
    }

    /// Run the full pipeline now, reading band offsets from the sizer.
    pub fn request_update(&mut self, animate: bool) {
        let states = self.snapshot();
        self.core.relayout(states.iter().copied(), animate);
        let (band_offset, min_height_offset) = self.core.band_position();
        self.reposition(&states, band_offset, min_height_offset, animate);
    }

    /// Ask for a pipeline run at the host's next opportunity.
    ///
    /// Requests coalesce until [`run_posted_update`](Self::run_posted_update); the
    /// run animates if any coalesced request asked for it.
    pub fn request_update_posted(&mut self, animate: bool) {
        self.core.post_update(animate);
    }

    /// Perform the coalesced posted run, if any. Returns whether one ran.
    pub fn run_posted_update(&mut self) -> bool {
        match self.core.take_posted_update() {
            Some(animate) => {
                self.request_update(animate);
                true
            }
            None => false,
        }
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
        let states = self.snapshot();
        self.core.relayout(states.iter().copied(), animate);
        self.reposition(&states, scroll_offset, min_height_offset, animate);
    }

    /// The host resized the band. Reports (and returns) a mismatch with the last
    /// computed totals; the computed totals stay authoritative either way.
    pub fn on_height_changed(&mut self, total: i32, min_height: i32) -> Option<SizeDivergence> {
        self.core.on_height_changed(total, min_height)
    }

    /// Last computed total height.
    pub fn total_height(&self) -> i32 {
        self.core.total_height()
    }

    /// Last computed min height.
    pub fn total_min_height(&self) -> i32 {
        self.core.total_min_height()
    }

    /// Last offset dispatched to a visible or hiding layer.
    pub fn offset_of(&self, kind: BottomLayerType) -> Option<i32> {
        self.core.offset_of(kind)
    }

    /// Effective visibility from the last pipeline run.
    pub fn is_visible(&self, kind: BottomLayerType) -> bool {
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

    fn snapshot(&self) -> Vec<LayerState<BottomLayerType>> {
        self.core
            .layers()
            .iter()
            .map(|(kind, layer)| LayerState {
                kind,
                height: sanitize_height(kind, layer.height()),
                policy: layer.scroll_behavior().into(),
                class: layer.visibility().class(),
                contributes: true,
            })
            .collect()
    }

    fn reposition(
        &mut self,
        states: &[LayerState<BottomLayerType>],
        band_offset: i32,
        min_height_offset: i32,
        animated: bool,
    ) {
        let layout = self.core.layout();
        let ideal = ideal_offsets(layout, band_offset, min_height_offset);
        let slots: Vec<LayerSlot> = states
            .iter()
            .map(|state| LayerSlot {
                kind: state.kind,
                height: state.height,
                visible: self.core.is_visible(state.kind),
                hiding: state.class.is_hiding(),
            })
            .collect();
        let resting = self
            .core
            .is_resting(animated, band_offset, min_height_offset);
        // Once the band is at rest there is no motion left to constrain.
        let finals = settle_offsets(
            &slots,
            &ideal,
            self.core.offsets(),
            band_offset,
            layout.total_height,
            animated && !resting,
        );
        log::trace!(
            "bottom band offset {band_offset} (min {min_height_offset}), animated: {animated}, resting: {resting}"
        );
        self.core.dispatch(
            states.iter().map(|state| (state.kind, state.height)),
            &finals,
            resting,
            |layer, offset, at_rest| layer.on_offset_update(offset, at_rest),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use understory_band::SimulatedSizer;

    use crate::bottom::{LayerVisibility, ScrollBehavior};

    use BottomLayerType::*;
    use LayerVisibility::*;
    use ScrollBehavior::*;

    struct TestLayer {
        kind: BottomLayerType,
        height: i32,
        behavior: ScrollBehavior,
        visibility: LayerVisibility,
        updates: Vec<(i32, bool)>,
    }

    impl TestLayer {
        fn last(&self) -> Option<(i32, bool)> {
            self.updates.last().copied()
        }

        fn offsets(&self) -> Vec<i32> {
            self.updates.iter().map(|&(offset, _)| offset).collect()
        }
    }

    impl BottomLayer for TestLayer {
        fn layer_type(&self) -> BottomLayerType {
            self.kind
        }

        fn height(&self) -> i32 {
            self.height
        }

        fn scroll_behavior(&self) -> ScrollBehavior {
            self.behavior
        }

        fn visibility(&self) -> LayerVisibility {
            self.visibility
        }

        fn on_offset_update(&mut self, offset: i32, at_resting_position: bool) {
            self.updates.push((offset, at_resting_position));
        }
    }

    type Handle = Rc<RefCell<TestLayer>>;

    fn layer(
        kind: BottomLayerType,
        height: i32,
        behavior: ScrollBehavior,
        visibility: LayerVisibility,
    ) -> Handle {
        Rc::new(RefCell::new(TestLayer {
            kind,
            height,
            behavior,
            visibility,
            updates: Vec::new(),
        }))
    }

    fn stacker() -> BottomStacker<SimulatedSizer> {
        BottomStacker::with_config(
            SimulatedSizer::new(Edge::Bottom),
            StackerConfig::default().with_strict_ordering(true),
        )
    }

    fn add(stacker: &mut BottomStacker<SimulatedSizer>, handle: &Handle) {
        stacker.add_layer(handle.clone()).unwrap();
    }

    fn last_offset(handle: &Handle) -> Option<i32> {
        handle.borrow().last().map(|(offset, _)| offset)
    }

    fn drive_animation(stacker: &mut BottomStacker<SimulatedSizer>, step: i32) {
        while let Some((scroll, min)) = stacker.sizer_mut().advance(step) {
            stacker.on_offset_changed(scroll, min, true);
        }
    }

    #[test]
    fn single_scroll_off_layer_follows_the_band() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 100, AlwaysScrollOff, Visible);
        add(&mut stacker, &toolbar);

        stacker.request_update(false);
        assert_eq!((stacker.total_height(), stacker.total_min_height()), (100, 0));
        assert_eq!(toolbar.borrow().last(), Some((0, true)));

        stacker.on_offset_changed(60, 0, false);
        assert_eq!(last_offset(&toolbar), Some(60));
        stacker.on_offset_changed(100, 0, false);
        assert_eq!(last_offset(&toolbar), Some(100));
    }

    #[test]
    fn stacked_scroll_off_layers() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 100, AlwaysScrollOff, Visible);
        let chin = layer(BottomChin, 10, AlwaysScrollOff, Visible);
        add(&mut stacker, &chin);
        add(&mut stacker, &toolbar);

        stacker.request_update(false);
        assert_eq!(last_offset(&toolbar), Some(-10));
        assert_eq!(last_offset(&chin), Some(0));

        stacker.on_offset_changed(50, 0, false);
        assert_eq!(last_offset(&toolbar), Some(40));
        assert_eq!(last_offset(&chin), Some(10));
    }

    #[test]
    fn conditional_layer_needs_another_visible_layer() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 100, NeverScrollOff, Hidden);
        let chin = layer(BottomChin, 10, DefaultScrollOff, VisibleIfOthersVisible);
        add(&mut stacker, &toolbar);
        add(&mut stacker, &chin);

        stacker.request_update(false);
        assert!(!stacker.is_visible(BottomChin));
        assert_eq!((stacker.total_height(), stacker.total_min_height()), (0, 0));
        assert_eq!(last_offset(&chin), Some(10));
        assert_eq!(stacker.offset_of(BottomChin), None);

        toolbar.borrow_mut().visibility = Visible;
        stacker.request_update(false);
        assert!(stacker.is_visible(BottomChin));
        assert_eq!((stacker.total_height(), stacker.total_min_height()), (110, 110));
        assert_eq!(stacker.sizer().height(), 110);
    }

    #[test]
    fn hiding_layer_is_dispatched_until_the_band_settles() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 100, AlwaysScrollOff, Visible);
        let chin = layer(BottomChin, 10, DefaultScrollOff, Visible);
        add(&mut stacker, &toolbar);
        add(&mut stacker, &chin);
        stacker.request_update(false);
        assert_eq!(stacker.offset_of(BottomChin), Some(0));

        chin.borrow_mut().visibility = Hiding;
        assert!(stacker.remove_layer(BottomChin));
        assert_eq!(stacker.layer_count(), 2);

        stacker.request_update(true);
        assert_eq!(stacker.sizer().scroll_offset(), -10);
        assert_eq!(chin.borrow().last(), Some((0, false)));

        drive_animation(&mut stacker, 4);
        assert_eq!(chin.borrow().offsets(), vec![0, 0, 4, 8, 10]);
        assert_eq!(chin.borrow().last(), Some((10, true)));
        assert_eq!(toolbar.borrow().last(), Some((0, true)));
        assert_eq!(stacker.offset_of(BottomChin), None);
        assert_eq!(stacker.layer_count(), 1);

        // Dropped layers stop receiving updates.
        stacker.request_update(false);
        assert_eq!(chin.borrow().updates.len(), 5);
    }

    #[test]
    fn zero_height_layer_does_not_disturb_neighbors() {
        let mut stacker = stacker();
        let tabs = layer(TabGroupUi, 100, AlwaysScrollOff, Visible);
        let toolbar = layer(BottomToolbar, 0, AlwaysScrollOff, Visible);
        let chin = layer(BottomChin, 10, AlwaysScrollOff, Visible);
        for handle in [&tabs, &toolbar, &chin] {
            add(&mut stacker, handle);
        }

        stacker.request_update(false);
        assert_eq!(last_offset(&tabs), Some(-10));
        assert_eq!(last_offset(&toolbar), Some(-10));
        assert_eq!(last_offset(&chin), Some(0));
    }

    #[test]
    fn all_hidden_band_is_empty() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 56, DefaultScrollOff, Hidden);
        let player = layer(ReadAloudPlayer, 40, NeverScrollOff, Hidden);
        add(&mut stacker, &toolbar);
        add(&mut stacker, &player);

        stacker.request_update(false);
        assert_eq!((stacker.total_height(), stacker.total_min_height()), (0, 0));
        assert_eq!(toolbar.borrow().last(), Some((56, true)));
        assert_eq!(player.borrow().last(), Some((40, true)));
        assert_eq!(stacker.sizer().height_updates(), 0);
    }

    #[test]
    fn duplicate_layer_is_rejected() {
        let mut stacker = stacker();
        add(&mut stacker, &layer(BottomToolbar, 56, DefaultScrollOff, Visible));
        let err = stacker.add_layer(layer(BottomToolbar, 10, DefaultScrollOff, Visible));
        assert_eq!(
            err,
            Err(StackError::DuplicateLayer {
                kind: BottomToolbar
            })
        );
        assert_eq!(stacker.layer_count(), 1);
    }

    #[test]
    fn removing_a_settled_layer_drops_it_immediately() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 56, DefaultScrollOff, Visible);
        add(&mut stacker, &toolbar);
        stacker.request_update(false);

        assert!(stacker.remove_layer(BottomToolbar));
        assert!(!stacker.remove_layer(BottomToolbar));
        assert_eq!(stacker.layer_count(), 0);
        assert_eq!(stacker.offset_of(BottomToolbar), None);

        stacker.request_update(false);
        assert_eq!(stacker.total_height(), 0);
        assert_eq!(toolbar.borrow().updates.len(), 1);
    }

    #[test]
    fn re_adding_replaces_a_retiring_layer() {
        let mut stacker = stacker();
        let old = layer(BottomChin, 10, DefaultScrollOff, Visible);
        add(&mut stacker, &old);
        stacker.request_update(false);
        old.borrow_mut().visibility = Hiding;
        assert!(stacker.remove_layer(BottomChin));

        let new = layer(BottomChin, 12, DefaultScrollOff, Visible);
        add(&mut stacker, &new);
        stacker.request_update(false);
        assert_eq!(stacker.layer_count(), 1);
        assert_eq!(stacker.total_height(), 12);
        assert_eq!(last_offset(&new), Some(0));
        assert_eq!(old.borrow().updates.len(), 1);
    }

    #[test]
    fn growing_band_only_moves_layers_up() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 100, AlwaysScrollOff, Visible);
        add(&mut stacker, &toolbar);
        stacker.request_update(false);

        let chin = layer(BottomChin, 10, AlwaysScrollOff, Showing);
        add(&mut stacker, &chin);
        stacker.request_update(true);
        assert_eq!(stacker.sizer().scroll_offset(), 10);
        drive_animation(&mut stacker, 4);

        assert_eq!(toolbar.borrow().offsets(), vec![0, 0, -4, -8, -10]);
        assert_eq!(chin.borrow().offsets(), vec![10, 6, 2, 0]);
        for handle in [&toolbar, &chin] {
            let offsets = handle.borrow().offsets();
            assert!(
                offsets.windows(2).all(|w| w[1] <= w[0]),
                "offsets must not increase while growing: {offsets:?}"
            );
        }
        assert_eq!(chin.borrow().last(), Some((0, true)));
    }

    #[test]
    fn pinned_layer_added_while_min_height_animates() {
        let mut stacker = stacker();
        let player = layer(ReadAloudPlayer, 50, NeverScrollOff, Visible);
        add(&mut stacker, &player);
        stacker.request_update(false);
        assert_eq!(stacker.sizer().min_height_offset(), 50);

        let chin = layer(BottomChin, 30, NeverScrollOff, Showing);
        add(&mut stacker, &chin);
        stacker.request_update(true);
        assert_eq!((stacker.total_height(), stacker.total_min_height()), (80, 80));
        drive_animation(&mut stacker, 10);

        assert_eq!(player.borrow().offsets(), vec![0, 0, -10, -20, -30]);
        assert_eq!(chin.borrow().offsets(), vec![30, 20, 10, 0]);
        let resting: Vec<bool> = chin.borrow().updates.iter().map(|u| u.1).collect();
        assert_eq!(resting, vec![false, false, false, true]);
    }

    #[test]
    fn offsets_stay_within_the_band_across_a_scroll_sweep() {
        let mut stacker = stacker();
        let layers = [
            layer(ProgressBar, 4, AlwaysScrollOff, Visible),
            layer(BottomToolbar, 56, DefaultScrollOff, Visible),
            layer(ReadAloudPlayer, 40, NeverScrollOff, Visible),
            layer(BottomChin, 8, NeverScrollOff, Visible),
        ];
        for handle in &layers {
            add(&mut stacker, handle);
        }
        stacker.request_update(false);
        let total = stacker.total_height();
        assert_eq!((total, stacker.total_min_height()), (108, 48));

        for band_offset in (0..=60).step_by(5) {
            stacker.on_offset_changed(band_offset, 48, false);
            for handle in &layers {
                let handle = handle.borrow();
                let offset = handle.last().map(|u| u.0).unwrap();
                assert!(
                    (-total..=total).contains(&offset),
                    "{:?} offset {offset} out of range at band offset {band_offset}",
                    handle.kind
                );
            }
        }
        // Fully scrolled: the scroll-off layers are tucked behind the pinned region.
        assert_eq!(last_offset(&layers[0]), Some(-44));
        assert_eq!(last_offset(&layers[1]), Some(8));
        assert_eq!(last_offset(&layers[2]), Some(-8));
        assert_eq!(last_offset(&layers[3]), Some(0));
    }

    #[test]
    fn layers_nearer_the_edge_sit_lower_at_rest() {
        let mut stacker = stacker();
        let progress = layer(ProgressBar, 4, DefaultScrollOff, Visible);
        let tabs = layer(TabGroupUi, 30, DefaultScrollOff, Visible);
        let toolbar = layer(BottomToolbar, 56, DefaultScrollOff, Visible);
        for handle in [&progress, &tabs, &toolbar] {
            add(&mut stacker, handle);
        }
        stacker.request_update(false);
        let offsets: Vec<i32> = [&progress, &tabs, &toolbar]
            .iter()
            .map(|h| last_offset(h).unwrap())
            .collect();
        assert_eq!(offsets, vec![-86, -56, 0]);
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]), "order: {offsets:?}");
    }

    #[test]
    fn repeated_updates_are_idempotent() {
        let mut stacker = stacker();
        let toolbar = layer(BottomToolbar, 56, DefaultScrollOff, Visible);
        let chin = layer(BottomChin, 12, NeverScrollOff, Visible);
        add(&mut stacker, &toolbar);
        add(&mut stacker, &chin);

        stacker.request_update(false);
        let first = (toolbar.borrow().last(), chin.borrow().last());
        stacker.request_update(false);
        let second = (toolbar.borrow().last(), chin.borrow().last());
        assert_eq!(first, second);
        assert_eq!(stacker.sizer().height_updates(), 1);
    }

    #[test]
    fn posted_requests_coalesce_into_one_run() {
        let mut stacker = stacker();
        let scheduled = Rc::new(Cell::new(0));
        let counter = scheduled.clone();
        stacker.set_update_hook(move || counter.set(counter.get() + 1));
        let toolbar = layer(BottomToolbar, 56, DefaultScrollOff, Visible);
        add(&mut stacker, &toolbar);

        stacker.request_update_posted(false);
        stacker.request_update_posted(true);
        stacker.request_update_posted(false);
        assert_eq!(scheduled.get(), 1);
        assert!(stacker.is_update_pending());
        assert!(toolbar.borrow().updates.is_empty());

        assert!(stacker.run_posted_update());
        assert!(!stacker.run_posted_update());
        assert_eq!(toolbar.borrow().updates.len(), 1);
        // The coalesced run animated the height change.
        assert!(stacker.sizer().is_animating());
    }

    #[test]
    fn host_size_divergence_is_reported() {
        let mut stacker = stacker();
        add(&mut stacker, &layer(BottomToolbar, 56, NeverScrollOff, Visible));
        stacker.request_update(false);

        assert_eq!(stacker.on_height_changed(56, 56), None);
        let divergence = stacker.on_height_changed(60, 56).unwrap();
        assert_eq!(divergence.reported_height, 60);
        assert_eq!(divergence.expected_height, 56);
        assert_eq!(stacker.total_height(), 56);
    }

    #[test]
    fn lenient_ordering_pins_misplaced_scroll_off_layer() {
        let mut stacker = BottomStacker::with_config(
            SimulatedSizer::new(Edge::Bottom),
            StackerConfig::default().with_strict_ordering(false),
        );
        let player = layer(ReadAloudPlayer, 40, NeverScrollOff, Visible);
        let chin = layer(BottomChin, 10, AlwaysScrollOff, Visible);
        add(&mut stacker, &player);
        add(&mut stacker, &chin);
        stacker.request_update(false);
        assert_eq!((stacker.total_height(), stacker.total_min_height()), (50, 50));
        assert_eq!(last_offset(&player), Some(-10));
        assert_eq!(last_offset(&chin), Some(0));
    }

    #[test]
    #[should_panic(expected = "stacked after pinned layers")]
    fn strict_ordering_rejects_misplaced_scroll_off_layer() {
        let mut stacker = stacker();
        add(&mut stacker, &layer(ReadAloudPlayer, 40, NeverScrollOff, Visible));
        add(&mut stacker, &layer(BottomChin, 10, AlwaysScrollOff, Visible));
        stacker.request_update(false);
    }

    #[test]
    fn shared_sizer_handle_observes_updates() {
        let sizer = Rc::new(RefCell::new(SimulatedSizer::new(Edge::Bottom)));
        let mut stacker = BottomStacker::new(sizer.clone());
        stacker
            .add_layer(layer(TabGroupUi, 30, DefaultScrollOff, Visible))
            .unwrap();
        stacker.request_update(false);
        assert_eq!(sizer.borrow().height(), 30);
        assert_eq!(sizer.borrow().min_height(), 0);
    }
}
