// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the top band.

use alloc::rc::Rc;
use core::cell::RefCell;

use understory_band::{ScrollPolicy, StackKind, VisibilityClass};

/// Kinds of layers the top band can host, in stack order from the top edge down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TopLayerType {
    /// Status banner (offline, captive portal, ...).
    StatusIndicator,
    /// Tab strip.
    TabStrip,
    /// Main toolbar.
    Toolbar,
    /// Bookmark bar.
    BookmarkBar,
    /// Separator line under the controls.
    Hairline,
    /// Page-load progress bar. Usually drawn as an overlay.
    ProgressBar,
}

impl StackKind for TopLayerType {
    const STACK_ORDER: &'static [Self] = &[
        Self::StatusIndicator,
        Self::TabStrip,
        Self::Toolbar,
        Self::BookmarkBar,
        Self::Hairline,
        Self::ProgressBar,
    ];

    fn stack_index(self) -> usize {
        self as usize
    }
}

/// How a top layer reacts to the band scrolling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TopScrollBehavior {
    /// Stays pinned and counts toward the min height.
    NeverScrollable,
    /// Scrolls away unless a pinned layer is stacked above it.
    DefaultScrollable,
}

impl From<TopScrollBehavior> for ScrollPolicy {
    fn from(behavior: TopScrollBehavior) -> Self {
        match behavior {
            TopScrollBehavior::NeverScrollable => Self::Never,
            TopScrollBehavior::DefaultScrollable => Self::Default,
        }
    }
}

/// Which edge of a transitioning layer stays attached to its neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The layer's top edge follows the layer above it.
    Top,
    /// The layer's bottom edge follows the layer below it.
    Bottom,
}

/// Raw visibility reported by a top layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TopLayerVisibility {
    /// Shown at rest.
    Visible,
    /// Not shown.
    Hidden,
    /// Animating in, attached by its top edge.
    ShowingTopAnchor,
    /// Animating out, attached by its top edge.
    HidingTopAnchor,
    /// Animating in, attached by its bottom edge.
    ShowingBottomAnchor,
    /// Animating out, attached by its bottom edge.
    HidingBottomAnchor,
}

impl TopLayerVisibility {
    /// Class used by the shared resolver.
    pub const fn class(self) -> VisibilityClass {
        match self {
            Self::Visible | Self::ShowingTopAnchor | Self::ShowingBottomAnchor => {
                VisibilityClass::Shown
            }
            Self::Hidden => VisibilityClass::Hidden,
            Self::HidingTopAnchor | Self::HidingBottomAnchor => VisibilityClass::Hiding,
        }
    }

    /// Anchor of a transitional state; `None` for [`Visible`](Self::Visible) and
    /// [`Hidden`](Self::Hidden).
    pub const fn anchor(self) -> Option<Anchor> {
        match self {
            Self::ShowingTopAnchor | Self::HidingTopAnchor => Some(Anchor::Top),
            Self::ShowingBottomAnchor | Self::HidingBottomAnchor => Some(Anchor::Bottom),
            Self::Visible | Self::Hidden => None,
        }
    }

    /// Whether the layer is animating in or out.
    pub const fn is_transitioning(self) -> bool {
        self.anchor().is_some()
    }

    /// Whether the layer is animating out.
    pub const fn is_hiding(self) -> bool {
        matches!(self, Self::HidingTopAnchor | Self::HidingBottomAnchor)
    }
}

/// A layer participating in the top band.
///
/// Offsets are the y position of the layer's top edge relative to the viewport's top
/// edge. A fully hidden layer sits at minus its height.
pub trait TopLayer {
    /// Kind of this layer. Must not change after registration.
    fn layer_type(&self) -> TopLayerType;

    /// Current height in pixels.
    fn height(&self) -> i32;

    /// Scroll policy.
    fn scroll_behavior(&self) -> TopScrollBehavior;

    /// Current raw visibility.
    fn visibility(&self) -> TopLayerVisibility;

    /// Whether the layer takes up room in the band.
    ///
    /// Overlays return false: they still receive offsets, aligned to the bottom of
    /// the content stacked above them.
    fn contributes_to_total_height(&self) -> bool {
        true
    }

    /// Called once when an animated visibility transition starts, with the offset the
    /// layer was last dispatched (minus its height if it was hidden).
    fn prepare_for_height_adjustment_animation(&mut self, current_offset: i32) {
        let _ = current_offset;
    }

    /// Receive the layer's new offset.
    fn on_offset_update(&mut self, offset: i32, at_resting_position: bool);
}

impl<T: TopLayer + ?Sized> TopLayer for Rc<RefCell<T>> {
    fn layer_type(&self) -> TopLayerType {
        self.borrow().layer_type()
    }

    fn height(&self) -> i32 {
        self.borrow().height()
    }

    fn scroll_behavior(&self) -> TopScrollBehavior {
        self.borrow().scroll_behavior()
    }

    fn visibility(&self) -> TopLayerVisibility {
        self.borrow().visibility()
    }

    fn contributes_to_total_height(&self) -> bool {
        self.borrow().contributes_to_total_height()
    }

    fn prepare_for_height_adjustment_animation(&mut self, current_offset: i32) {
        self.borrow_mut()
            .prepare_for_height_adjustment_animation(current_offset);
    }

    fn on_offset_update(&mut self, offset: i32, at_resting_position: bool) {
        self.borrow_mut().on_offset_update(offset, at_resting_position);
    }
}
