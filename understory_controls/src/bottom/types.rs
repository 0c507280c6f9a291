// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the bottom band: layer kinds, policies, visibility, and the layer contract.

use alloc::rc::Rc;
use core::cell::RefCell;

use understory_band::{ScrollPolicy, StackKind, VisibilityClass};

/// Kinds of layers the bottom band can host.
///
/// Declaration order is the stack order: the first kind sits farthest from the
/// bottom edge, the last one touches it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BottomLayerType {
    /// Page-load progress indicator.
    ProgressBar,
    /// Tab group strip.
    TabGroupUi,
    /// Main bottom toolbar.
    BottomToolbar,
    /// Media player for page read-aloud.
    ReadAloudPlayer,
    /// Edge-to-edge chin under everything else.
    BottomChin,
}

impl StackKind for BottomLayerType {
    const STACK_ORDER: &'static [Self] = &[
        Self::ProgressBar,
        Self::TabGroupUi,
        Self::BottomToolbar,
        Self::ReadAloudPlayer,
        Self::BottomChin,
    ];

    fn stack_index(self) -> usize {
        self as usize
    }
}

/// How a bottom layer reacts to the band scrolling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Always scrolls off.
    AlwaysScrollOff,
    /// Stays pinned and counts toward the min height.
    NeverScrollOff,
    /// Scrolls off unless a pinned layer is stacked above it.
    DefaultScrollOff,
}

impl From<ScrollBehavior> for ScrollPolicy {
    fn from(behavior: ScrollBehavior) -> Self {
        match behavior {
            ScrollBehavior::AlwaysScrollOff => Self::Always,
            ScrollBehavior::NeverScrollOff => Self::Never,
            ScrollBehavior::DefaultScrollOff => Self::Default,
        }
    }
}

/// Raw visibility reported by a bottom layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerVisibility {
    /// Shown at rest.
    Visible,
    /// Not shown.
    Hidden,
    /// Animating in; already counts toward the band size.
    Showing,
    /// Animating out; no longer counts, but keeps receiving offsets.
    Hiding,
    /// Shown only while another layer is [`Visible`](Self::Visible) or [`Showing`](Self::Showing).
    VisibleIfOthersVisible,
}

impl LayerVisibility {
    /// Class used by the shared resolver.
    pub const fn class(self) -> VisibilityClass {
        match self {
            Self::Visible | Self::Showing => VisibilityClass::Shown,
            Self::Hidden => VisibilityClass::Hidden,
            Self::Hiding => VisibilityClass::Hiding,
            Self::VisibleIfOthersVisible => VisibilityClass::IfOthersShown,
        }
    }

    /// True for [`Hiding`](Self::Hiding).
    pub const fn is_hiding(self) -> bool {
        matches!(self, Self::Hiding)
    }
}

/// A layer participating in the bottom band.
///
/// The stacker only reads geometry and pushes offsets back. Offsets are measured from
/// the layer's resting position with the band fully shown: positive values move the
/// layer toward (and past) the bottom edge.
pub trait BottomLayer {
    /// Kind of this layer. Must not change after registration.
    fn layer_type(&self) -> BottomLayerType;

    /// Current height in pixels.
    fn height(&self) -> i32;

    /// Scroll-off policy.
    fn scroll_behavior(&self) -> ScrollBehavior;

    /// Current raw visibility.
    fn visibility(&self) -> LayerVisibility;

    /// Receive the layer's new offset.
    ///
    /// `at_resting_position` is true once no height animation is moving the band.
    fn on_offset_update(&mut self, offset: i32, at_resting_position: bool);
}

impl<T: BottomLayer + ?Sized> BottomLayer for Rc<RefCell<T>> {
    fn layer_type(&self) -> BottomLayerType {
        self.borrow().layer_type()
    }

    fn height(&self) -> i32 {
        self.borrow().height()
    }

    fn scroll_behavior(&self) -> ScrollBehavior {
        self.borrow().scroll_behavior()
    }

    fn visibility(&self) -> LayerVisibility {
        self.borrow().visibility()
    }

    fn on_offset_update(&mut self, offset: i32, at_resting_position: bool) {
        self.borrow_mut().on_offset_update(offset, at_resting_position);
    }
}
