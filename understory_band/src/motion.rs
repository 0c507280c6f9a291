// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge conventions and the monotonic clamp applied during height animations.
//!
//! A band is anchored to one [`Edge`] of the viewport. The edge fixes the sign
//! conventions of layer offsets:
//!
//! - [`Edge::Bottom`]: offsets grow downward. A hidden layer sits at `+height`.
//!   A negative band offset means the band is shrinking toward its new footprint.
//! - [`Edge::Top`]: offsets grow downward too, but layers hide upward. A hidden layer
//!   sits at `-height`. A positive band offset means the band is shrinking.
//!
//! While a height change animates, every layer may only travel in the direction the
//! band is moving. [`Travel::settle`] combines the ideal offset of this cycle with the
//! offset dispatched in the previous cycle to enforce that.

/// The viewport edge a band is anchored to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Anchored to the top of the viewport.
    Top,
    /// Anchored to the bottom of the viewport.
    Bottom,
}

/// Direction layer offsets are allowed to move in during an animated cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Travel {
    /// Offsets may only grow.
    Increasing,
    /// Offsets may only shrink.
    Decreasing,
}

impl Travel {
    /// Final offset given this cycle's `ideal` and the `previous` dispatched offset.
    pub fn settle(self, ideal: i32, previous: i32) -> i32 {
        match self {
            Self::Increasing => ideal.max(previous),
            Self::Decreasing => ideal.min(previous),
        }
    }
}

impl core::fmt::Display for Edge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

impl Edge {
    /// Offset of a fully hidden layer of the given height.
    pub const fn hidden_offset(self, height: i32) -> i32 {
        match self {
            Self::Top => -height,
            Self::Bottom => height,
        }
    }

    /// Whether a band offset means the band is shrinking toward its new footprint.
    pub const fn is_shrinking(self, band_offset: i32) -> bool {
        match self {
            Self::Top => band_offset > 0,
            Self::Bottom => band_offset < 0,
        }
    }

    /// Allowed travel direction for layers at the given band offset.
    pub const fn travel(self, band_offset: i32) -> Travel {
        match (self, self.is_shrinking(band_offset)) {
            (Self::Bottom, true) | (Self::Top, false) => Travel::Increasing,
            (Self::Bottom, false) | (Self::Top, true) => Travel::Decreasing,
        }
    }

    /// Stand-in for the previous offset of a layer that was not dispatched last cycle.
    ///
    /// The layer is treated as if it came from its hidden position next to `ideal`.
    pub const fn untracked_previous(self, ideal: i32, height: i32) -> i32 {
        ideal + self.hidden_offset(height)
    }
}

/// Whether a dispatch happens with the band at rest.
///
/// Non-animated cycles are always at rest. Animated cycles are at rest once the band
/// offset reaches zero and the min height offset reaches its target.
pub const fn at_resting_position(
    animated: bool,
    band_offset: i32,
    min_height_offset: i32,
    total_min_height: i32,
) -> bool {
    !animated || (band_offset == 0 && min_height_offset >= total_min_height)
}
