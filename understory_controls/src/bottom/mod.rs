// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers stacked against the bottom edge of the viewport.
//!
//! Offsets follow [`Edge::Bottom`](understory_band::Edge::Bottom) conventions: `0` is
//! the layer's resting position with the band fully shown, and a layer's own height
//! moves it fully past the edge.

mod reconcile;
mod stacker;
mod types;

pub use stacker::BottomStacker;
pub use types::{BottomLayer, BottomLayerType, LayerVisibility, ScrollBehavior};
