// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers stacked down from the top edge of the viewport.
//!
//! Offsets follow [`Edge::Top`](understory_band::Edge::Top) conventions: each offset
//! is the y position of a layer's top edge, and a fully hidden layer sits at minus
//! its height.

mod reconcile;
mod stacker;
mod types;

pub use stacker::TopStacker;
pub use types::{Anchor, TopLayer, TopLayerType, TopLayerVisibility, TopScrollBehavior};
