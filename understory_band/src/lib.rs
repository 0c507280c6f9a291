// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_band --heading-base-level=0

//! Understory Band: building blocks for edge-anchored layer bands.
//!
//! A *band* is a stack of independent UI layers anchored to one edge of a viewport
//! (a toolbar, a tab strip, a progress bar, ...). The band as a whole can grow, shrink,
//! and scroll partially off-screen; some layers scroll away with it while others stay
//! pinned and define the band's *min height*.
//!
//! This crate holds the parts of a band engine that do not depend on which edge the
//! band is anchored to:
//!
//! - [`StackKind`] and [`KindMap`]: closed layer-kind sets with a fixed walk order.
//! - [`LayerRegistry`]: one layer per kind, with duplicate rejection and retirement.
//! - [`resolve_visibility`]: raw visibility states to "contributes right now".
//! - [`aggregate_sizes`]: total height, min height, and the scroll-off rule.
//! - [`Edge`] and [`Travel`]: sign conventions and the monotonic animation clamp.
//! - [`PendingUpdate`]: coalescing of posted update requests.
//! - [`BandSizer`]: the host contract, with [`SimulatedSizer`] as an in-memory host.
//! - [`BandCore`]: the registry, caches, host and posted state of one band, with the
//!   shared relayout and dispatch stages.
//!
//! Engines that put these together live in `understory_controls`.
//!
//! ## Not a layout engine
//!
//! Nothing here measures or draws. Layers report their heights; the engine computes
//! offsets and hands them back through callbacks.
//!
//! # Example
//!
//! ```rust
//! use understory_band::{
//!     ScrollPolicy, SizeInput, StackKind, StackerConfig, VisibilityClass, aggregate_sizes,
//!     resolve_visibility,
//! };
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq)]
//! #[repr(u8)]
//! enum Kind {
//!     Toolbar,
//!     Chin,
//! }
//!
//! impl StackKind for Kind {
//!     const STACK_ORDER: &'static [Self] = &[Self::Toolbar, Self::Chin];
//!     fn stack_index(self) -> usize {
//!         self as usize
//!     }
//! }
//!
//! let visible = resolve_visibility(&[
//!     (Kind::Toolbar, VisibilityClass::Shown),
//!     (Kind::Chin, VisibilityClass::IfOthersShown),
//! ]);
//! assert_eq!(visible.get(Kind::Chin), Some(&true));
//!
//! let layout = aggregate_sizes(
//!     [
//!         SizeInput { kind: Kind::Toolbar, height: 56, policy: ScrollPolicy::Default, contributes: true },
//!         SizeInput { kind: Kind::Chin, height: 12, policy: ScrollPolicy::Never, contributes: true },
//!     ],
//!     &StackerConfig::default(),
//! );
//! assert_eq!(layout.totals(), (68, 12));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod engine;
pub mod error;
pub mod kind;
pub mod motion;
pub mod pending;
pub mod registry;
pub mod size;
pub mod sizer;
pub mod visibility;

pub use config::StackerConfig;
pub use engine::{BandCore, LayerState};
pub use error::{SizeDivergence, StackError};
pub use kind::{KindMap, StackKind};
pub use motion::{Edge, Travel, at_resting_position};
pub use pending::{PendingUpdate, PostedUpdates, UpdateFlags};
pub use registry::LayerRegistry;
pub use size::{
    LayerSize, ScrollPolicy, SizeInput, StackLayout, aggregate_sizes, sanitize_height,
    should_scroll_off,
};
pub use sizer::{BandSizer, SimulatedSizer};
pub use visibility::{VisibilityClass, resolve_visibility};
