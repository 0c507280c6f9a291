// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_controls --heading-base-level=0

//! Understory Controls: layer stacking engines for browser-style control bands.
//!
//! Two engines built on [`understory_band`]:
//!
//! - [`bottom::BottomStacker`]: layers anchored to the bottom edge (tab groups, a
//!   bottom toolbar, a media player, an edge-to-edge chin).
//! - [`top::TopStacker`]: layers anchored to the top edge (status banner, tab strip,
//!   toolbar, bookmark bar), with overlay layers and anchored visibility transitions.
//!
//! ## Pipeline
//!
//! Every update runs the same stages:
//!
//! 1. Resolve each layer's raw visibility into "contributes to the band right now".
//! 2. Aggregate heights into the band's total height and min height, deciding which
//!    layers scroll off. The band sizer is told whenever the totals change.
//! 3. Reconcile offsets: place every visible (or hiding) layer for the band's current
//!    scroll offset and min height offset. During a height animation, offsets may
//!    only travel in the direction the band moves.
//! 4. Dispatch the offsets to the layers, after all of them are known.
//!
//! Updates are explicit. Registration changes nothing by itself; call
//! `request_update` for a synchronous run, or `request_update_posted` to coalesce
//! requests into one run the host performs later with `run_posted_update`.
//!
//! ## Ownership
//!
//! Stackers box their layers. To keep a handle on a layer, register an
//! `Rc<RefCell<_>>` clone of it; both layer traits are implemented for that type.
//! The same goes for the band sizer through [`understory_band::BandSizer`].
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_band::{Edge, SimulatedSizer};
//! use understory_controls::bottom::{
//!     BottomLayer, BottomLayerType, BottomStacker, LayerVisibility, ScrollBehavior,
//! };
//!
//! struct Bar {
//!     kind: BottomLayerType,
//!     height: i32,
//!     offset: i32,
//! }
//!
//! impl BottomLayer for Bar {
//!     fn layer_type(&self) -> BottomLayerType { self.kind }
//!     fn height(&self) -> i32 { self.height }
//!     fn scroll_behavior(&self) -> ScrollBehavior { ScrollBehavior::DefaultScrollOff }
//!     fn visibility(&self) -> LayerVisibility { LayerVisibility::Visible }
//!     fn on_offset_update(&mut self, offset: i32, _at_rest: bool) { self.offset = offset; }
//! }
//!
//! let toolbar = Rc::new(RefCell::new(Bar { kind: BottomLayerType::BottomToolbar, height: 56, offset: 0 }));
//! let chin = Rc::new(RefCell::new(Bar { kind: BottomLayerType::BottomChin, height: 8, offset: 0 }));
//!
//! let mut stacker = BottomStacker::new(SimulatedSizer::new(Edge::Bottom));
//! stacker.add_layer(toolbar.clone()).unwrap();
//! stacker.add_layer(chin.clone()).unwrap();
//! stacker.request_update(false);
//! assert_eq!(stacker.total_height(), 64);
//! assert_eq!((toolbar.borrow().offset, chin.borrow().offset), (-8, 0));
//!
//! // Scroll the band halfway away: the chin goes first, the toolbar follows.
//! let (scroll, min) = stacker.sizer_mut().scroll_by(32);
//! stacker.on_offset_changed(scroll, min, false);
//! assert_eq!((toolbar.borrow().offset, chin.borrow().offset), (24, 8));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bottom;
pub mod top;
