// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack-ordered layer registry.
//!
//! ## Semantics
//!
//! - At most one layer per kind. Registering a kind twice is rejected with
//!   [`StackError::DuplicateLayer`] and the first registration stays in place.
//! - A layer can be *retired* instead of removed outright. A retiring layer stays
//!   registered (it still receives offsets while it animates out) until the engine
//!   calls [`LayerRegistry::unregister`]. Registering the same kind again replaces a
//!   retiring layer instead of failing.
//! - Iteration always follows [`StackKind::STACK_ORDER`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::StackError;
use crate::kind::{KindMap, StackKind};

/// Layers keyed by kind, plus their retirement marks.
///
/// `L` is usually a trait object such as `dyn MyLayer`.
pub struct LayerRegistry<K: StackKind, L: ?Sized> {
    layers: KindMap<K, Box<L>>,
    retiring: KindMap<K, ()>,
}

impl<K: StackKind, L: ?Sized> Default for LayerRegistry<K, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StackKind, L: ?Sized> core::fmt::Debug for LayerRegistry<K, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kinds: Vec<K> = self.layers.kinds().collect();
        let retiring: Vec<K> = self.retiring.kinds().collect();
        f.debug_struct("LayerRegistry")
            .field("kinds", &kinds)
            .field("retiring", &retiring)
            .finish()
    }
}

impl<K: StackKind, L: ?Sized> LayerRegistry<K, L> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            layers: KindMap::new(),
            retiring: KindMap::new(),
        }
    }

    /// Register `layer` under `kind`.
    ///
    /// Fails if a live (non-retiring) layer already holds `kind`.
    pub fn register(&mut self, kind: K, layer: Box<L>) -> Result<(), StackError<K>> {
        if self.layers.contains(kind) {
            if self.retiring.remove(kind).is_none() {
                return Err(StackError::DuplicateLayer { kind });
            }
            log::debug!("replacing retiring layer {kind:?}");
        }
        self.layers.insert(kind, layer);
        Ok(())
    }

    /// Remove the layer for `kind` immediately, returning it.
    pub fn unregister(&mut self, kind: K) -> Option<Box<L>> {
        self.retiring.remove(kind);
        self.layers.remove(kind)
    }

    /// Mark the layer for `kind` as retiring. Returns false if `kind` is not registered.
    pub fn retire(&mut self, kind: K) -> bool {
        if !self.layers.contains(kind) {
            return false;
        }
        self.retiring.insert(kind, ());
        true
    }

    /// Whether `kind` is registered and retiring.
    pub fn is_retiring(&self, kind: K) -> bool {
        self.retiring.contains(kind)
    }

    /// Whether a layer is registered for `kind` (retiring or not).
    pub fn contains(&self, kind: K) -> bool {
        self.layers.contains(kind)
    }

    /// The layer registered for `kind`.
    pub fn get(&self, kind: K) -> Option<&L> {
        self.layers.get(kind).map(|layer| &**layer)
    }

    /// The layer registered for `kind`, mutably.
    pub fn get_mut(&mut self, kind: K) -> Option<&mut L> {
        self.layers.get_mut(kind).map(|layer| &mut **layer)
    }

    /// Number of registered layers, retiring ones included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Registered layers in stack order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &L)> + '_ {
        self.layers.iter().map(|(kind, layer)| (kind, &**layer))
    }

    /// Registered kinds in stack order.
    pub fn kinds(&self) -> Vec<K> {
        self.layers.kinds().collect()
    }
}
