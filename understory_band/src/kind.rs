// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed layer-kind sets and the fixed-size maps keyed by them.
//!
//! A band engine knows every kind of layer it can host at compile time. Each kind
//! set implements [`StackKind`], which fixes the walk order used by every stage of
//! the pipeline. [`KindMap`] stores one optional value per kind in a flat vector,
//! so iteration order is the stack order and never the insertion order.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

/// A closed set of layer kinds with a fixed stacking order.
///
/// ## Contract
///
/// - [`STACK_ORDER`](Self::STACK_ORDER) lists every kind exactly once.
/// - `STACK_ORDER[k.stack_index()] == k` for every kind `k`.
///
/// Fieldless `#[repr(u8)]` enums whose variants are declared in stack order satisfy
/// this with `self as usize`.
pub trait StackKind: Copy + Eq + Debug + 'static {
    /// Every kind, in the order the engine walks them.
    const STACK_ORDER: &'static [Self];

    /// Position of this kind in [`STACK_ORDER`](Self::STACK_ORDER).
    fn stack_index(self) -> usize;
}

/// A map with one optional slot per [`StackKind`] variant.
///
/// Lookups are direct slot accesses. Iteration walks slots in stack order.
#[derive(Clone, PartialEq, Eq)]
pub struct KindMap<K, V> {
    slots: Vec<Option<V>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: StackKind, V> Default for KindMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StackKind, V: Debug> Debug for KindMap<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: StackKind, V> KindMap<K, V> {
    /// Create a map with every slot empty.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(K::STACK_ORDER.len());
        slots.resize_with(K::STACK_ORDER.len(), || None);
        Self {
            slots,
            _kind: PhantomData,
        }
    }

    /// Value stored for `kind`, if any.
    pub fn get(&self, kind: K) -> Option<&V> {
        self.slots[kind.stack_index()].as_ref()
    }

    /// Mutable value stored for `kind`, if any.
    pub fn get_mut(&mut self, kind: K) -> Option<&mut V> {
        self.slots[kind.stack_index()].as_mut()
    }

    /// Store `value` for `kind`, returning the previous value.
    pub fn insert(&mut self, kind: K, value: V) -> Option<V> {
        self.slots[kind.stack_index()].replace(value)
    }

    /// Clear the slot for `kind`, returning its value.
    pub fn remove(&mut self, kind: K) -> Option<V> {
        self.slots[kind.stack_index()].take()
    }

    /// Whether `kind` has a value.
    pub fn contains(&self, kind: K) -> bool {
        self.slots[kind.stack_index()].is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Occupied entries in stack order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        K::STACK_ORDER
            .iter()
            .filter_map(|&kind| self.get(kind).map(|v| (kind, v)))
    }

    /// Occupied kinds in stack order.
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(kind, _)| kind)
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(K, &V) -> bool) {
        for &kind in K::STACK_ORDER {
            let slot = &mut self.slots[kind.stack_index()];
            if let Some(v) = slot.as_ref()
                && !keep(kind, v)
            {
                *slot = None;
            }
        }
    }
}
