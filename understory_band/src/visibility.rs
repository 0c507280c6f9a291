// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective visibility resolution.
//!
//! Engines map their own visibility enums onto [`VisibilityClass`] and call
//! [`resolve_visibility`] once per update cycle. The result says which layers
//! contribute to the band right now.

use crate::kind::{KindMap, StackKind};

/// How a raw visibility state participates in resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VisibilityClass {
    /// Visible or animating in. Always contributes.
    Shown,
    /// Contributes only while some other layer is [`Shown`](Self::Shown).
    IfOthersShown,
    /// Animating out. Does not contribute, but still receives offsets.
    Hiding,
    /// Does not contribute.
    Hidden,
}

impl VisibilityClass {
    /// True for [`Hiding`](Self::Hiding).
    pub const fn is_hiding(self) -> bool {
        matches!(self, Self::Hiding)
    }
}

/// Resolve the effective visibility of every listed layer.
///
/// Two passes: the first looks for any unconditionally shown layer across the whole
/// set, the second resolves [`VisibilityClass::IfOthersShown`] layers against that
/// fact. Every listed kind gets an entry.
pub fn resolve_visibility<K: StackKind>(layers: &[(K, VisibilityClass)]) -> KindMap<K, bool> {
    let any_shown = layers
        .iter()
        .any(|(_, class)| matches!(class, VisibilityClass::Shown));
    let mut out = KindMap::new();
    for &(kind, class) in layers {
        let visible = match class {
            VisibilityClass::Shown => true,
            VisibilityClass::IfOthersShown => any_shown,
            VisibilityClass::Hiding | VisibilityClass::Hidden => false,
        };
        out.insert(kind, visible);
    }
    out
}
