// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalescing of posted update requests.
//!
//! ## Usage
//!
//! 1) Each posted request calls [`PendingUpdate::request`]. Only the request that
//!    turns a clean state dirty returns `true`; that is the one that should ask the
//!    host to schedule a run (for example "before the next frame").
//! 2) When the host runs, call [`PendingUpdate::take`] to obtain the coalesced
//!    animate flag and reset the state.
//!
//! ```
//! use understory_band::pending::PendingUpdate;
//!
//! let mut pending = PendingUpdate::new();
//! assert!(pending.request(false));
//! assert!(!pending.request(true));
//! assert_eq!(pending.take(), Some(true));
//! assert_eq!(pending.take(), None);
//! ```
//!
//! [`PostedUpdates`] pairs the state with the host's scheduling hook.

use alloc::boxed::Box;

use bitflags::bitflags;

bitflags! {
    /// State bits of a [`PendingUpdate`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u8 {
        /// A run has been requested and not yet performed.
        const DIRTY   = 0b0000_0001;
        /// At least one coalesced request asked for an animated run.
        const ANIMATE = 0b0000_0010;
    }
}

impl Default for UpdateFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Dirty bit plus the OR of requested animate flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingUpdate {
    flags: UpdateFlags,
}

impl PendingUpdate {
    /// A clean state.
    pub const fn new() -> Self {
        Self {
            flags: UpdateFlags::empty(),
        }
    }

    /// Record a request. Returns true when a run must be scheduled.
    pub fn request(&mut self, animate: bool) -> bool {
        let newly_dirty = !self.flags.contains(UpdateFlags::DIRTY);
        self.flags.insert(UpdateFlags::DIRTY);
        if animate {
            self.flags.insert(UpdateFlags::ANIMATE);
        }
        newly_dirty
    }

    /// Whether a run is pending.
    pub const fn is_pending(&self) -> bool {
        self.flags.contains(UpdateFlags::DIRTY)
    }

    /// Current state bits.
    pub const fn flags(&self) -> UpdateFlags {
        self.flags
    }

    /// Consume the pending run, returning its animate flag.
    pub fn take(&mut self) -> Option<bool> {
        let flags = core::mem::take(&mut self.flags);
        flags
            .contains(UpdateFlags::DIRTY)
            .then(|| flags.contains(UpdateFlags::ANIMATE))
    }
}

/// A [`PendingUpdate`] plus the single-shot hook that asks the host for a run.
#[derive(Default)]
pub struct PostedUpdates {
    pending: PendingUpdate,
    hook: Option<Box<dyn FnMut()>>,
}

impl core::fmt::Debug for PostedUpdates {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostedUpdates")
            .field("pending", &self.pending)
            .field("has_hook", &self.hook.is_some())
            .finish()
    }
}

impl PostedUpdates {
    /// No pending run and no hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the hook invoked when a posted request needs a run scheduled.
    pub fn set_hook(&mut self, hook: impl FnMut() + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// Post a request, invoking the hook if this request dirtied a clean state.
    pub fn post(&mut self, animate: bool) {
        if !self.pending.request(animate) {
            log::trace!("coalescing posted update (animate: {animate})");
            return;
        }
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
    }

    /// Whether a posted run is waiting.
    pub const fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Consume the pending run, returning its coalesced animate flag.
    pub fn take(&mut self) -> Option<bool> {
        self.pending.take()
    }
}
