// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The band sizer contract and an in-memory host.
//!
//! Engines push their computed totals into a [`BandSizer`] and read back the band's
//! current scroll state from it. The host layout system implements the trait;
//! [`SimulatedSizer`] is a self-contained host that drives height animations by
//! explicit steps, for tests, demos, and benchmarks.

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::motion::Edge;

/// The external layout host that owns the band's size and scroll state.
pub trait BandSizer {
    /// Whether the next [`set_height`](Self::set_height) call should animate.
    fn set_animate_height_changes(&mut self, animate: bool) {
        let _ = animate;
    }

    /// New total height and min height of the band.
    fn set_height(&mut self, total: i32, min_height: i32);

    /// How far the band is currently scrolled from fully shown.
    fn scroll_offset(&self) -> i32;

    /// The min height currently visible. Interpolated while min height animates.
    fn min_height_offset(&self) -> i32;
}

impl<S: BandSizer + ?Sized> BandSizer for &mut S {
    fn set_animate_height_changes(&mut self, animate: bool) {
        (**self).set_animate_height_changes(animate);
    }

    fn set_height(&mut self, total: i32, min_height: i32) {
        (**self).set_height(total, min_height);
    }

    fn scroll_offset(&self) -> i32 {
        (**self).scroll_offset()
    }

    fn min_height_offset(&self) -> i32 {
        (**self).min_height_offset()
    }
}

impl<S: BandSizer + ?Sized> BandSizer for Rc<RefCell<S>> {
    fn set_animate_height_changes(&mut self, animate: bool) {
        self.borrow_mut().set_animate_height_changes(animate);
    }

    fn set_height(&mut self, total: i32, min_height: i32) {
        self.borrow_mut().set_height(total, min_height);
    }

    fn scroll_offset(&self) -> i32 {
        self.borrow().scroll_offset()
    }

    fn min_height_offset(&self) -> i32 {
        self.borrow().min_height_offset()
    }
}

/// A band host kept entirely in memory.
///
/// - Non-animated height changes apply immediately; the scroll offset is clamped into
///   the new scrollable range.
/// - Animated height changes displace the scroll offset by the height delta (the band
///   keeps its old footprint on screen) and keep the old min height offset. Each
///   [`advance`](Self::advance) step then moves both toward rest.
#[derive(Clone, Debug)]
pub struct SimulatedSizer {
    edge: Edge,
    height: i32,
    min_height: i32,
    scroll_offset: i32,
    min_height_offset: i32,
    animate_next: bool,
    animating: bool,
    height_updates: usize,
}

impl SimulatedSizer {
    /// An empty, fully shown band anchored to `edge`.
    pub const fn new(edge: Edge) -> Self {
        Self {
            edge,
            height: 0,
            min_height: 0,
            scroll_offset: 0,
            min_height_offset: 0,
            animate_next: false,
            animating: false,
            height_updates: 0,
        }
    }

    /// Last total height received.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Last min height received.
    pub const fn min_height(&self) -> i32 {
        self.min_height
    }

    /// Number of [`BandSizer::set_height`] calls received.
    pub const fn height_updates(&self) -> usize {
        self.height_updates
    }

    /// Whether a height animation is in flight.
    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    /// Scroll the band by `delta` pixels; positive values hide more of it.
    ///
    /// Returns the new `(scroll_offset, min_height_offset)`.
    pub fn scroll_by(&mut self, delta: i32) -> (i32, i32) {
        let moved = match self.edge {
            Edge::Bottom => self.scroll_offset + delta,
            Edge::Top => self.scroll_offset - delta,
        };
        self.scroll_offset = self.clamp_scroll(moved);
        (self.scroll_offset, self.min_height_offset)
    }

    /// Move an in-flight animation up to `step` pixels toward rest.
    ///
    /// Returns the new `(scroll_offset, min_height_offset)`, or `None` when idle.
    pub fn advance(&mut self, step: i32) -> Option<(i32, i32)> {
        if !self.animating {
            return None;
        }
        let step = step.max(1);
        self.scroll_offset = approach(self.scroll_offset, 0, step);
        self.min_height_offset = approach(self.min_height_offset, self.min_height, step);
        if self.scroll_offset == 0 && self.min_height_offset == self.min_height {
            self.animating = false;
        }
        Some((self.scroll_offset, self.min_height_offset))
    }

    fn clamp_scroll(&self, offset: i32) -> i32 {
        let range = (self.height - self.min_height).max(0);
        match self.edge {
            Edge::Bottom => offset.clamp(0, range),
            Edge::Top => offset.clamp(-range, 0),
        }
    }
}

impl BandSizer for SimulatedSizer {
    fn set_animate_height_changes(&mut self, animate: bool) {
        self.animate_next = animate;
    }

    fn set_height(&mut self, total: i32, min_height: i32) {
        let delta = total - self.height;
        self.height = total;
        self.min_height = min_height;
        self.height_updates += 1;
        let animate = core::mem::take(&mut self.animate_next);
        if animate && (delta != 0 || self.min_height_offset != min_height) {
            self.scroll_offset = match self.edge {
                Edge::Bottom => self.scroll_offset + delta,
                Edge::Top => self.scroll_offset - delta,
            };
            self.animating = true;
        } else {
            self.scroll_offset = self.clamp_scroll(self.scroll_offset);
            self.min_height_offset = min_height;
            self.animating = false;
        }
    }

    fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    fn min_height_offset(&self) -> i32 {
        self.min_height_offset
    }
}

fn approach(value: i32, target: i32, step: i32) -> i32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}
