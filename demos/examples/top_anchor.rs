// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top band: a bookmark bar sliding in under the toolbar, with an overlay progress bar.
//!
//! Run:
//! - `cargo run -p understory_demos --example top_anchor`

use std::cell::RefCell;
use std::rc::Rc;

use understory_band::{Edge, SimulatedSizer};
use understory_controls::top::{
    TopLayer, TopLayerType, TopLayerVisibility, TopScrollBehavior, TopStacker,
};

struct Bar {
    kind: TopLayerType,
    height: i32,
    visibility: TopLayerVisibility,
}

impl TopLayer for Bar {
    fn layer_type(&self) -> TopLayerType {
        self.kind
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn scroll_behavior(&self) -> TopScrollBehavior {
        match self.kind {
            TopLayerType::Toolbar => TopScrollBehavior::NeverScrollable,
            _ => TopScrollBehavior::DefaultScrollable,
        }
    }
    fn visibility(&self) -> TopLayerVisibility {
        self.visibility
    }
    fn contributes_to_total_height(&self) -> bool {
        self.kind != TopLayerType::ProgressBar
    }
    fn prepare_for_height_adjustment_animation(&mut self, current_offset: i32) {
        println!("  {:?} starts {:?} at {current_offset}", self.kind, self.visibility);
    }
    fn on_offset_update(&mut self, offset: i32, at_resting_position: bool) {
        let rest = if at_resting_position { "" } else { " (moving)" };
        println!("  {:?} -> {offset}{rest}", self.kind);
    }
}

fn bar(kind: TopLayerType, height: i32, visibility: TopLayerVisibility) -> Rc<RefCell<Bar>> {
    Rc::new(RefCell::new(Bar {
        kind,
        height,
        visibility,
    }))
}

fn main() {
    let tabs = bar(TopLayerType::TabStrip, 40, TopLayerVisibility::Visible);
    let toolbar = bar(TopLayerType::Toolbar, 56, TopLayerVisibility::Visible);
    let bookmarks = bar(TopLayerType::BookmarkBar, 30, TopLayerVisibility::Hidden);
    let progress = bar(TopLayerType::ProgressBar, 2, TopLayerVisibility::Visible);

    let mut stacker = TopStacker::new(SimulatedSizer::new(Edge::Top));
    for layer in [&tabs, &toolbar, &bookmarks, &progress] {
        stacker.add_layer(layer.clone()).unwrap();
    }

    println!("== At rest ==");
    stacker.request_update(false);

    println!("== Bookmark bar shows, anchored to the toolbar ==");
    bookmarks.borrow_mut().visibility = TopLayerVisibility::ShowingTopAnchor;
    // Posted requests coalesce; the host runs them once per frame.
    stacker.set_update_hook(|| println!("  (update scheduled)"));
    stacker.request_update_posted(true);
    stacker.request_update_posted(false);
    stacker.run_posted_update();
    while let Some((scroll, min)) = stacker.sizer_mut().advance(10) {
        println!("-- band offset {scroll}");
        stacker.on_offset_changed(scroll, min, true);
    }
    bookmarks.borrow_mut().visibility = TopLayerVisibility::Visible;

    let (scroll, min) = stacker.sizer_mut().scroll_by(50);
    println!("== Scrolled to {scroll} ==");
    stacker.on_offset_changed(scroll, min, false);
    println!(
        "  band: height {} min {}",
        stacker.total_height(),
        stacker.total_min_height()
    );
}
