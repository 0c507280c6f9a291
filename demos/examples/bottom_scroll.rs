// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom band: scrolling, then hiding a layer with an animated height change.
//!
//! Run:
//! - `cargo run -p understory_demos --example bottom_scroll`

use std::cell::RefCell;
use std::rc::Rc;

use understory_band::{Edge, SimulatedSizer};
use understory_controls::bottom::{
    BottomLayer, BottomLayerType, BottomStacker, LayerVisibility, ScrollBehavior,
};

struct Bar {
    kind: BottomLayerType,
    height: i32,
    behavior: ScrollBehavior,
    visibility: LayerVisibility,
}

impl BottomLayer for Bar {
    fn layer_type(&self) -> BottomLayerType {
        self.kind
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn scroll_behavior(&self) -> ScrollBehavior {
        self.behavior
    }
    fn visibility(&self) -> LayerVisibility {
        self.visibility
    }
    fn on_offset_update(&mut self, offset: i32, at_resting_position: bool) {
        let rest = if at_resting_position { "" } else { " (moving)" };
        println!("  {:?} -> {offset}{rest}", self.kind);
    }
}

fn bar(kind: BottomLayerType, height: i32, behavior: ScrollBehavior) -> Rc<RefCell<Bar>> {
    Rc::new(RefCell::new(Bar {
        kind,
        height,
        behavior,
        visibility: LayerVisibility::Visible,
    }))
}

fn main() {
    let tabs = bar(BottomLayerType::TabGroupUi, 40, ScrollBehavior::DefaultScrollOff);
    let toolbar = bar(BottomLayerType::BottomToolbar, 56, ScrollBehavior::DefaultScrollOff);
    let chin = bar(BottomLayerType::BottomChin, 12, ScrollBehavior::NeverScrollOff);

    let mut stacker = BottomStacker::new(SimulatedSizer::new(Edge::Bottom));
    for layer in [&tabs, &toolbar, &chin] {
        stacker.add_layer(layer.clone()).unwrap();
    }

    println!("== At rest ==");
    stacker.request_update(false);
    println!(
        "  band: height {} min {}",
        stacker.total_height(),
        stacker.total_min_height()
    );

    for delta in [30, 30, 60] {
        let (scroll, min) = stacker.sizer_mut().scroll_by(delta);
        println!("== Scrolled to {scroll} ==");
        stacker.on_offset_changed(scroll, min, false);
    }
    let (scroll, min) = stacker.sizer_mut().scroll_by(-200);
    println!("== Scrolled back to {scroll} ==");
    stacker.on_offset_changed(scroll, min, false);

    println!("== Hiding the tab group ==");
    tabs.borrow_mut().visibility = LayerVisibility::Hiding;
    stacker.remove_layer(BottomLayerType::TabGroupUi);
    stacker.request_update(true);
    while let Some((scroll, min)) = stacker.sizer_mut().advance(10) {
        println!("-- band offset {scroll}");
        stacker.on_offset_changed(scroll, min, true);
    }
    println!(
        "  band: height {} min {}, {} layers registered",
        stacker.total_height(),
        stacker.total_min_height(),
        stacker.layer_count()
    );
}
