// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_band::{Edge, SimulatedSizer, StackerConfig};
use understory_controls::bottom::{
    BottomLayer, BottomLayerType, BottomStacker, LayerVisibility, ScrollBehavior,
};
use understory_controls::top::{
    TopLayer, TopLayerType, TopLayerVisibility, TopScrollBehavior, TopStacker,
};

struct Bottom {
    kind: BottomLayerType,
    height: i32,
    behavior: ScrollBehavior,
    visibility: LayerVisibility,
    offset: i32,
}

impl BottomLayer for Bottom {
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
    fn on_offset_update(&mut self, offset: i32, _at_resting_position: bool) {
        self.offset = offset;
    }
}

struct Top {
    kind: TopLayerType,
    height: i32,
    behavior: TopScrollBehavior,
    visibility: TopLayerVisibility,
    offset: i32,
}

impl TopLayer for Top {
    fn layer_type(&self) -> TopLayerType {
        self.kind
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn scroll_behavior(&self) -> TopScrollBehavior {
        self.behavior
    }
    fn visibility(&self) -> TopLayerVisibility {
        self.visibility
    }
    fn contributes_to_total_height(&self) -> bool {
        self.kind != TopLayerType::ProgressBar
    }
    fn on_offset_update(&mut self, offset: i32, _at_resting_position: bool) {
        self.offset = offset;
    }
}

type BottomHandle = Rc<RefCell<Bottom>>;

fn bottom_stack() -> (BottomStacker<SimulatedSizer>, Vec<BottomHandle>) {
    use BottomLayerType::*;
    use ScrollBehavior::*;
    let bars = [
        (ProgressBar, 4, AlwaysScrollOff),
        (TabGroupUi, 40, DefaultScrollOff),
        (BottomToolbar, 56, DefaultScrollOff),
        (ReadAloudPlayer, 64, NeverScrollOff),
        (BottomChin, 12, NeverScrollOff),
    ];
    let mut stacker = BottomStacker::with_config(
        SimulatedSizer::new(Edge::Bottom),
        StackerConfig::default().with_strict_ordering(false),
    );
    let mut handles = Vec::with_capacity(bars.len());
    for (kind, height, behavior) in bars {
        let handle = Rc::new(RefCell::new(Bottom {
            kind,
            height,
            behavior,
            visibility: LayerVisibility::Visible,
            offset: 0,
        }));
        stacker.add_layer(handle.clone()).unwrap();
        handles.push(handle);
    }
    stacker.request_update(false);
    (stacker, handles)
}

fn top_stack() -> TopStacker<SimulatedSizer> {
    use TopLayerType::*;
    use TopScrollBehavior::*;
    let bars = [
        (StatusIndicator, 20, DefaultScrollable),
        (TabStrip, 40, DefaultScrollable),
        (Toolbar, 56, NeverScrollable),
        (BookmarkBar, 30, NeverScrollable),
        (Hairline, 1, NeverScrollable),
        (ProgressBar, 2, NeverScrollable),
    ];
    let mut stacker = TopStacker::new(SimulatedSizer::new(Edge::Top));
    for (kind, height, behavior) in bars {
        stacker
            .add_layer(Top {
                kind,
                height,
                behavior,
                visibility: TopLayerVisibility::Visible,
                offset: 0,
            })
            .unwrap();
    }
    stacker.request_update(false);
    stacker
}

fn bench_bottom(c: &mut Criterion) {
    let mut group = c.benchmark_group("bottom");
    group.throughput(Throughput::Elements(5));
    group.bench_function("request_update_sync", |b| {
        let (mut stacker, _handles) = bottom_stack();
        b.iter(|| stacker.request_update(black_box(false)));
    });
    group.bench_function("scroll_sweep", |b| {
        let (mut stacker, _handles) = bottom_stack();
        let range = stacker.total_height() - stacker.total_min_height();
        let min = stacker.total_min_height();
        b.iter(|| {
            for offset in 0..=range {
                stacker.on_offset_changed(black_box(offset), min, false);
            }
        });
    });
    group.bench_function("animated_hide", |b| {
        b.iter_batched(
            bottom_stack,
            |(mut stacker, handles)| {
                handles[2].borrow_mut().visibility = LayerVisibility::Hiding;
                stacker.remove_layer(BottomLayerType::BottomToolbar);
                stacker.request_update(true);
                while let Some((scroll, min)) = stacker.sizer_mut().advance(4) {
                    stacker.on_offset_changed(scroll, min, true);
                }
                stacker
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_top(c: &mut Criterion) {
    let mut group = c.benchmark_group("top");
    group.throughput(Throughput::Elements(6));
    group.bench_function("request_update_sync", |b| {
        let mut stacker = top_stack();
        b.iter(|| stacker.request_update(black_box(false)));
    });
    group.bench_function("scroll_sweep", |b| {
        let mut stacker = top_stack();
        let range = stacker.total_height() - stacker.total_min_height();
        let min = stacker.total_min_height();
        b.iter(|| {
            for offset in 0..=range {
                stacker.on_offset_changed(black_box(-offset), min, false);
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_bottom, bench_top);
criterion_main!(benches);
