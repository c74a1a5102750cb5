/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use euclid::default::Size2D;
use flowcanvas::EditIntent;
use uuid::Uuid;

use super::harness::TestBench;

/// Build the reference workflow: 1→2, 2→3, 1→4, 4→3, and 5 isolated.
fn diamond_bench() -> (TestBench, Vec<Uuid>) {
    let mut bench = TestBench::new();
    let steps: Vec<Uuid> = (1..=5)
        .map(|i| bench.add_step(&format!("step {i}")))
        .collect();
    bench.connect(steps[0], steps[1]);
    bench.connect(steps[1], steps[2]);
    bench.connect(steps[0], steps[3]);
    bench.connect(steps[3], steps[2]);
    (bench, steps)
}

#[test]
fn test_auto_layout_columns_follow_the_layering() {
    let (mut bench, steps) = diamond_bench();

    bench.app.apply_intent(EditIntent::AutoLayout {
        available_width: 10_000.0,
    });

    // Layers [{1,5}, {2,4}, {3}] → three columns, left to right.
    let x = |i: usize| bench.position_of(steps[i]).x;
    assert_eq!(x(0), x(4), "step 1 and isolated step 5 share a column");
    assert_eq!(x(1), x(3), "steps 2 and 4 share a column");
    assert!(x(0) < x(1) && x(1) < x(2));

    // Step 5 sits below step 1 in the first column.
    let y = |i: usize| bench.position_of(steps[i]).y;
    assert!(y(4) > y(0));
}

#[test]
fn test_auto_layout_is_reproducible_across_sessions() {
    let (mut first, steps_a) = diamond_bench();
    let (mut second, steps_b) = diamond_bench();

    first.app.apply_intent(EditIntent::AutoLayout {
        available_width: 900.0,
    });
    second.app.apply_intent(EditIntent::AutoLayout {
        available_width: 900.0,
    });

    for (a, b) in steps_a.iter().zip(&steps_b) {
        assert_eq!(first.position_of(*a), second.position_of(*b));
    }
    assert_eq!(first.app.content_size(), second.app.content_size());
}

#[test]
fn test_cyclic_workflow_lays_out_without_error() {
    let mut bench = TestBench::new();
    let a = bench.add_step("a");
    let b = bench.add_step("b");
    bench.connect(a, b);
    bench.connect(b, a);

    bench.app.apply_intent(EditIntent::AutoLayout {
        available_width: 10_000.0,
    });

    // Both steps land in one trailing layer: same column, stacked.
    assert_eq!(bench.position_of(a).x, bench.position_of(b).x);
    assert!(bench.position_of(a).y < bench.position_of(b).y);
}

#[test]
fn test_narrow_canvas_wraps_columns_into_rows() {
    let mut bench = TestBench::new();
    let a = bench.add_step("a");
    let b = bench.add_step("b");
    let c = bench.add_step("c");
    bench.connect(a, b);
    bench.connect(b, c);

    let card_width = bench.app.layout_params.card_size.width;
    let margin = bench.app.layout_params.margin;
    bench.app.apply_intent(EditIntent::AutoLayout {
        available_width: margin + card_width + 1.0,
    });

    // One column per row, each starting back at the margin.
    assert_eq!(bench.position_of(a).x, margin);
    assert_eq!(bench.position_of(b).x, margin);
    assert_eq!(bench.position_of(c).x, margin);
    assert!(bench.position_of(a).y < bench.position_of(b).y);
    assert!(bench.position_of(b).y < bench.position_of(c).y);

    // The content area grew downward to fit the stacked rows.
    let content = bench.app.content_size();
    assert!(content.height > content.width);
}

#[test]
fn test_layout_updates_content_size_for_canvas_resizing() {
    let (mut bench, _) = diamond_bench();
    assert_eq!(bench.app.content_size(), Size2D::zero());

    bench.app.apply_intent(EditIntent::AutoLayout {
        available_width: 10_000.0,
    });

    let content = bench.app.content_size();
    assert!(content.width > 0.0 && content.height > 0.0);
    for step in bench.app.task.graph.steps().map(|(_, s)| s.position).collect::<Vec<_>>() {
        assert!(step.x < content.width);
        assert!(step.y < content.height);
    }
}
