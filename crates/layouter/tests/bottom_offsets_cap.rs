mod common;

use layouter::layout::{effective_bottoms, effective_max_lines};
use layouter::{Viewport, layout_text_box};

#[test]
fn requested_cap_shrinks_to_the_offset_list() {
    let _ = env_logger::builder().is_test(true).try_init();

    let atlas = common::test_atlas();
    let mut text_box = common::basic_box("AAA BBB CCC DDD");
    text_box.wrap = true;
    text_box.max_lines = 5;
    text_box.line_bottoms = vec![0.0, 20.0];
    text_box.area_b = 30.0;
    text_box.area_r = 80.0;

    // Five lines requested, two bottoms supplied: the cap is two.
    assert_eq!(effective_max_lines(&text_box), 2);
    assert_eq!(effective_bottoms(&text_box), vec![0.0, 20.0]);

    let layout = layout_text_box(&atlas, &text_box, &Viewport::default());
    assert!(layout.feasible);
    assert!(layout.line_bottoms.len() <= 2);
    // All twelve letters still place; the scale shrank to make the
    // content fit the two available lines.
    assert_eq!(layout.placements.len(), 12);
}

#[test]
fn empty_offset_list_still_acts_as_a_single_line_cap() {
    let _ = env_logger::builder().is_test(true).try_init();

    let atlas = common::test_atlas();
    let mut text_box = common::basic_box("HI");
    text_box.line_bottoms = Vec::new();

    // No bottoms at all: nothing can be anchored, so the box is
    // infeasible rather than crashing.
    let layout = layout_text_box(&atlas, &text_box, &Viewport::default());
    assert!(!layout.feasible);
    assert!(layout.placements.is_empty());
}
