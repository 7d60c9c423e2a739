//! Feasibility of wrapped lines against caller-fixed line bottoms.
//!
//! Bottoms are anchors, not flow positions: each line is checked against
//! its own fixed bottom, the padded rectangle, and the gap to the
//! previous bottom. Because nothing flows top-down, shrinking the right
//! boundary of a left-aligned box can change wrap points but never moves
//! any line vertically.

use super::AreaRect;
use super::measure::measure_run;
use glyph_atlas::{Atlas, GlyphKey};

/// Tolerance absorbing float error at exact-fit boundaries, so the
/// closed-form no-wrap scale verifies as feasible.
pub const FIT_EPSILON: f32 = 1e-3;

/// Whether `lines` can occupy `bottoms` (one bottom per line, in order)
/// inside the padded area at the probed scale.
pub fn lines_fit(
    atlas: &Atlas,
    lines: &[Vec<GlyphKey>],
    bottoms: &[f32],
    area: &AreaRect,
    padding: f32,
    gap: f32,
    scale: f32,
    tracking: f32,
) -> bool {
    if lines.len() > bottoms.len() {
        return false;
    }
    let usable_top = area.top + padding;
    let usable_bottom = area.bottom - padding;

    for (index, line) in lines.iter().enumerate() {
        let bottom = bottoms[index];
        if bottom > usable_bottom + FIT_EPSILON {
            return false;
        }
        let metrics = measure_run(atlas, line, tracking);
        let top = bottom - metrics.height * scale;
        if top < usable_top - FIT_EPSILON {
            return false;
        }
        if index > 0 && top < bottoms[index - 1] + gap - FIT_EPSILON {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_atlas::{GlyphEdges, GlyphRecord};
    use std::collections::HashMap;

    // 'A' is 15 units tall (12 above the baseline, 3 below).
    fn test_atlas() -> Atlas {
        let mut glyphs = HashMap::new();
        glyphs.insert(
            GlyphKey::from_char('A'),
            GlyphRecord {
                edges: GlyphEdges { l: 5.0, r: 5.0, t: 12.0, b: 3.0 },
                outline: Some("M0 0".to_string()),
            },
        );
        glyphs.insert(
            GlyphKey::from_char(' '),
            GlyphRecord { edges: GlyphEdges { l: 3.0, r: 3.0, t: 12.0, b: 3.0 }, outline: None },
        );
        Atlas::new(glyphs, GlyphKey::from_char('?'), GlyphKey::from_char(' '))
    }

    fn area() -> AreaRect {
        AreaRect { left: 0.0, right: 100.0, top: 0.0, bottom: 100.0 }
    }

    fn line() -> Vec<GlyphKey> {
        vec![GlyphKey::from_char('A')]
    }

    #[test]
    fn line_must_sit_inside_the_padded_rect() {
        let atlas = test_atlas();
        // Height 15 at scale 1: top = 50 - 15 = 35, inside [10, 90].
        assert!(lines_fit(&atlas, &[line()], &[50.0], &area(), 10.0, 0.0, 1.0, 0.0));
        // Bottom below the padded edge.
        assert!(!lines_fit(&atlas, &[line()], &[95.0], &area(), 10.0, 0.0, 1.0, 0.0));
        // Top pokes above the padded edge at a large scale.
        assert!(!lines_fit(&atlas, &[line()], &[50.0], &area(), 10.0, 0.0, 3.0, 0.0));
    }

    #[test]
    fn gap_to_previous_bottom_is_enforced() {
        let atlas = test_atlas();
        let lines = [line(), line()];
        // Second top = 70 - 15 = 55; previous bottom 40 + gap 10 = 50.
        assert!(lines_fit(&atlas, &lines, &[40.0, 70.0], &area(), 0.0, 10.0, 1.0, 0.0));
        // Gap 20 intrudes.
        assert!(!lines_fit(&atlas, &lines, &[40.0, 70.0], &area(), 0.0, 20.0, 1.0, 0.0));
    }

    #[test]
    fn more_lines_than_bottoms_is_infeasible() {
        let atlas = test_atlas();
        assert!(!lines_fit(&atlas, &[line(), line()], &[50.0], &area(), 0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn exact_boundary_passes_within_epsilon() {
        let atlas = test_atlas();
        // top == usable_top exactly: 15 * scale == bottom - top.
        let scale = (50.0 - 10.0) / 15.0;
        assert!(lines_fit(&atlas, &[line()], &[50.0], &area(), 10.0, 0.0, scale, 0.0));
    }
}
