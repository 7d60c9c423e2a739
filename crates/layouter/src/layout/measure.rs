//! Width and height accounting for flat glyph runs.
//!
//! Width is the sum of glyph advances plus tracking between consecutive
//! glyphs (never after the last). Line height is the maximum slot height
//! among non-space glyphs so multi-space runs cannot inflate a line; an
//! all-space run falls back to the overall maximum.

use glyph_atlas::{Atlas, GlyphKey};

/// Measured extent of a glyph run, in glyph units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunMetrics {
    pub width: f32,
    pub height: f32,
}

/// Horizontal advance of one glyph, zero when the atlas has no record.
pub fn glyph_advance(atlas: &Atlas, key: GlyphKey) -> f32 {
    atlas.glyphs.get(&key).map_or(0.0, |record| record.edges.advance())
}

/// Slot height of one glyph, zero when the atlas has no record.
pub fn glyph_slot_height(atlas: &Atlas, key: GlyphKey) -> f32 {
    atlas.glyphs.get(&key).map_or(0.0, |record| record.edges.slot_height())
}

/// Measure a flat run with tracking applied between glyphs.
pub fn measure_run(atlas: &Atlas, keys: &[GlyphKey], tracking: f32) -> RunMetrics {
    let mut width = 0.0;
    let mut height: f32 = 0.0;
    let mut non_space_height: f32 = 0.0;
    for (index, &key) in keys.iter().enumerate() {
        width += glyph_advance(atlas, key);
        if index != keys.len() - 1 {
            width += tracking;
        }
        let slot = glyph_slot_height(atlas, key);
        if key != atlas.space_key {
            non_space_height = non_space_height.max(slot);
        }
        height = height.max(slot);
    }
    let height = if non_space_height > 0.0 { non_space_height } else { height };
    RunMetrics { width, height }
}
