#![allow(dead_code)]
use glyph_atlas::{Atlas, GlyphEdges, GlyphKey, GlyphRecord};
use layouter::TextBox;
use std::collections::HashMap;

/// Uniform fixture atlas: every uppercase letter advances 10 units and
/// stands 15 tall (12 above the baseline, 3 below); the space advances 6
/// and has no outline; '?' is the renderable fallback.
pub fn test_atlas() -> Atlas {
    let mut glyphs = HashMap::new();
    for ch in 'A'..='Z' {
        glyphs.insert(
            GlyphKey::from_char(ch),
            GlyphRecord {
                edges: GlyphEdges { l: 5.0, r: 5.0, t: 12.0, b: 3.0 },
                outline: Some("M0 0L1 1".to_string()),
            },
        );
    }
    glyphs.insert(
        GlyphKey::from_char('?'),
        GlyphRecord {
            edges: GlyphEdges { l: 4.0, r: 4.0, t: 12.0, b: 3.0 },
            outline: Some("M0 0L2 2".to_string()),
        },
    );
    glyphs.insert(
        GlyphKey::from_char(' '),
        GlyphRecord {
            edges: GlyphEdges { l: 3.0, r: 3.0, t: 12.0, b: 3.0 },
            outline: None,
        },
    );
    Atlas::new(glyphs, GlyphKey::from_char('?'), GlyphKey::from_char(' '))
}

/// A box rooted at the origin with its area extending right and up, one
/// fixed bottom at the origin line, and no padding quirks beyond the
/// given value.
pub fn basic_box(text: &str) -> TextBox {
    TextBox {
        origin_x: 0.0,
        origin_y: 0.0,
        area_l: 0.0,
        area_r: 300.0,
        area_t: 100.0,
        area_b: 10.0,
        padding: 10.0,
        line_bottoms: vec![0.0],
        text: text.to_string(),
        ..TextBox::default()
    }
}

pub fn keys(text: &str) -> Vec<GlyphKey> {
    text.chars().map(GlyphKey::from_char).collect()
}
