//! Converts feasible lines at a solved scale into absolute glyph
//! placements.

use super::AreaRect;
use super::measure::{glyph_advance, measure_run};
use crate::{Align, Placement, TextBox};
use glyph_atlas::{Atlas, GlyphKey};

/// Round to the nearest device-pixel boundary. Rendering precision only;
/// never consulted during feasibility.
fn snap_to_device_pixels(value: f32, device_pixel_ratio: f32) -> f32 {
    let ratio = if device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 };
    (value * ratio).round() / ratio
}

/// Build drawable placements for each (line, bottom) pair. Glyphs
/// without an outline advance the pen but emit nothing.
pub fn build_placements(
    atlas: &Atlas,
    lines: &[Vec<GlyphKey>],
    bottoms: &[f32],
    text_box: &TextBox,
    scale: f32,
    device_pixel_ratio: f32,
) -> Vec<Placement> {
    let area = AreaRect::of(text_box);
    let mut placements = Vec::new();

    for (line, &bottom) in lines.iter().zip(bottoms) {
        let line_width = measure_run(atlas, line, text_box.tracking).width * scale;
        let start_x = match text_box.align {
            Align::Left => area.left + text_box.padding + text_box.h_offset,
            Align::Right => area.right - text_box.padding - line_width + text_box.h_offset,
            Align::Center => (area.left + area.right - line_width) / 2.0 + text_box.h_offset,
        };

        let mut pen_x = start_x;
        for (index, &key) in line.iter().enumerate() {
            let Some(record) = atlas.glyphs.get(&key) else {
                continue;
            };
            let x = pen_x + record.edges.l * scale;
            let y = bottom - record.edges.b * scale;
            if record.is_renderable() {
                let (x, y) = if text_box.pixel_snap {
                    (snap_to_device_pixels(x, device_pixel_ratio), snap_to_device_pixels(y, device_pixel_ratio))
                } else {
                    (x, y)
                };
                placements.push(Placement { key, x, y, scale, opacity: text_box.opacity });
            }
            pen_x += glyph_advance(atlas, key) * scale;
            if index != line.len() - 1 {
                pen_x += text_box.tracking * scale;
            }
        }
    }
    placements
}
