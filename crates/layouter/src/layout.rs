//! The layout pipeline: normalize → tokenize → wrap → fit → solve →
//! place. Shared geometry helpers live here.

use crate::TextBox;

pub mod fit;
pub mod measure;
pub mod normalize;
pub mod placement;
pub mod solve;
pub mod token;
pub mod wrap;

/// A box's area rectangle in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl AreaRect {
    pub fn of(text_box: &TextBox) -> Self {
        Self {
            left: text_box.origin_x - text_box.area_l,
            right: text_box.origin_x + text_box.area_r,
            top: text_box.origin_y - text_box.area_t,
            bottom: text_box.origin_y + text_box.area_b,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Effective line cap: the requested cap bounded by how many fixed
/// bottoms the box actually provides, and never below one.
pub fn effective_max_lines(text_box: &TextBox) -> usize {
    text_box.max_lines.min(text_box.line_bottoms.len()).max(1)
}

/// Absolute fixed-bottom y coordinates, truncated to the effective cap.
pub fn effective_bottoms(text_box: &TextBox) -> Vec<f32> {
    let cap = effective_max_lines(text_box);
    text_box
        .line_bottoms
        .iter()
        .take(cap)
        .map(|offset| text_box.origin_y + offset)
        .collect()
}
