//! Glyph layout engine: wraps a text box's content into lines, finds the
//! largest uniform scale at which the lines satisfy the box's wrap,
//! overflow, and fixed-line-bottom constraints, and emits absolute glyph
//! placements for a rendering backend.
//!
//! Every layout call is a pure function of (atlas, box, viewport); there
//! is no retained state, and identical inputs always produce identical
//! placements.

use glyph_atlas::{Atlas, GlyphKey};
use log::debug;
use std::collections::{BTreeSet, HashMap};

pub mod layout;

use layout::measure::measure_run;
use layout::normalize::normalize_text;
use layout::placement::build_placements;
use layout::solve::{compose_lines, fit_scale};
use layout::token::{TokenKind, tokenize};
use layout::{AreaRect, effective_bottoms};

/// Horizontal alignment of each line inside the box area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A caller-owned text block with its layout constraints.
///
/// The area extents are distances from the origin, so the box rectangle
/// is `[origin_x - area_l, origin_x + area_r] x [origin_y - area_t,
/// origin_y + area_b]`. Line bottoms are offsets from `origin_y`; they
/// are fixed anchors, never flowed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub origin_x: f32,
    pub origin_y: f32,
    pub area_l: f32,
    pub area_r: f32,
    pub area_t: f32,
    pub area_b: f32,
    pub padding: f32,
    pub line_gap: f32,
    /// Extra spacing between consecutive glyphs, in glyph units.
    pub tracking: f32,
    pub wrap: bool,
    pub max_lines: usize,
    pub break_long_words: bool,
    /// Fixed line-bottom offsets from `origin_y`, by line position.
    pub line_bottoms: Vec<f32>,
    pub align: Align,
    pub h_offset: f32,
    pub pixel_snap: bool,
    pub opacity: f32,
    pub text: String,
}

impl Default for TextBox {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            area_l: 0.0,
            area_r: 0.0,
            area_t: 0.0,
            area_b: 0.0,
            padding: 0.0,
            line_gap: 0.0,
            tracking: 0.0,
            wrap: false,
            max_lines: 1,
            break_long_words: false,
            line_bottoms: vec![0.0],
            align: Align::Left,
            h_offset: 0.0,
            pixel_snap: false,
            opacity: 1.0,
            text: String::new(),
        }
    }
}

/// Caller-supplied viewport. Only the device pixel ratio participates in
/// layout (pixel snapping); width and height are carried for renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, device_pixel_ratio: 1.0 }
    }
}

/// One drawable glyph instance: "draw the outline of `key` at (x, y),
/// scaled by `scale`, with `opacity`".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub key: GlyphKey,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Result of laying out one box. Infeasible means no scale above zero
/// satisfied every constraint; the box renders nothing, it never errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxLayout {
    pub feasible: bool,
    pub scale: f32,
    pub placements: Vec<Placement>,
    /// Absolute y of each produced line's bottom anchor.
    pub line_bottoms: Vec<f32>,
}

impl BoxLayout {
    fn infeasible() -> Self {
        Self::default()
    }
}

/// Lay out one text box: solve for the maximal feasible scale, then build
/// absolute placements at that scale.
pub fn layout_text_box(atlas: &Atlas, text_box: &TextBox, viewport: &Viewport) -> BoxLayout {
    let scale = fit_scale(atlas, text_box);
    if scale <= 0.0 {
        debug!("box at ({}, {}): no feasible scale", text_box.origin_x, text_box.origin_y);
        return BoxLayout::infeasible();
    }
    let Some(lines) = compose_lines(atlas, text_box, scale) else {
        // The solver converged on a scale the composer rejects; treat it
        // as infeasible rather than panicking on a float boundary.
        return BoxLayout::infeasible();
    };
    let bottoms = effective_bottoms(text_box);
    let placements = build_placements(atlas, &lines, &bottoms, text_box, scale, viewport.device_pixel_ratio);
    debug!(
        "box at ({}, {}): scale {:.4}, {} lines, {} placements",
        text_box.origin_x,
        text_box.origin_y,
        scale,
        lines.len(),
        placements.len()
    );
    BoxLayout {
        feasible: true,
        scale,
        placements,
        line_bottoms: bottoms[..lines.len().min(bottoms.len())].to_vec(),
    }
}

/// Lay out a single-line label centered vertically in the box area,
/// ignoring fixed line bottoms. Meant for UI labels rather than text
/// blocks: the scale is the closed-form fit of the flattened run inside
/// the padded rectangle.
///
/// Horizontal alignment still follows `text_box.align`, which defaults
/// to left; the classic button label sets [`Align::Center`].
pub fn layout_label(atlas: &Atlas, text_box: &TextBox, viewport: &Viewport) -> BoxLayout {
    let area = AreaRect::of(text_box);
    let tokens = tokenize(atlas, &text_box.text);
    let keys = layout::solve::flatten_single_line(atlas, &tokens);
    if keys.is_empty() {
        return BoxLayout::infeasible();
    }

    let metrics = measure_run(atlas, &keys, text_box.tracking);
    if metrics.width <= 0.0 || metrics.height <= 0.0 {
        return BoxLayout::infeasible();
    }

    let avail_w = area.width() - 2.0 * text_box.padding;
    let avail_h = area.height() - 2.0 * text_box.padding;
    if avail_w <= 1.0 || avail_h <= 1.0 {
        return BoxLayout::infeasible();
    }

    let scale = (avail_w / metrics.width).min(avail_h / metrics.height);
    if !scale.is_finite() || scale <= 0.0 {
        return BoxLayout::infeasible();
    }

    // Center the line's slot height on the area midpoint.
    let bottom = (area.top + area.bottom) / 2.0 + metrics.height * scale / 2.0;
    let lines = vec![keys];
    let bottoms = vec![bottom];
    let placements = build_placements(atlas, &lines, &bottoms, text_box, scale, viewport.device_pixel_ratio);
    BoxLayout { feasible: true, scale, placements, line_bottoms: bottoms }
}

/// Every glyph key a set of texts will reference through this atlas,
/// including the space key and (when renderable) the fallback key, so a
/// renderer can prepare its glyph set up front.
pub fn referenced_keys<'a>(atlas: &Atlas, texts: impl IntoIterator<Item = &'a str>) -> BTreeSet<GlyphKey> {
    let mut keys = BTreeSet::new();
    keys.insert(atlas.space_key);
    if atlas.is_renderable(atlas.fallback_key) {
        keys.insert(atlas.fallback_key);
    }
    for text in texts {
        for token in tokenize(atlas, text) {
            if token.kind == TokenKind::Newline {
                keys.insert(atlas.space_key);
            } else {
                keys.extend(token.keys.iter().copied());
            }
        }
    }
    keys
}

/// The raw glyph key of every non-whitespace character in a set of
/// texts, before fallback substitution. Coverage checking wants the
/// original keys, since substitution would mask every gap behind the
/// renderable fallback.
pub fn coverage_keys<'a>(texts: impl IntoIterator<Item = &'a str>) -> BTreeSet<GlyphKey> {
    let mut keys = BTreeSet::new();
    for text in texts {
        for ch in normalize_text(text).chars() {
            if ch != ' ' && ch != '\t' && ch != '\n' {
                keys.insert(GlyphKey::from_char(ch));
            }
        }
    }
    keys
}

/// Handle to a text box stored in a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxKey(pub u64);

/// An indexed collection of text boxes with stable handles and an
/// insertion-ordered layout pass. Boxes are plain values; edit them
/// through [`Stage::get_mut`] between layout passes.
#[derive(Debug, Default)]
pub struct Stage {
    boxes: HashMap<BoxKey, TextBox>,
    order: Vec<BoxKey>,
    next_key: u64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, text_box: TextBox) -> BoxKey {
        let key = BoxKey(self.next_key);
        self.next_key += 1;
        self.boxes.insert(key, text_box);
        self.order.push(key);
        key
    }

    pub fn get(&self, key: BoxKey) -> Option<&TextBox> {
        self.boxes.get(&key)
    }

    pub fn get_mut(&mut self, key: BoxKey) -> Option<&mut TextBox> {
        self.boxes.get_mut(&key)
    }

    pub fn remove(&mut self, key: BoxKey) -> Option<TextBox> {
        let removed = self.boxes.remove(&key);
        if removed.is_some() {
            self.order.retain(|&existing| existing != key);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Boxes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxKey, &TextBox)> {
        self.order.iter().filter_map(|&key| self.boxes.get(&key).map(|text_box| (key, text_box)))
    }

    /// Lay out every box in insertion order, warning once about glyph
    /// coverage gaps across the whole set first.
    pub fn layout_all(&self, atlas: &Atlas, viewport: &Viewport) -> Vec<(BoxKey, BoxLayout)> {
        atlas.verify_coverage(coverage_keys(self.iter().map(|(_, text_box)| text_box.text.as_str())));
        self.iter()
            .map(|(key, text_box)| (key, layout_text_box(atlas, text_box, viewport)))
            .collect()
    }
}

pub use layout::measure::RunMetrics;
