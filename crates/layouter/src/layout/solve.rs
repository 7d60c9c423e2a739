//! Scale solver: the largest uniform scale at which wrap and fit both
//! succeed.
//!
//! Feasibility is monotonic in scale (shrinking only shrinks widths and
//! heights), so the wrap-allowed case is a geometric grow to bracket the
//! answer followed by a fixed-iteration binary search. The no-wrap case
//! has a closed form.

use super::fit::lines_fit;
use super::measure::measure_run;
use super::token::{Token, TokenKind, tokenize};
use super::wrap::wrap_lines;
use super::{AreaRect, effective_bottoms, effective_max_lines};
use crate::TextBox;
use glyph_atlas::{Atlas, GlyphKey};
use log::trace;

/// Boxes narrower than this many usable pixels are degenerate.
const MIN_USABLE_WIDTH: f32 = 1.0;
/// Upper-bound growth: at most 8 steps of x1.5, never past scale 50.
const GROW_STEPS: u32 = 8;
const GROW_FACTOR: f32 = 1.5;
const SCALE_CEILING: f32 = 50.0;
/// Binary search depth; 28 halvings are plenty for pixel geometry.
const SEARCH_ITERATIONS: u32 = 28;

/// Flatten tokens onto one line (newlines become single spaces) and trim
/// outer spaces. Used by the no-wrap path and for upper-bound estimates.
pub fn flatten_single_line(atlas: &Atlas, tokens: &[Token]) -> Vec<GlyphKey> {
    let mut flat = Vec::new();
    for token in tokens {
        if token.kind == TokenKind::Newline {
            flat.push(atlas.space_key);
        } else {
            flat.extend(token.keys.iter().copied());
        }
    }
    let leading = flat.iter().take_while(|&&key| key == atlas.space_key).count();
    flat.drain(..leading);
    while flat.last() == Some(&atlas.space_key) {
        flat.pop();
    }
    flat
}

/// Run wrapper plus fitter at one scale: the composed lines when the
/// scale is feasible, `None` otherwise. This is both the solver's probe
/// and the line source for placement building.
pub fn compose_lines(atlas: &Atlas, text_box: &TextBox, scale: f32) -> Option<Vec<Vec<GlyphKey>>> {
    if scale <= 0.0 {
        return None;
    }
    let area = AreaRect::of(text_box);
    let bottoms = effective_bottoms(text_box);
    let max_lines = effective_max_lines(text_box);
    let usable_width = area.width() - 2.0 * text_box.padding;

    let tokens = tokenize(atlas, &text_box.text);
    let wrap_allowed = text_box.wrap && max_lines > 1;

    let lines = if wrap_allowed {
        // The wrapper works in glyph units; convert the pixel budget.
        wrap_lines(
            atlas,
            tokens,
            usable_width / scale,
            text_box.tracking,
            max_lines,
            text_box.break_long_words,
        )?
    } else {
        vec![flatten_single_line(atlas, &tokens)]
    };

    lines_fit(
        atlas,
        &lines,
        &bottoms,
        &area,
        text_box.padding,
        text_box.line_gap,
        scale,
        text_box.tracking,
    )
    .then_some(lines)
}

/// Find the maximal feasible scale for a box, or 0 when none exists.
pub fn fit_scale(atlas: &Atlas, text_box: &TextBox) -> f32 {
    let area = AreaRect::of(text_box);
    let usable_width = area.width() - 2.0 * text_box.padding;
    if usable_width <= MIN_USABLE_WIDTH {
        return 0.0;
    }

    let usable_top = area.top + text_box.padding;
    let usable_bottom = area.bottom - text_box.padding;
    let bottoms = effective_bottoms(text_box);
    let first_bottom = bottoms.first().copied().unwrap_or(text_box.origin_y);

    let tokens = tokenize(atlas, &text_box.text);
    let flat = flatten_single_line(atlas, &tokens);
    let metrics = measure_run(atlas, &flat, text_box.tracking);

    let wrap_allowed = text_box.wrap && effective_max_lines(text_box) > 1;
    if !wrap_allowed {
        // Closed form: bounded by width and by the room above the first
        // fixed bottom.
        if metrics.width <= 0.0 || metrics.height <= 0.0 {
            return 1.0;
        }
        if first_bottom > usable_bottom {
            return 0.0;
        }
        let width_scale = usable_width / metrics.width;
        let height_scale = (first_bottom - usable_top) / metrics.height;
        return width_scale.min(height_scale).max(0.0);
    }

    if flat.is_empty() {
        // Nothing to place; any scale is trivially feasible.
        return 1.0;
    }

    // A single line never needs more scale than the unwrapped fit, which
    // makes it a safe upper bound to grow from.
    let mut hi = usable_width / metrics.width.max(1e-9);
    hi = hi.min((first_bottom - usable_top) / metrics.height.max(1e-9));
    if !hi.is_finite() || hi <= 0.0 {
        hi = 1.0;
    }

    let mut grows_left = GROW_STEPS;
    while grows_left > 0 && compose_lines(atlas, text_box, hi).is_some() {
        hi *= GROW_FACTOR;
        if hi > SCALE_CEILING {
            break;
        }
        grows_left -= 1;
    }

    let mut lo = 0.0;
    let mut best = 0.0;
    for iteration in 0..SEARCH_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if compose_lines(atlas, text_box, mid).is_some() {
            best = mid;
            lo = mid;
        } else {
            hi = mid;
        }
        trace!("scale probe {iteration}: mid {mid:.5}, best {best:.5}");
    }
    best
}
