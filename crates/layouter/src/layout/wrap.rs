//! Greedy word wrap over a token stream, with optional splitting of
//! words wider than the line.
//!
//! Failure here is not an error: it tells the scale solver the probed
//! scale is too large. The usable width is passed in glyph units (pixels
//! divided by the probed scale), so the wrapper itself is scale-free.

use super::measure::measure_run;
use super::token::{Token, TokenKind};
use glyph_atlas::{Atlas, GlyphKey};

/// Wrap tokens into at most `max_lines` trimmed lines of at most
/// `max_width` units. Returns `None` when the content cannot fit, which
/// the solver treats as "probe a smaller scale".
pub fn wrap_lines(
    atlas: &Atlas,
    mut tokens: Vec<Token>,
    max_width: f32,
    tracking: f32,
    max_lines: usize,
    break_long_words: bool,
) -> Option<Vec<Vec<GlyphKey>>> {
    let mut lines: Vec<Vec<GlyphKey>> = Vec::new();
    let mut line: Vec<GlyphKey> = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let kind = tokens[index].kind;

        if kind == TokenKind::Newline {
            commit(atlas, &mut lines, &mut line);
            if lines.len() >= max_lines {
                return None;
            }
            index += 1;
            continue;
        }

        // Leading spaces on a fresh line are dropped.
        if line.is_empty() && kind == TokenKind::Space {
            index += 1;
            continue;
        }

        // A word wider than the whole line can either be split into
        // fitting runs or force a smaller scale.
        if kind == TokenKind::Word && line.is_empty() {
            let metrics = measure_run(atlas, &tokens[index].keys, tracking);
            if metrics.width > max_width {
                if !break_long_words {
                    return None;
                }
                // A single glyph that cannot fit is appended as-is below;
                // re-splitting it would never terminate. The solver
                // shrinks the scale through the line-count and vertical
                // constraints instead.
                if tokens[index].keys.len() > 1 {
                    let parts = split_word(atlas, &tokens[index].keys, max_width, tracking);
                    tokens.splice(index..=index, parts);
                    // Reprocess the replacement tokens at the same index.
                    continue;
                }
            }
        }

        let would_overflow = !line.is_empty() && {
            let mut combined = line.clone();
            combined.extend(tokens[index].keys.iter().copied());
            measure_run(atlas, &combined, tracking).width > max_width
        };

        if would_overflow {
            commit(atlas, &mut lines, &mut line);
            if lines.len() >= max_lines {
                return None;
            }
            // Spaces are swallowed at the wrap point; words retry on the
            // fresh line.
            if kind == TokenKind::Space {
                index += 1;
            }
            continue;
        }

        line.extend(tokens[index].keys.iter().copied());
        index += 1;
    }

    commit(atlas, &mut lines, &mut line);
    Some(lines)
}

/// Trim outer space glyphs and commit the line buffer.
fn commit(atlas: &Atlas, lines: &mut Vec<Vec<GlyphKey>>, line: &mut Vec<GlyphKey>) {
    let mut committed = std::mem::take(line);
    let leading = committed.iter().take_while(|&&key| key == atlas.space_key).count();
    committed.drain(..leading);
    while committed.last() == Some(&atlas.space_key) {
        committed.pop();
    }
    lines.push(committed);
}

/// Split an over-wide word into maximal glyph runs that each fit. A
/// single glyph that alone cannot fit is still emitted, deferring to the
/// solver's scale shrink.
fn split_word(atlas: &Atlas, keys: &[GlyphKey], max_width: f32, tracking: f32) -> Vec<Token> {
    let mut parts = Vec::new();
    let mut start = 0;
    while start < keys.len() {
        let mut best = start;
        let mut end = start;
        while end < keys.len() {
            let metrics = measure_run(atlas, &keys[start..=end], tracking);
            if metrics.width > max_width {
                break;
            }
            end += 1;
            best = end;
        }
        if best == start {
            parts.push(Token::word(vec![keys[start]]));
            start += 1;
        } else {
            parts.push(Token::word(keys[start..best].to_vec()));
            start = best;
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_atlas::{GlyphEdges, GlyphRecord};
    use std::collections::HashMap;

    // Every letter is 10 units wide; the space is 6.
    fn test_atlas() -> Atlas {
        let mut glyphs = HashMap::new();
        for ch in 'A'..='Z' {
            glyphs.insert(
                GlyphKey::from_char(ch),
                GlyphRecord {
                    edges: GlyphEdges { l: 5.0, r: 5.0, t: 12.0, b: 3.0 },
                    outline: Some("M0 0".to_string()),
                },
            );
        }
        glyphs.insert(
            GlyphKey::from_char('?'),
            GlyphRecord {
                edges: GlyphEdges { l: 4.0, r: 4.0, t: 12.0, b: 3.0 },
                outline: Some("M0 0".to_string()),
            },
        );
        glyphs.insert(
            GlyphKey::from_char(' '),
            GlyphRecord { edges: GlyphEdges { l: 3.0, r: 3.0, t: 12.0, b: 3.0 }, outline: None },
        );
        Atlas::new(glyphs, GlyphKey::from_char('?'), GlyphKey::from_char(' '))
    }

    fn keys(text: &str) -> Vec<GlyphKey> {
        text.chars().map(GlyphKey::from_char).collect()
    }

    fn tokens(atlas: &Atlas, text: &str) -> Vec<Token> {
        super::super::token::tokenize(atlas, text)
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let atlas = test_atlas();
        let lines = wrap_lines(&atlas, tokens(&atlas, "AB CD"), 100.0, 0.0, 2, false).unwrap();
        assert_eq!(lines, vec![keys("AB CD")]);
    }

    #[test]
    fn overflow_wraps_and_swallows_the_space() {
        let atlas = test_atlas();
        // "HELLO WORLD" is 106 units; 60 fits one five-letter word.
        let lines = wrap_lines(&atlas, tokens(&atlas, "HELLO WORLD"), 60.0, 0.0, 2, false).unwrap();
        assert_eq!(lines, vec![keys("HELLO"), keys("WORLD")]);
    }

    #[test]
    fn exceeding_the_line_cap_fails() {
        let atlas = test_atlas();
        assert!(wrap_lines(&atlas, tokens(&atlas, "AA BB CC"), 25.0, 0.0, 2, false).is_none());
    }

    #[test]
    fn over_wide_word_fails_without_breaking() {
        let atlas = test_atlas();
        assert!(wrap_lines(&atlas, tokens(&atlas, "ABCDEF"), 30.0, 0.0, 3, false).is_none());
    }

    #[test]
    fn over_wide_word_splits_into_fitting_runs() {
        let atlas = test_atlas();
        let lines = wrap_lines(&atlas, tokens(&atlas, "ABCDEF"), 30.0, 0.0, 3, true).unwrap();
        assert_eq!(lines, vec![keys("ABC"), keys("DEF")]);
    }

    #[test]
    fn a_glyph_wider_than_the_line_is_still_emitted() {
        let atlas = test_atlas();
        // Max width below a single advance: each glyph lands alone.
        let lines = wrap_lines(&atlas, tokens(&atlas, "AB"), 8.0, 0.0, 2, true).unwrap();
        assert_eq!(lines, vec![keys("A"), keys("B")]);
    }

    #[test]
    fn newline_commits_and_leading_spaces_drop() {
        let atlas = test_atlas();
        let lines = wrap_lines(&atlas, tokens(&atlas, "AB\n  CD "), 100.0, 0.0, 3, false).unwrap();
        assert_eq!(lines, vec![keys("AB"), keys("CD")]);
    }

    #[test]
    fn trailing_newline_produces_an_empty_line() {
        let atlas = test_atlas();
        let lines = wrap_lines(&atlas, tokens(&atlas, "AB\n"), 100.0, 0.0, 3, false).unwrap();
        assert_eq!(lines, vec![keys("AB"), Vec::new()]);
    }

    #[test]
    fn tracking_counts_toward_overflow() {
        let atlas = test_atlas();
        // Two letters plus a space: width 26 with no tracking, 36 with 5.
        assert!(wrap_lines(&atlas, tokens(&atlas, "A B"), 30.0, 0.0, 1, false).is_some());
        let wrapped = wrap_lines(&atlas, tokens(&atlas, "A B"), 30.0, 5.0, 2, false).unwrap();
        assert_eq!(wrapped, vec![keys("A"), keys("B")]);
    }
}
