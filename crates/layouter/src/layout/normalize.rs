//! Canonicalizes raw text to an ASCII-safe form before glyph lookup.
//!
//! The atlas is ASCII-oriented; common typographic characters are mapped
//! to their plain equivalents so they render instead of falling back.
//! Anything else passes through and resolves via the fallback glyph.

/// Normalize line endings and punctuation.
pub fn normalize_text(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                // CRLF and bare CR both become LF.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                output.push('\n');
            }
            '\u{201C}' | '\u{201D}' => output.push('"'),
            '\u{2018}' | '\u{2019}' => output.push('\''),
            '\u{2013}' | '\u{2014}' => output.push('-'),
            '\u{2026}' => output.push_str("..."),
            '\u{2022}' | '\u{00B7}' => output.push('*'),
            '\u{00A0}' => output.push(' '),
            _ => output.push(ch),
        }
    }
    output
}
