//! Splits normalized text into word / space / newline tokens.
//!
//! Space tokens carry one key per literal space so multi-space runs keep
//! their explicit width; newline tokens carry no keys. Kinds never merge
//! across runs.

use super::normalize::normalize_text;
use glyph_atlas::{Atlas, GlyphKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Space,
    Newline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub keys: Vec<GlyphKey>,
}

impl Token {
    pub fn word(keys: Vec<GlyphKey>) -> Self {
        Self { kind: TokenKind::Word, keys }
    }

    pub fn space(keys: Vec<GlyphKey>) -> Self {
        Self { kind: TokenKind::Space, keys }
    }

    pub fn newline() -> Self {
        Self { kind: TokenKind::Newline, keys: Vec::new() }
    }
}

/// Tokenize raw text, resolving each character to its glyph key (with
/// fallback substitution for uncovered characters).
pub fn tokenize(atlas: &Atlas, text: &str) -> Vec<Token> {
    let text = normalize_text(text);
    let mut tokens = Vec::new();
    let mut buffer: Vec<GlyphKey> = Vec::new();
    let mut kind: Option<TokenKind> = None;

    let flush = |tokens: &mut Vec<Token>, buffer: &mut Vec<GlyphKey>, kind: Option<TokenKind>| {
        if buffer.is_empty() {
            return;
        }
        let keys = std::mem::take(buffer);
        match kind {
            Some(TokenKind::Space) => tokens.push(Token::space(keys)),
            _ => tokens.push(Token::word(keys)),
        }
    };

    for ch in text.chars() {
        if ch == '\n' {
            flush(&mut tokens, &mut buffer, kind);
            tokens.push(Token::newline());
            kind = None;
            continue;
        }
        let next_kind = if ch == ' ' || ch == '\t' { TokenKind::Space } else { TokenKind::Word };
        if kind != Some(next_kind) {
            flush(&mut tokens, &mut buffer, kind);
            kind = Some(next_kind);
        }
        buffer.push(atlas.resolve_char(ch));
    }
    flush(&mut tokens, &mut buffer, kind);
    tokens
}
