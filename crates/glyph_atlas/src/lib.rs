//! Glyph atlas data model: per-character metrics and optional outlines,
//! keyed by codepoint-derived keys, with designated fallback and space
//! glyphs.
//!
//! An atlas is externally supplied and immutable once loaded. The layout
//! engine only reads edge metrics (`L + R` is the horizontal advance,
//! `T + B` the vertical slot height) and whether a glyph carries an
//! outline; everything about how outlines are drawn belongs to the
//! rendering backend.

use anyhow::{Error, bail};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical per-character glyph identifier, derived from the codepoint.
///
/// Serialized as `U` followed by the uppercase hex codepoint padded to at
/// least four digits (`U0041` for 'A'), matching the external atlas
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GlyphKey(u32);

impl GlyphKey {
    /// The key a character maps to.
    pub const fn from_char(ch: char) -> Self {
        Self(ch as u32)
    }

    /// The underlying codepoint.
    pub const fn codepoint(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "U{:04X}", self.0)
    }
}

impl From<GlyphKey> for String {
    fn from(key: GlyphKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for GlyphKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let Some(hex) = value.strip_prefix('U') else {
            bail!("glyph key '{value}' does not start with 'U'");
        };
        let codepoint = u32::from_str_radix(hex, 16)?;
        Ok(Self(codepoint))
    }
}

/// Edge metrics of a glyph, in glyph units, all non-negative.
///
/// `l`/`r` are measured from the glyph's pen position, `t`/`b` from its
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlyphEdges {
    #[serde(rename = "L")]
    pub l: f32,
    #[serde(rename = "R")]
    pub r: f32,
    #[serde(rename = "T")]
    pub t: f32,
    #[serde(rename = "B")]
    pub b: f32,
}

impl GlyphEdges {
    /// Total horizontal space the glyph occupies.
    pub fn advance(self) -> f32 {
        self.l + self.r
    }

    /// Total vertical space the glyph occupies relative to its baseline.
    pub fn slot_height(self) -> f32 {
        self.t + self.b
    }
}

/// A single atlas entry: metrics plus an optional outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRecord {
    pub edges: GlyphEdges,
    /// Outline path data in the backend's format. Space has none.
    #[serde(default)]
    pub outline: Option<String>,
}

impl GlyphRecord {
    /// Whether this glyph can actually be drawn. Non-renderable glyphs
    /// (spaces, coverage gaps) still participate in measurement.
    pub fn is_renderable(&self) -> bool {
        self.outline.as_deref().is_some_and(|path| !path.is_empty())
    }
}

fn default_fallback_key() -> GlyphKey {
    GlyphKey::from_char('?')
}

fn default_space_key() -> GlyphKey {
    GlyphKey::from_char(' ')
}

/// An immutable glyph-key to metrics/outline mapping with designated
/// fallback and space keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atlas {
    pub glyphs: HashMap<GlyphKey, GlyphRecord>,
    #[serde(default = "default_fallback_key")]
    pub fallback_key: GlyphKey,
    #[serde(default = "default_space_key")]
    pub space_key: GlyphKey,
}

impl Atlas {
    pub fn new(glyphs: HashMap<GlyphKey, GlyphRecord>, fallback_key: GlyphKey, space_key: GlyphKey) -> Self {
        Self { glyphs, fallback_key, space_key }
    }

    /// Parse an atlas from its JSON form and validate it. This is the
    /// fail-fast surface for malformed external input.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let atlas: Self = serde_json::from_str(json)?;
        atlas.validate()?;
        Ok(atlas)
    }

    /// Check structural invariants. A missing space record makes layout
    /// meaningless (word breaking is space-based), so it fails fast;
    /// a non-renderable fallback merely degrades coverage and is only
    /// warned about.
    pub fn validate(&self) -> Result<(), Error> {
        if self.glyphs.is_empty() {
            bail!("atlas has no glyphs");
        }
        if !self.glyphs.contains_key(&self.space_key) {
            bail!("atlas is missing its space glyph {}", self.space_key);
        }
        if !self.is_renderable(self.fallback_key) {
            warn!("atlas fallback glyph {} is not renderable; uncovered characters will advance as spaces", self.fallback_key);
        }
        Ok(())
    }

    /// Whether `key` has a drawable entry.
    pub fn is_renderable(&self, key: GlyphKey) -> bool {
        self.glyphs.get(&key).is_some_and(GlyphRecord::is_renderable)
    }

    /// Map a character to the glyph key layout should use for it. Tabs
    /// count as single spaces. A character with no renderable entry uses
    /// the fallback; with no usable fallback either, it degrades to the
    /// space key so it still advances (see `verify_coverage`).
    pub fn resolve_char(&self, ch: char) -> GlyphKey {
        if ch == ' ' || ch == '\t' {
            return self.space_key;
        }
        let key = GlyphKey::from_char(ch);
        if self.is_renderable(key) {
            return key;
        }
        if self.is_renderable(self.fallback_key) {
            return self.fallback_key;
        }
        if self.glyphs.contains_key(&self.space_key) { self.space_key } else { key }
    }

    /// The subset of `keys` with no renderable entry, sorted for stable
    /// reporting.
    pub fn missing_keys(&self, keys: impl IntoIterator<Item = GlyphKey>) -> Vec<GlyphKey> {
        let mut missing: Vec<GlyphKey> = keys
            .into_iter()
            .filter(|&key| !self.is_renderable(key))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Log a single warning listing every key in `keys` that cannot be
    /// drawn. Coverage gaps are diagnostics, never fatal.
    pub fn verify_coverage(&self, keys: impl IntoIterator<Item = GlyphKey>) {
        let missing = self.missing_keys(keys);
        if !missing.is_empty() {
            let list = missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            warn!("missing renderable glyphs for: {list}; using fallback where possible");
        }
    }
}
