//! Glyph measurement.
//!
//! The layout engine never measures text itself; it asks a
//! [`FontMetricsProvider`] supplied by the host.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Measures the rendered advance of a single character.
pub trait FontMetricsProvider {
    /// Horizontal advance of `ch` in pixels at `font_size`.
    fn width(&self, ch: char, font_name: &str, font_size: f32) -> f32;
}

/// Every character has the same advance, scaled linearly with the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMetrics {
    advance: f32,
    at_size: f32,
}

impl FixedWidthMetrics {
    /// Metrics where each character is `advance` pixels wide at `at_size`.
    pub fn new(advance: f32, at_size: f32) -> Self {
        Self {
            advance,
            at_size: if at_size > 0.0 { at_size } else { 1.0 },
        }
    }
}

impl Default for FixedWidthMetrics {
    /// Roughly a 0.6em monospace advance.
    fn default() -> Self {
        Self::new(6.0, 10.0)
    }
}

impl FontMetricsProvider for FixedWidthMetrics {
    fn width(&self, _ch: char, _font_name: &str, font_size: f32) -> f32 {
        self.advance * font_size / self.at_size
    }
}

/// Advances read from a TrueType/OpenType font file.
///
/// The face is parsed once at load time and the advance of every character it
/// maps is kept, so measuring never touches the font data again. The font
/// file itself determines the face; `font_name` is ignored.
pub struct TtfMetrics {
    units_per_em: f32,
    notdef_advance: f32,
    /// Advances in font units, keyed by character.
    advances: HashMap<char, u16>,
}

impl std::fmt::Debug for TtfMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfMetrics")
            .field("units_per_em", &self.units_per_em)
            .field("mapped_chars", &self.advances.len())
            .finish_non_exhaustive()
    }
}

impl TtfMetrics {
    /// Loads a font from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read font file: {}", path.display()))?;
        Self::from_bytes(&data).with_context(|| format!("invalid font file: {}", path.display()))
    }

    /// Parses font data held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a parseable font face.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| anyhow::anyhow!("failed to parse font face: {e}"))?;
        let units_per_em = f32::from(face.units_per_em());
        if units_per_em <= 0.0 {
            anyhow::bail!("font reports zero units per em");
        }
        let notdef_advance = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .map_or(0.0, f32::from);
        let advances = collect_advances(&face);
        tracing::debug!(units_per_em, mapped = advances.len(), "loaded font metrics");
        Ok(Self {
            units_per_em,
            notdef_advance,
            advances,
        })
    }

    fn advance_units(&self, ch: char) -> f32 {
        self.advances
            .get(&ch)
            .map_or(self.notdef_advance, |&units| f32::from(units))
    }
}

/// Horizontal advance of every character in the face's Unicode cmap
/// subtables. The first subtable mapping a character wins, as in
/// `Face::glyph_index`.
fn collect_advances(face: &ttf_parser::Face<'_>) -> HashMap<char, u16> {
    let mut advances = HashMap::new();
    let Some(cmap) = face.tables().cmap else {
        return advances;
    };
    for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
        subtable.codepoints(|code_point| {
            let Some(ch) = char::from_u32(code_point) else {
                return;
            };
            if advances.contains_key(&ch) {
                return;
            }
            if let Some(units) = subtable
                .glyph_index(code_point)
                .and_then(|id| face.glyph_hor_advance(id))
            {
                advances.insert(ch, units);
            }
        });
    }
    advances
}

impl FontMetricsProvider for TtfMetrics {
    fn width(&self, ch: char, _font_name: &str, font_size: f32) -> f32 {
        self.advance_units(ch) * font_size / self.units_per_em
    }
}
