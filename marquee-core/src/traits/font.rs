//! Font provider trait

/// Source of glyph bitmaps for the character pipeline.
///
/// A glyph is a slice of column bytes, leftmost column first, bit 0 at the
/// top pixel row. Glyph widths may vary per character. An empty slice is a
/// valid glyph with no visual width (e.g. a font's configured blank).
pub trait Font {
    /// Look up the glyph for a character code.
    ///
    /// Returns `None` when the font has no entry for the code; the
    /// pipeline treats this the same as a zero-width glyph.
    fn glyph(&self, code: u16) -> Option<&[u8]>;

    /// Width in columns of the widest glyph in the font.
    ///
    /// Used to size the zone's character buffer.
    fn max_width(&self) -> u8;
}
