//! Output types returned by the conversion entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which rung of the font cascade produced the font used for assembly.
///
/// `Bundled` and `System` render all scripts faithfully (the font is
/// embedded with a multi-byte encoding); `Builtin` is the degraded last
/// resort whose single-byte encoding maps non-Latin text to replacement
/// glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSource {
    /// Bundled Unicode font family loaded from the fonts directory.
    Bundled,
    /// A well-known operating-system font file.
    System,
    /// The PDF built-in Helvetica.
    Builtin,
}

impl FontSource {
    /// `true` when the font can encode arbitrary Unicode code points.
    pub fn is_unicode(self) -> bool {
        !matches!(self, FontSource::Builtin)
    }
}

/// Result of an in-memory conversion ([`crate::convert_bytes`]).
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedDocument {
    /// The finished PDF.
    pub pdf: Vec<u8>,
    /// Name of the encoding the input was decoded with (e.g. "UTF-8",
    /// "windows-1251").
    pub encoding: String,
    /// Which font-cascade rung rendered the document.
    pub font_source: FontSource,
    /// Number of decoded text lines.
    pub lines: usize,
}

/// Result of a file-level conversion ([`crate::convert_to_file`],
/// [`crate::convert_staged`]).
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// Where the finished PDF was written.
    pub pdf_path: PathBuf,
    /// Name of the encoding the input was decoded with.
    pub encoding: String,
    /// Which font-cascade rung rendered the document.
    pub font_source: FontSource,
    /// Timings and sizes for the conversion.
    pub stats: ConversionStats,
}

/// Sizes and timing for one conversion.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ConversionStats {
    /// Bytes read from the input file.
    pub input_bytes: u64,
    /// Decoded text lines fed to the assembler.
    pub decoded_lines: usize,
    /// Bytes of the finished PDF.
    pub pdf_bytes: u64,
    /// Wall-clock duration of the whole conversion.
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_not_unicode() {
        assert!(FontSource::Bundled.is_unicode());
        assert!(FontSource::System.is_unicode());
        assert!(!FontSource::Builtin.is_unicode());
    }
}
