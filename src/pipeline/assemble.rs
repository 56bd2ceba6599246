//! Document assembly: decoded text + resolved font → finished PDF bytes.
//!
//! Two render paths mirror the two font-handle shapes:
//!
//! * a Unicode TTF family goes through genpdf, which owns paragraph
//!   wrapping and pagination; this crate only pushes one paragraph per
//!   decoded line;
//! * the built-in Helvetica last resort goes through printpdf directly,
//!   because genpdf cannot construct a document without TTF metrics. Line
//!   wrapping on this path uses the average-advance heuristic (0.5 × font
//!   size per character) that metric-less rendering has to settle for.
//!
//! Both paths render into memory; persisting the bytes, and any disk
//! fault, belongs to the orchestrator. All document handles are dropped on
//! every exit path, so no partially written state outlives an error.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::pipeline::fonts::ResolvedFont;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::{elements, SimplePageDecorator};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;
use tracing::debug;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
const PT_TO_MM: f64 = 0.352_778;
/// Average glyph advance as a fraction of the font size, for wrapping
/// without metrics.
const AVG_ADVANCE: f64 = 0.5;
const LINE_SPACING: f64 = 1.2;

/// Lay out `text` with the resolved font and return the PDF bytes.
///
/// An empty `text` still produces a valid, openable document containing a
/// single empty paragraph.
pub fn assemble(
    text: &str,
    font: ResolvedFont,
    config: &ConversionConfig,
) -> Result<Vec<u8>, ConvertError> {
    match font {
        ResolvedFont::Unicode { family, .. } => assemble_with_family(text, family, config),
        ResolvedFont::Builtin(builtin) => assemble_with_builtin(text, builtin, config),
    }
}

fn assemble_with_family(
    text: &str,
    family: FontFamily<FontData>,
    config: &ConversionConfig,
) -> Result<Vec<u8>, ConvertError> {
    // genpdf documents default to A4, matching the built-in path below.
    let mut document = genpdf::Document::new(family);
    document.set_font_size(config.font_size);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(10);
    document.set_page_decorator(decorator);

    for line in text.split('\n') {
        document.push(elements::Paragraph::new(line.to_string()));
    }

    let mut bytes = Vec::new();
    document
        .render(&mut bytes)
        .map_err(|e| ConvertError::RenderFailed {
            detail: e.to_string(),
        })?;
    debug!("assembled {} bytes via embedded font path", bytes.len());
    Ok(bytes)
}

fn assemble_with_builtin(
    text: &str,
    builtin: BuiltinFont,
    config: &ConversionConfig,
) -> Result<Vec<u8>, ConvertError> {
    let font_size = f64::from(config.font_size);
    let line_advance = font_size * LINE_SPACING * PT_TO_MM;
    let usable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let max_chars = ((usable_width / (AVG_ADVANCE * font_size * PT_TO_MM)) as usize).max(1);

    let (document, first_page, first_layer) = PdfDocument::new(
        "Converted document",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "text",
    );
    let font = document
        .add_builtin_font(builtin)
        .map_err(|e| ConvertError::RenderFailed {
            detail: e.to_string(),
        })?;

    let mut layer = document.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - line_advance;

    for line in wrap_lines(text, max_chars) {
        if y < MARGIN_MM {
            let (page, layer_index) =
                document.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
            layer = document.get_page(page).get_layer(layer_index);
            y = PAGE_HEIGHT_MM - MARGIN_MM - line_advance;
        }
        if !line.is_empty() {
            layer.use_text(line, font_size, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= line_advance;
    }

    let mut writer = BufWriter::new(Vec::new());
    document
        .save(&mut writer)
        .map_err(|e| ConvertError::RenderFailed {
            detail: e.to_string(),
        })?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ConvertError::RenderFailed {
            detail: e.to_string(),
        })?;
    debug!("assembled {} bytes via built-in font path", bytes.len());
    Ok(bytes)
}

/// Word-wrap `text` to at most `max_chars` characters per line. Existing
/// newlines are respected; a single word longer than the limit stays on
/// its own line rather than being broken mid-word.
fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_chars = 0usize;
        for word in words {
            let word_chars = word.chars().count();
            if !current.is_empty() && current_chars + 1 + word_chars > max_chars {
                lines.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            if current.is_empty() {
                current.push_str(word);
                current_chars = word_chars;
            } else {
                current.push(' ');
                current.push_str(word);
                current_chars += 1 + word_chars;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConversionConfig {
        ConversionConfig::default()
    }

    fn builtin() -> ResolvedFont {
        ResolvedFont::Builtin(BuiltinFont::Helvetica)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn builtin_path_produces_a_valid_pdf() {
        let bytes = assemble("Hello\nWorld", builtin(), &config()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn empty_text_still_produces_an_openable_pdf() {
        let bytes = assemble("", builtin(), &config()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn long_input_grows_the_document() {
        let one = assemble("line", builtin(), &config()).unwrap();
        let long_text = "строка текста для переноса\n".repeat(400);
        let many = assemble(&long_text, builtin(), &config()).unwrap();
        assert!(many.len() > one.len());
    }

    #[test]
    fn wrap_respects_existing_newlines() {
        assert_eq!(wrap_lines("a\nb", 80), vec!["a", "b"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        assert_eq!(wrap_lines("a\n\nb", 80), vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        assert_eq!(
            wrap_lines("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn wrap_keeps_oversize_words_whole() {
        assert_eq!(
            wrap_lines("tiny incomprehensibilities tiny", 10),
            vec!["tiny", "incomprehensibilities", "tiny"]
        );
    }

    #[test]
    fn wrap_of_empty_text_is_one_empty_line() {
        assert_eq!(wrap_lines("", 80), vec![""]);
    }
}
