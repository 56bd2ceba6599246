//! Content decoding: bytes + encoding label → newline-joined text.
//!
//! Decoding always operates on the original byte buffer; detection reads
//! the same bytes separately and never consumes them. Malformed sequences
//! decode to U+FFFD so every input byte is accounted for: garbled output is
//! acceptable, silent truncation is not.

use crate::error::ConvertError;
use encoding_rs::Encoding;
use tracing::{debug, warn};

/// Decode `bytes` under a caller-supplied encoding label.
///
/// The label is resolved with the WHATWG label registry
/// (case-insensitive, e.g. "UTF-8", "windows-1251", "koi8-r"). An
/// unresolvable label is a fatal [`ConvertError::UnsupportedEncoding`]:
/// the detector has already applied the default policy upstream, so a bad
/// label here is a caller bug that must not be papered over.
pub fn decode(bytes: &[u8], label: &str) -> Result<String, ConvertError> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        ConvertError::UnsupportedEncoding {
            label: label.to_string(),
        }
    })?;
    Ok(decode_with(bytes, encoding))
}

/// Decode `bytes` under an already-resolved encoding.
///
/// Source lines are re-joined with a single `'\n'`; CRLF and lone CR are
/// normalised and one trailing line terminator is dropped. Empty input
/// yields an empty string.
pub fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    // BOM sniffing may override the supplied encoding; that is the correct
    // outcome, a BOM is a stronger signal than any statistical guess.
    let (text, actual, had_errors) = encoding.decode(bytes);
    if actual != encoding {
        debug!(
            "byte-order mark overrode {} with {}",
            encoding.name(),
            actual.name()
        );
    }
    if had_errors {
        warn!(
            "input contained byte sequences invalid under {}; they decode as U+FFFD",
            actual.name()
        );
    }

    join_lines(&text)
}

fn join_lines(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    match normalized.strip_suffix('\n') {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1251};

    #[test]
    fn utf8_text_decodes_exactly() {
        let text = decode("Привет, мир\n".as_bytes(), "UTF-8").unwrap();
        assert_eq!(text, "Привет, мир");
    }

    #[test]
    fn windows_1251_label_decodes_cyrillic() {
        let (bytes, _, _) = WINDOWS_1251.encode("Привет, мир");
        let text = decode(&bytes, "windows-1251").unwrap();
        assert_eq!(text, "Привет, мир");
    }

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(decode(b"abc", "Utf-8").unwrap(), "abc");
        assert_eq!(decode(b"abc", "WINDOWS-1251").unwrap(), "abc");
    }

    #[test]
    fn line_endings_are_normalised() {
        let text = decode(b"one\r\ntwo\rthree\n", "UTF-8").unwrap();
        assert_eq!(text, "one\ntwo\nthree");
    }

    #[test]
    fn blank_lines_survive_joining() {
        let text = decode(b"a\n\nb\n", "UTF-8").unwrap();
        assert_eq!(text, "a\n\nb");
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(decode(b"", "UTF-8").unwrap(), "");
    }

    #[test]
    fn malformed_label_is_a_decode_error() {
        let err = decode(b"abc", "definitely-not-an-encoding").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedEncoding { ref label } if label == "definitely-not-an-encoding"
        ));
    }

    #[test]
    fn invalid_sequences_decode_lossily_not_silently() {
        let text = decode_with(&[b'o', b'k', 0xFF, b'!'], UTF_8);
        assert!(text.contains('\u{FFFD}'));
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("мир".as_bytes());
        assert_eq!(decode_with(&bytes, UTF_8), "мир");
    }

    #[test]
    fn decode_then_reencode_round_trips() {
        let original = "Первая строка\nВторая строка";
        let (bytes, _, _) = WINDOWS_1251.encode(original);
        let decoded = decode_with(&bytes, WINDOWS_1251);
        let (reencoded, _, _) = WINDOWS_1251.encode(&decoded);
        assert_eq!(reencoded.as_ref(), bytes.as_ref());
    }
}
