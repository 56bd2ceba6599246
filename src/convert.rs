//! Conversion entry points.
//!
//! [`convert_bytes`] is the pure core: bytes in, PDF bytes out, no
//! filesystem access beyond the font probe. [`convert_to_file`] adds input
//! reading and an atomic persist (temp file + rename, so a crash or disk
//! fault never leaves a partial file under the final name).
//! [`convert_staged`] is the service flow over the upload directory.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::{ConversionOutput, ConversionStats, ConvertedDocument};
use crate::pipeline::{assemble, decode, detect, fonts};
use crate::storage;
use encoding_rs::Encoding;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert raw input bytes to a finished PDF in memory.
///
/// This is the primary library entry point. Detection never fails (the
/// UTF-8 default policy applies to inconclusive input) and the font
/// cascade never fails; the only error sources are a bad
/// `encoding_override` label and the PDF backend itself.
pub fn convert_bytes(
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<ConvertedDocument, ConvertError> {
    // ── Step 1: choose the encoding ──────────────────────────────────────
    let encoding = match &config.encoding_override {
        Some(label) => {
            Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                ConvertError::UnsupportedEncoding {
                    label: label.clone(),
                }
            })?
        }
        None => detect::detect_bytes(bytes),
    };
    info!("input encoding: {}", encoding.name());

    // ── Step 2: decode ───────────────────────────────────────────────────
    let text = decode::decode_with(bytes, encoding);
    let lines = text.lines().count();
    let preview: String = text.chars().take(100).collect();
    debug!("decoded {lines} lines, preview: {preview:?}");

    // ── Step 3: resolve a font ───────────────────────────────────────────
    let font = fonts::resolve_font(config);
    let font_source = font.source();

    // ── Step 4: assemble the document ────────────────────────────────────
    let pdf = assemble::assemble(&text, font, config)?;

    Ok(ConvertedDocument {
        pdf,
        encoding: encoding.name().to_string(),
        font_source,
        lines,
    })
}

/// Convert an input file and write the PDF to `output_path`.
///
/// The PDF is written to a sibling temp file first and renamed into place,
/// so the output path either holds a complete document or nothing.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let started = Instant::now();
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();
    info!("converting {}", input_path.display());

    let bytes = read_input(input_path)?;
    let converted = convert_bytes(&bytes, config)?;
    persist(&converted.pdf, output_path)?;

    let stats = ConversionStats {
        input_bytes: bytes.len() as u64,
        decoded_lines: converted.lines,
        pdf_bytes: converted.pdf.len() as u64,
        duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        "conversion complete: {} → {} ({} bytes, {}ms)",
        input_path.display(),
        output_path.display(),
        stats.pdf_bytes,
        stats.duration_ms
    );

    Ok(ConversionOutput {
        pdf_path: output_path.to_path_buf(),
        encoding: converted.encoding,
        font_source: converted.font_source,
        stats,
    })
}

/// Convert a previously staged upload (see [`crate::stage_upload`]).
///
/// Reads `<upload_dir>/<stored_name>` and writes the PDF next to it under
/// the stored base name with a `.pdf` extension.
pub fn convert_staged(
    stored_name: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let input = config.upload_dir.join(stored_name);
    let output = config.upload_dir.join(storage::pdf_file_name(stored_name));
    convert_to_file(input, output, config)
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn read_input(path: &Path) -> Result<Vec<u8>, ConvertError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(_) => Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

fn persist(bytes: &[u8], path: &Path) -> Result<(), ConvertError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConvertError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp_path = path.with_extension("pdf.tmp");
    fs::write(&tmp_path, bytes).map_err(|e| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::rename(&tmp_path, path).map_err(|e| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_file_not_found() {
        let config = ConversionConfig::default();
        let err = convert_to_file("/nonexistent/input.txt", "/tmp/out.pdf", &config).unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[test]
    fn bad_encoding_override_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .font_dir(dir.path())
            .system_font_paths(Vec::new())
            .encoding_override("no-such-charset")
            .build()
            .unwrap();
        let err = convert_bytes(b"abc", &config).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedEncoding { .. }));
    }
}
