//! Error types for the txt2pdf library.
//!
//! A single [`ConvertError`] enum covers every fatal failure mode. Two of
//! the pipeline's layers are soft and never surface here:
//!
//! * detection uncertainty is resolved by the UTF-8 default policy inside
//!   [`crate::pipeline::detect`], and
//! * font-cascade misses are absorbed and logged inside
//!   [`crate::pipeline::fonts`], whose last step cannot fail.
//!
//! Everything else (bad uploads, unresolvable encoding labels, render and
//! write faults) is fail-loud: the caller receives either a complete valid
//! PDF or an `Err`, never partial output dressed up as success.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the txt2pdf library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The uploaded file contained zero bytes.
    #[error("Input file is empty\nSelect a non-empty .txt or .fb2 file.")]
    EmptyInput,

    /// The uploaded filename does not end in a supported extension.
    #[error("Unsupported file type: '{name}'\nOnly .txt and .fb2 files are accepted.")]
    UnsupportedExtension { name: String },

    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// An encoding label reached the decoder that the platform cannot
    /// resolve. The detector never produces such a label; this means a
    /// caller-supplied override was bad.
    #[error("Unknown character encoding '{label}'\nUse a WHATWG encoding label such as UTF-8, windows-1251, or koi8-r.")]
    UnsupportedEncoding { label: String },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The PDF backend failed while laying out or serialising the document.
    #[error("PDF assembly failed: {detail}")]
    RenderFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the staged upload file.
    #[error("Failed to stage upload at '{path}': {source}")]
    StagingFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_display() {
        let e = ConvertError::UnsupportedExtension {
            name: "notes.docx".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.docx"), "got: {msg}");
        assert!(msg.contains(".fb2"));
    }

    #[test]
    fn unsupported_encoding_display() {
        let e = ConvertError::UnsupportedEncoding {
            label: "not-a-charset".into(),
        };
        assert!(e.to_string().contains("not-a-charset"));
    }

    #[test]
    fn output_write_failed_keeps_source() {
        use std::error::Error as _;
        let e = ConvertError::OutputWriteFailed {
            path: PathBuf::from("/tmp/out.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(e.to_string().contains("out.pdf"));
        assert!(e.source().is_some());
    }
}
