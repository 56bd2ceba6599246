//! # txt2pdf
//!
//! Convert plain-text and FB2 e-book files to PDF, with automatic
//! character-encoding detection and Unicode font fallback.
//!
//! ## Why this crate?
//!
//! Naive text-to-PDF rendering is trivial, and silently corrupts anything
//! that is not ASCII. A Cyrillic `.txt` saved on an old Windows machine is
//! windows-1251, not UTF-8; a container image usually ships no fonts at
//! all, so even a correct decode renders as empty boxes. This crate owns
//! exactly that pipeline: detect the encoding statistically, decode
//! without silent data loss, and resolve a font through a fallback cascade
//! that always yields something renderable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .txt / .fb2 bytes
//!  │
//!  ├─ 1. Detect    statistical charset inference (chardetng), UTF-8 default
//!  ├─ 2. Decode    encoding_rs, lines re-joined with '\n', lossy not lossless-lying
//!  ├─ 3. Fonts     bundled family → system font probe → built-in Helvetica
//!  ├─ 4. Assemble  one paragraph per line via genpdf (or printpdf fallback)
//!  └─ 5. Persist   atomic write; staged uploads get UUID-prefixed names
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use txt2pdf::{convert_to_file, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert_to_file("roman.txt", "roman.pdf", &config)?;
//!     println!("{} ({} detected)", output.pdf_path.display(), output.encoding);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `txt2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! txt2pdf = { version = "0.3", default-features = false }
//! ```
//!
//! ## Rendering fidelity
//!
//! The font cascade degrades gracefully: the bundled family and system
//! fonts are embedded with a multi-byte encoding and render all scripts
//! faithfully; the built-in Helvetica last resort is single-byte, so
//! non-Latin text renders as replacement glyphs rather than failing the
//! conversion. Check [`ConversionOutput::font_source`] if fidelity matters
//! to your caller.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod storage;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    default_system_font_paths, ConversionConfig, ConversionConfigBuilder, DEFAULT_FONT_SIZE,
    DEFAULT_UPLOAD_DIR,
};
pub use convert::{convert_bytes, convert_staged, convert_to_file};
pub use error::ConvertError;
pub use output::{ConversionOutput, ConversionStats, ConvertedDocument, FontSource};
pub use storage::{
    content_disposition, download_file_name, pdf_file_name, stage_upload, StagedUpload,
    ALLOWED_EXTENSIONS, PDF_CONTENT_TYPE,
};
