//! Configuration types for text-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across a multi-request server, serialise it
//! for logging, and diff two runs to understand why their outputs differ.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory for staged uploads and produced PDFs.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: u8 = 12;

/// Configuration for a text-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use txt2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .upload_dir("uploads")
///     .font_size(12)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Directory for staged uploads and produced PDFs. Default: `uploads`.
    ///
    /// Created on demand. Stored names carry a UUID prefix, so many
    /// conversions can share one directory without collisions.
    pub upload_dir: PathBuf,

    /// Body font size in points. Range: 6–32. Default: 12.
    pub font_size: u8,

    /// Explicit bundled-font directory.
    ///
    /// When set, this directory is the only place the bundled font family is
    /// looked for. When `None`, the resolver searches `TXT2PDF_FONTS_DIR`,
    /// then `assets/fonts` next to the executable, then `assets/fonts` in
    /// the crate root. See `assets/fonts/README.md` for the expected files.
    pub font_dir: Option<PathBuf>,

    /// Well-known single-face font files probed when no bundled family is
    /// available. The first file that exists and parses wins.
    ///
    /// The default list covers one path per common OS family; override it in
    /// tests to simulate hosts without any system fonts.
    pub system_font_paths: Vec<PathBuf>,

    /// Skip detection and decode with this encoding label (e.g.
    /// "windows-1251"). An unresolvable label fails the conversion with
    /// [`ConvertError::UnsupportedEncoding`]. Default: `None` (detect).
    pub encoding_override: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            font_size: DEFAULT_FONT_SIZE,
            font_dir: None,
            system_font_paths: default_system_font_paths(),
            encoding_override: None,
        }
    }
}

/// One well-known Unicode-capable font file per common OS family.
///
/// Containers frequently ship none of these; the resolver treats every miss
/// as a soft failure and moves on to the built-in font.
pub fn default_system_font_paths() -> Vec<PathBuf> {
    [
        r"C:\Windows\Fonts\arial.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn font_size(mut self, size: u8) -> Self {
        self.config.font_size = size;
        self
    }

    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.font_dir = Some(dir.into());
        self
    }

    pub fn system_font_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.system_font_paths = paths;
        self
    }

    pub fn encoding_override(mut self, label: impl Into<String>) -> Self {
        self.config.encoding_override = Some(label.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.font_size < 6 || c.font_size > 32 {
            return Err(ConvertError::InvalidConfig(format!(
                "font size must be 6–32 points, got {}",
                c.font_size
            )));
        }
        if c.upload_dir.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "upload directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ConversionConfig::builder().build().expect("default builds");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.font_size, 12);
        assert!(config.encoding_override.is_none());
        assert!(!config.system_font_paths.is_empty());
    }

    #[test]
    fn font_size_out_of_range_is_rejected() {
        let err = ConversionConfig::builder().font_size(64).build();
        assert!(matches!(err, Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn empty_upload_dir_is_rejected() {
        let err = ConversionConfig::builder().upload_dir("").build();
        assert!(matches!(err, Err(ConvertError::InvalidConfig(_))));
    }
}
