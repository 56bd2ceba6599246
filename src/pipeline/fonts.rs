//! Font resolution with graceful fallback.
//!
//! Font availability differs wildly across deployment environments
//! (containers frequently ship no fonts at all), so the resolver trades
//! rendering fidelity for an availability guarantee. It walks a fixed
//! cascade and always returns a usable handle:
//!
//! 1. the bundled Unicode family (four TTF faces, see
//!    `assets/fonts/README.md`),
//! 2. a well-known single-face system font (one path per common OS
//!    family),
//! 3. the PDF built-in Helvetica.
//!
//! Steps 1–2 embed the font with a multi-byte encoding and render all
//! scripts faithfully. Step 3 is single-byte WinAnsi: non-Latin text
//! degrades to replacement glyphs, but the handle itself is a value type
//! whose construction cannot fail, so the cascade as a whole cannot fail.
//! Every miss is logged and absorbed; nothing here ever returns an error.

use crate::config::ConversionConfig;
use crate::output::FontSource;
use genpdf::fonts::{self, FontData, FontFamily};
use printpdf::BuiltinFont;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the bundled font family.
pub const BUNDLED_FONT_FAMILY_NAME: &str = "NotoSans";

/// Environment variable overriding the bundled-font directory.
pub const FONTS_DIR_ENV: &str = "TXT2PDF_FONTS_DIR";

const BUNDLED_FONT_FILES: &[&str] = &[
    "NotoSans-Regular.ttf",
    "NotoSans-Bold.ttf",
    "NotoSans-Italic.ttf",
    "NotoSans-BoldItalic.ttf",
];

/// A font handle the assembler can always render with.
pub enum ResolvedFont {
    /// A TTF family embedded with a multi-byte encoding; renders arbitrary
    /// Unicode code points.
    Unicode {
        family: FontFamily<FontData>,
        source: FontSource,
    },
    /// PDF built-in font, single-byte encoding; last resort.
    Builtin(BuiltinFont),
}

impl ResolvedFont {
    /// Which cascade rung produced this handle.
    pub fn source(&self) -> FontSource {
        match self {
            ResolvedFont::Unicode { source, .. } => *source,
            ResolvedFont::Builtin(_) => FontSource::Builtin,
        }
    }
}

type Attempt = fn(&ConversionConfig) -> Option<ResolvedFont>;

/// The cascade, in priority order. Each attempt isolates its own faults;
/// the last entry always succeeds.
const CASCADE: &[(&str, Attempt)] = &[
    ("bundled font family", try_bundled),
    ("system font", try_system),
    ("built-in Helvetica", try_builtin),
];

/// Resolve a font for the current conversion. Never fails.
pub fn resolve_font(config: &ConversionConfig) -> ResolvedFont {
    for (name, attempt) in CASCADE {
        match attempt(config) {
            Some(font) => {
                info!("font cascade selected: {name}");
                return font;
            }
            None => debug!("font cascade step unavailable: {name}"),
        }
    }
    // The last cascade entry is infallible; this line is never reached.
    ResolvedFont::Builtin(BuiltinFont::Helvetica)
}

/// `true` when the bundled family is fully provisioned on this host.
///
/// Tests use this to decide whether Unicode-fidelity assertions can run.
pub fn bundled_fonts_available(config: &ConversionConfig) -> bool {
    bundled_directory_candidates(config)
        .iter()
        .any(|dir| dir.is_dir() && missing_font_files(dir).is_empty())
}

// ── Cascade steps ────────────────────────────────────────────────────────

fn try_bundled(config: &ConversionConfig) -> Option<ResolvedFont> {
    for dir in bundled_directory_candidates(config) {
        if !dir.is_dir() {
            debug!("bundled font directory missing at {}", dir.display());
            continue;
        }
        let missing = missing_font_files(&dir);
        if !missing.is_empty() {
            debug!(
                "bundled font directory {} is incomplete (missing {})",
                dir.display(),
                missing
                    .iter()
                    .map(|p| p.file_name().unwrap_or_default().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            continue;
        }
        match fonts::from_files(&dir, BUNDLED_FONT_FAMILY_NAME, None) {
            Ok(family) => {
                debug!("loaded bundled family from {}", dir.display());
                return Some(ResolvedFont::Unicode {
                    family,
                    source: FontSource::Bundled,
                });
            }
            Err(err) => warn!(
                "bundled fonts at {} exist but failed to load: {err}",
                dir.display()
            ),
        }
    }
    None
}

fn try_system(config: &ConversionConfig) -> Option<ResolvedFont> {
    for path in &config.system_font_paths {
        if !path.is_file() {
            debug!("system font not present: {}", path.display());
            continue;
        }
        match single_face_family(path) {
            Ok(family) => {
                debug!("loaded system font {}", path.display());
                return Some(ResolvedFont::Unicode {
                    family,
                    source: FontSource::System,
                });
            }
            Err(err) => warn!("system font {} failed to load: {err}", path.display()),
        }
    }
    None
}

fn try_builtin(_config: &ConversionConfig) -> Option<ResolvedFont> {
    Some(ResolvedFont::Builtin(BuiltinFont::Helvetica))
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// Search order for the bundled family. An explicit config directory is
/// authoritative; otherwise the env override, the executable's own
/// `assets/fonts`, and the crate root are tried in turn.
fn bundled_directory_candidates(config: &ConversionConfig) -> Vec<PathBuf> {
    if let Some(dir) = &config.font_dir {
        return vec![dir.clone()];
    }

    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONTS_DIR_ENV) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(dir: &Path) -> Vec<PathBuf> {
    BUNDLED_FONT_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

/// Build a family from one face, reusing it for every style. Bold/italic
/// runs lose their weight but stay readable, which beats failing outright
/// on hosts that only ship a regular face.
fn single_face_family(path: &Path) -> Result<FontFamily<FontData>, genpdf::error::Error> {
    let regular = FontData::load(path, None)?;
    Ok(FontFamily {
        bold: regular.clone(),
        italic: regular.clone(),
        bold_italic: regular.clone(),
        regular,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn isolated_config(font_dir: &Path, system_paths: Vec<PathBuf>) -> ConversionConfig {
        ConversionConfig::builder()
            .font_dir(font_dir)
            .system_font_paths(system_paths)
            .build()
            .unwrap()
    }

    #[test]
    fn cascade_degrades_to_builtin_when_nothing_is_available() {
        let empty = tempfile::tempdir().unwrap();
        let config = isolated_config(empty.path(), Vec::new());
        let font = resolve_font(&config);
        assert_eq!(font.source(), FontSource::Builtin);
    }

    #[test]
    fn corrupt_bundled_fonts_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        for name in BUNDLED_FONT_FILES {
            fs::write(dir.path().join(name), b"this is not a font").unwrap();
        }
        let config = isolated_config(dir.path(), Vec::new());
        let font = resolve_font(&config);
        assert_eq!(font.source(), FontSource::Builtin);
    }

    #[test]
    fn corrupt_system_font_is_skipped_not_fatal() {
        let empty = tempfile::tempdir().unwrap();
        let fake = empty.path().join("fake.ttf");
        fs::write(&fake, b"junk").unwrap();
        let config = isolated_config(empty.path(), vec![fake]);
        let font = resolve_font(&config);
        assert_eq!(font.source(), FontSource::Builtin);
    }

    #[test]
    fn missing_system_paths_are_skipped() {
        let empty = tempfile::tempdir().unwrap();
        let config = isolated_config(
            empty.path(),
            vec![PathBuf::from("/nonexistent/nowhere.ttf")],
        );
        let font = resolve_font(&config);
        assert_eq!(font.source(), FontSource::Builtin);
    }

    #[test]
    fn explicit_font_dir_is_the_only_bundled_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let config = isolated_config(dir.path(), Vec::new());
        let candidates = bundled_directory_candidates(&config);
        assert_eq!(candidates, vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn bundled_fonts_available_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = isolated_config(dir.path(), Vec::new());
        assert!(!bundled_fonts_available(&config));
    }
}
