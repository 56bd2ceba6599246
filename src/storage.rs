//! Upload staging and file naming.
//!
//! The staging directory is the only state shared between concurrent
//! conversions, so stored names carry a UUIDv4 prefix: two simultaneous
//! uploads of `roman.fb2` land in distinct files. Download naming inverts
//! the staging step: original base name, extension swapped for `.pdf`,
//! percent-encoded so it can travel inside a `Content-Disposition` header
//! (spaces become `%20`, never `+`).

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// File extensions accepted at the upload boundary.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "fb2"];

/// Content type for serving finished documents.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A staged upload: the input bytes persisted under a collision-resistant
/// name in the upload directory.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    /// Name of the staged file inside the upload directory
    /// (`<uuid>_<original-name>`). Feed this to [`crate::convert_staged`].
    pub stored_name: String,
    /// Full path of the staged file.
    pub path: PathBuf,
    /// The caller-supplied original filename, kept for download naming.
    pub original_name: String,
}

/// Validate and persist an uploaded file.
///
/// Rejections happen before any bytes are written: empty uploads are
/// [`ConvertError::EmptyInput`], filenames without a `.txt`/`.fb2`
/// extension (case-insensitive) are [`ConvertError::UnsupportedExtension`].
/// A filename is always required; there is no unnamed-upload bypass.
pub fn stage_upload(
    original_name: &str,
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<StagedUpload, ConvertError> {
    if bytes.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let file_name = sanitize_file_name(original_name).ok_or_else(|| {
        ConvertError::UnsupportedExtension {
            name: original_name.to_string(),
        }
    })?;
    if !has_allowed_extension(&file_name) {
        return Err(ConvertError::UnsupportedExtension {
            name: original_name.to_string(),
        });
    }

    fs::create_dir_all(&config.upload_dir).map_err(|e| ConvertError::StagingFailed {
        path: config.upload_dir.clone(),
        source: e,
    })?;

    let stored_name = format!("{}_{}", Uuid::new_v4(), file_name);
    let path = config.upload_dir.join(&stored_name);
    fs::write(&path, bytes).map_err(|e| ConvertError::StagingFailed {
        path: path.clone(),
        source: e,
    })?;

    info!(
        "staged '{}' as '{}' ({} bytes)",
        original_name,
        stored_name,
        bytes.len()
    );
    Ok(StagedUpload {
        stored_name,
        path,
        original_name: original_name.to_string(),
    })
}

/// Output filename for a given input filename: base name with the last
/// extension replaced by `.pdf`. A name without an extension keeps its full
/// form.
pub fn pdf_file_name(name: &str) -> String {
    match Path::new(name).file_stem() {
        Some(stem) if !stem.is_empty() => format!("{}.pdf", stem.to_string_lossy()),
        _ => format!("{name}.pdf"),
    }
}

/// Header-safe download filename for the original upload name.
///
/// Percent-encodes the `.pdf`-renamed base name. Spaces encode as `%20`,
/// not as form encoding's `+`, which browsers do not unescape in
/// `Content-Disposition`.
pub fn download_file_name(original_name: &str) -> String {
    urlencoding::encode(&pdf_file_name(original_name)).into_owned()
}

/// Full `Content-Disposition` header value for serving the converted file.
pub fn content_disposition(original_name: &str) -> String {
    format!("attachment; filename=\"{}\"", download_file_name(original_name))
}

/// Reduce a client-supplied name to a bare file name. Path components are
/// dropped so an upload can never escape the staging directory.
fn sanitize_file_name(name: &str) -> Option<String> {
    let candidate = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if candidate.is_empty() || candidate == "." || candidate == ".." {
        None
    } else {
        Some(candidate.to_string())
    }
}

fn has_allowed_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> ConversionConfig {
        ConversionConfig::builder()
            .upload_dir(dir)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_upload_is_rejected_before_staging() {
        let dir = tempfile::tempdir().unwrap();
        let err = stage_upload("book.txt", b"", &config_in(dir.path())).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn disallowed_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = stage_upload("notes.docx", b"data", &config_in(dir.path())).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedExtension { .. }));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let staged = stage_upload("BOOK.TXT", b"data", &config_in(dir.path())).unwrap();
        assert!(staged.path.is_file());
    }

    #[test]
    fn stored_name_keeps_original_and_is_unique() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let a = stage_upload("roman.fb2", b"x", &config).unwrap();
        let b = stage_upload("roman.fb2", b"x", &config).unwrap();
        assert!(a.stored_name.ends_with("_roman.fb2"));
        assert_ne!(a.stored_name, b.stored_name);
        assert_eq!(fs::read(&a.path).unwrap(), b"x");
    }

    #[test]
    fn path_components_are_stripped_from_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let staged =
            stage_upload("../../etc/passwd.txt", b"data", &config_in(dir.path())).unwrap();
        assert!(staged.stored_name.ends_with("_passwd.txt"));
        assert_eq!(staged.path.parent().unwrap(), dir.path());
    }

    #[test]
    fn nameless_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = stage_upload("", b"data", &config_in(dir.path())).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedExtension { .. }));
    }

    #[test]
    fn pdf_name_replaces_the_last_extension() {
        assert_eq!(pdf_file_name("roman.fb2"), "roman.pdf");
        assert_eq!(pdf_file_name("archive.tar.gz"), "archive.tar.pdf");
        assert_eq!(pdf_file_name("README"), "README.pdf");
    }

    #[test]
    fn download_name_encodes_spaces_as_percent_20() {
        assert_eq!(download_file_name("my report.txt"), "my%20report.pdf");
        assert_eq!(download_file_name("roman.fb2"), "roman.pdf");
    }

    #[test]
    fn content_disposition_names_the_pdf() {
        assert_eq!(
            content_disposition("my report.txt"),
            "attachment; filename=\"my%20report.pdf\""
        );
    }
}
