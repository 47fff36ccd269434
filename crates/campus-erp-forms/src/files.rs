//! Local file gating and previews.
//!
//! Uploads are checked against the field's accept list and size cap before
//! they ever reach form state; a rejected file is dropped with no preview.
//! Accepted images get an inline base64 data-URL preview, other files a
//! filename placeholder. This is a client-side gate only — the backend still
//! validates on its own terms.

use std::fmt;

use base64::Engine as _;

use campus_erp_core::settings;
use campus_erp_core::value::UploadFile;

use crate::fields::FieldDef;

/// Reasons a file is rejected before attaching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    /// The MIME type / extension is not in the accept list.
    TypeNotAllowed {
        /// The accept list that was enforced.
        accept: String,
    },
    /// The file exceeds the configured size cap.
    TooLarge {
        /// The cap in megabytes.
        max_mb: u64,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeNotAllowed { accept } => {
                write!(f, "Invalid file type. Allowed: {accept}")
            }
            Self::TooLarge { max_mb } => {
                write!(f, "File size must be less than {max_mb}MB")
            }
        }
    }
}

impl std::error::Error for FileError {}

/// What the file drop zone shows for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePreview {
    /// Inline preview of a pending image upload, as a `data:` URL.
    InlineImage(String),
    /// A pending non-image upload, shown by name.
    FileName(String),
    /// A persisted upload, previewed from its URL/path.
    Remote(String),
}

/// Validates an upload against the field's accept list and size cap.
///
/// The accept list is comma-separated and supports `*` (anything),
/// `type/*` wildcards, exact MIME types, and `.ext` suffixes matched
/// case-insensitively against the file name. A field without its own
/// size cap falls back to the configured `max_upload_mb`.
pub fn validate_upload(field: &FieldDef, file: &UploadFile) -> Result<(), FileError> {
    let accept = field.accept.as_deref().unwrap_or("*");
    let allowed = accept.split(',').map(str::trim).any(|pattern| {
        if pattern == "*" || pattern == "*/*" {
            return true;
        }
        if let Some(base) = pattern.strip_suffix("/*") {
            return file
                .content_type
                .starts_with(&format!("{base}/"));
        }
        if let Some(ext) = pattern.strip_prefix('.') {
            return file
                .file_name
                .to_lowercase()
                .ends_with(&format!(".{}", ext.to_lowercase()));
        }
        file.content_type == pattern
    });

    if !allowed {
        return Err(FileError::TypeNotAllowed {
            accept: accept.to_string(),
        });
    }

    let max_mb = field
        .max_size_mb
        .unwrap_or_else(|| settings::settings().max_upload_mb);
    let max_bytes = max_mb * 1024 * 1024;
    if file.size() as u64 > max_bytes {
        return Err(FileError::TooLarge { max_mb });
    }

    Ok(())
}

/// Builds the preview for an accepted pending upload.
///
/// Image MIME types get an inline data-URL rendering of the bytes; anything
/// else shows its filename.
pub fn preview_for_upload(file: &UploadFile) -> FilePreview {
    if file.is_image() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        FilePreview::InlineImage(format!("data:{};base64,{encoded}", file.content_type))
    } else {
        FilePreview::FileName(file.file_name.clone())
    }
}

/// Builds the preview for a persisted file reference, if it looks like one.
///
/// The backend hands back URLs or absolute media paths; anything else is not
/// previewable.
pub fn preview_for_ref(value: &str) -> Option<FilePreview> {
    if value.starts_with("http") || value.starts_with('/') {
        Some(FilePreview::Remote(value.to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    fn photo_field() -> FieldDef {
        FieldDef::new("photo", "Photo", FieldKind::File)
            .accept("image/*")
            .max_size_mb(2)
    }

    fn png(size: usize) -> UploadFile {
        UploadFile::new("photo.png", "image/png", vec![0_u8; size])
    }

    #[test]
    fn test_accept_wildcard_type() {
        assert!(validate_upload(&photo_field(), &png(10)).is_ok());
    }

    #[test]
    fn test_reject_wrong_type() {
        let pdf = UploadFile::new("doc.pdf", "application/pdf", vec![0; 10]);
        let err = validate_upload(&photo_field(), &pdf).unwrap_err();
        assert!(matches!(err, FileError::TypeNotAllowed { .. }));
    }

    #[test]
    fn test_reject_oversize() {
        let big = png(3 * 1024 * 1024);
        let err = validate_upload(&photo_field(), &big).unwrap_err();
        assert_eq!(err, FileError::TooLarge { max_mb: 2 });
    }

    #[test]
    fn test_accept_exact_mime() {
        let field = FieldDef::new("doc", "Document", FieldKind::File).accept("application/pdf");
        let pdf = UploadFile::new("doc.pdf", "application/pdf", vec![0; 10]);
        assert!(validate_upload(&field, &pdf).is_ok());
    }

    #[test]
    fn test_accept_extension_case_insensitive() {
        let field = FieldDef::new("doc", "Document", FieldKind::File).accept(".pdf,.doc");
        let pdf = UploadFile::new("Report.PDF", "application/octet-stream", vec![0; 10]);
        assert!(validate_upload(&field, &pdf).is_ok());
    }

    #[test]
    fn test_accept_star_allows_anything() {
        let field = FieldDef::new("any", "Any", FieldKind::File);
        let blob = UploadFile::new("x.bin", "application/octet-stream", vec![0; 10]);
        assert!(validate_upload(&field, &blob).is_ok());
    }

    #[test]
    fn test_cap_falls_back_to_settings_default() {
        let field = FieldDef::new("any", "Any", FieldKind::File);
        let big = UploadFile::new("x.bin", "application/octet-stream", vec![0; 11 * 1024 * 1024]);
        assert_eq!(
            validate_upload(&field, &big).unwrap_err(),
            FileError::TooLarge { max_mb: 10 }
        );
    }

    #[test]
    fn test_image_preview_is_data_url() {
        let preview = preview_for_upload(&png(3));
        match preview {
            FilePreview::InlineImage(url) => {
                assert!(url.starts_with("data:image/png;base64,"));
            }
            other => panic!("expected inline image, got {other:?}"),
        }
    }

    #[test]
    fn test_non_image_preview_is_filename() {
        let pdf = UploadFile::new("report.pdf", "application/pdf", vec![0; 3]);
        assert_eq!(
            preview_for_upload(&pdf),
            FilePreview::FileName("report.pdf".into())
        );
    }

    #[test]
    fn test_remote_preview_detection() {
        assert_eq!(
            preview_for_ref("https://cdn.test/logo.png"),
            Some(FilePreview::Remote("https://cdn.test/logo.png".into()))
        );
        assert_eq!(
            preview_for_ref("/media/logo.png"),
            Some(FilePreview::Remote("/media/logo.png".into()))
        );
        assert_eq!(preview_for_ref("logo.png"), None);
    }
}
