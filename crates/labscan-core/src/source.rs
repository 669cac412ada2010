//! Loading report text from files.
//!
//! Recognized text arrives either as a plain text file (OCR output) or as a
//! PDF with an embedded text layer. Images are rejected: OCR runs upstream.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LabError, SourceError};
use crate::models::config::PdfConfig;
use crate::pdf::{embedded_text, PdfType};

/// Image types accepted by the upload form; they need OCR first.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Extensions read directly as recognized text.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// How the text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    PlainText,
    Pdf(PdfType),
}

/// Text of one input document plus the metadata history records keep.
#[derive(Debug, Clone)]
pub struct DocumentText {
    pub text: String,
    pub file_name: String,
    pub file_size: u64,
    pub kind: SourceKind,
}

/// Lower-cased file extension, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether `path` names a file this module can load.
pub fn is_supported(path: &Path) -> bool {
    let ext = extension_of(path);
    ext == "pdf" || TEXT_EXTENSIONS.contains(&ext.as_str())
}

/// Load the text of a lab report file.
pub fn load_document_text(path: &Path, config: &PdfConfig) -> crate::Result<DocumentText> {
    let extension = extension_of(path);
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(SourceError::NeedsOcr(file_name).into());
    }

    let file_size = fs::metadata(path)?.len();
    if file_size > config.max_file_size {
        return Err(SourceError::TooLarge {
            name: file_name,
            size: file_size,
            limit: config.max_file_size,
        }
        .into());
    }

    let data = fs::read(path)?;

    let (text, kind) = match extension.as_str() {
        "pdf" => {
            let (text, pdf_type) = embedded_text(&data, config)?;
            (text, SourceKind::Pdf(pdf_type))
        }
        ext if TEXT_EXTENSIONS.contains(&ext) => {
            let text = String::from_utf8(data)
                .map_err(|_| LabError::from(SourceError::Encoding(file_name.clone())))?;
            (text, SourceKind::PlainText)
        }
        other => return Err(SourceError::UnsupportedFormat(other.to_string()).into()),
    };

    debug!("Loaded {} characters from {}", text.len(), path.display());

    Ok(DocumentText {
        text,
        file_name,
        file_size,
        kind,
    })
}
