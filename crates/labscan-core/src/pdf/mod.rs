//! PDF text layer access.
//!
//! Lab reports exported by laboratory software usually carry an embedded text
//! layer that can be parsed directly. Scanned reports only contain page
//! images and have to go through OCR before extraction.

mod extractor;

use std::fmt;

pub use extractor::PdfExtractor;

use tracing::{debug, warn};

use crate::error::{PdfError, SourceError};
use crate::models::config::PdfConfig;

/// What a PDF contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Text layer only.
    Text,
    /// Page images only (scanned report).
    Image,
    /// Text layer plus images (logos, signatures, stamps).
    Hybrid,
    Empty,
}

impl PdfType {
    /// Whether the embedded text layer is worth parsing.
    pub fn has_text(&self) -> bool {
        matches!(self, Self::Text | Self::Hybrid)
    }
}

impl fmt::Display for PdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Image => "scanned",
            Self::Hybrid => "hybrid",
            Self::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF backends.
pub trait PdfProcessor {
    fn load(&mut self, data: &[u8]) -> Result<()>;

    fn page_count(&self) -> u32;

    /// Classify the loaded document by its text and image content.
    fn analyze(&self) -> PdfType;

    /// Text of every page, in page order.
    fn extract_text(&self) -> Result<String>;
}

/// Read the embedded text layer of a PDF report.
///
/// Text PDFs are always read. Hybrid PDFs are read only when
/// `prefer_embedded_text` is set; otherwise they are treated like scans and
/// rejected with [`SourceError::NoEmbeddedText`].
pub fn embedded_text(data: &[u8], config: &PdfConfig) -> crate::Result<(String, PdfType)> {
    let mut extractor = PdfExtractor::new().with_min_text_length(config.min_text_length);
    extractor.load(data)?;

    let pdf_type = extractor.analyze();
    debug!("{} page {} PDF", extractor.page_count(), pdf_type);

    if !is_readable(pdf_type, config) {
        warn!("PDF has no usable text layer ({})", pdf_type);
        return Err(SourceError::NoEmbeddedText.into());
    }

    Ok((extractor.extract_text()?, pdf_type))
}

fn is_readable(pdf_type: PdfType, config: &PdfConfig) -> bool {
    pdf_type.has_text() && (pdf_type != PdfType::Hybrid || config.prefer_embedded_text)
}
