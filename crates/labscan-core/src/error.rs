//! Error types for the labscan-core library.
//!
//! Parameter extraction itself never fails; these cover the collaborators
//! around it (document loading and report history).

use thiserror::Error;

/// Main error type for the labscan library.
#[derive(Error, Debug)]
pub enum LabError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Document loading error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Report history error.
    #[error("history error: {0}")]
    History(#[from] HistoryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while turning an input file into report text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file is an image; it must go through OCR first.
    #[error("{0} is an image; run OCR on it and pass the recognized text instead")]
    NeedsOcr(String),

    /// Extension not recognized as a lab report source.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A PDF carries no embedded text (scanned document).
    #[error("PDF has no embedded text; run OCR on its pages first")]
    NoEmbeddedText,

    /// The text file is not valid UTF-8.
    #[error("{0} is not valid UTF-8 text")]
    Encoding(String),

    /// The file exceeds the configured size limit.
    #[error("{name} is {size} bytes; the limit is {limit} bytes")]
    TooLarge { name: String, size: u64, limit: u64 },
}

/// Errors related to saving and listing report history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// No user identifier was supplied.
    #[error("unauthorized: a user id is required")]
    Unauthorized,

    /// A required field is missing or blank.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The backing store could not be read or written.
    #[error("store error: {0}")]
    Store(String),
}

/// Result type for the labscan library.
pub type Result<T> = std::result::Result<T, LabError>;
