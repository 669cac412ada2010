//! Core library for lab report parsing.
//!
//! This crate provides:
//! - Health parameter extraction from OCR text (manual keyword rules plus a
//!   cascade of generic patterns)
//! - Normal/high/low classification against printed reference ranges
//! - An injectable diagnostic hook for tracing extraction decisions
//! - PDF text loading and per-user report history (`native` feature)

pub mod error;
pub mod extract;
pub mod models;
#[cfg(feature = "native")]
pub mod history;
#[cfg(feature = "native")]
pub mod pdf;
#[cfg(feature = "native")]
pub mod source;

pub use error::{LabError, Result};
pub use extract::{
    extract_health_parameters, ExtractionObserver, ExtractionResult, LabReportParser,
    TracingObserver,
};
pub use models::parameter::{HealthParameter, ReferenceRange, Status, StatusCounts};

#[cfg(feature = "native")]
pub use history::{JsonFileStore, MemoryStore, NewReport, ReportStore};
#[cfg(feature = "native")]
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
#[cfg(feature = "native")]
pub use source::{load_document_text, DocumentText};
