//! Health parameter extraction from lab report text.

pub mod lines;
pub mod observer;
mod parser;
pub mod rules;

pub use observer::{Candidate, ExtractionObserver, NoopObserver, TracingObserver};
pub use parser::{extract_health_parameters, ExtractionResult, LabReportParser};
