//! Rule-based parameter extractors.

pub mod cascade;
pub mod keywords;
pub mod patterns;
pub mod relevance;
pub mod status;

pub use cascade::{GenericPattern, GENERIC_PATTERNS};
pub use keywords::{KeywordRule, RangePolicy, Trigger, MANUAL_RULES};
pub use relevance::{is_health_parameter, HEALTH_KEYWORDS};
pub use status::{determine_status, status_for};

use crate::models::parameter::HealthParameter;

use super::observer::ExtractionObserver;

/// A matcher applied to one line of report text at a time.
pub trait LineExtractor {
    /// Short identifier used in diagnostics.
    fn label(&self) -> &str;

    /// Extract zero or more parameters from a single line.
    fn extract_line(&self, line: &str, observer: &dyn ExtractionObserver) -> Vec<HealthParameter>;
}
