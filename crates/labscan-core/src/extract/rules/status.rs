//! Normal/high/low classification of extracted values.

use crate::models::parameter::{ReferenceRange, Status};

use super::patterns::NUMERIC_PREFIX;

/// Classify a numeric value against an optional reference range string.
///
/// Total over its inputs: no range, an unrecognized range, or a non-finite
/// value all yield `None`.
pub fn determine_status(value: f64, range: Option<&str>) -> Option<Status> {
    ReferenceRange::parse(range?)?.classify(value)
}

/// Classify a value still in its textual form.
///
/// Only the leading number counts, so OCR noise after it ("13.5.", "1.2.3")
/// is ignored. A value with no leading digits has no status.
pub fn status_for(value: &str, range: Option<&str>) -> Option<Status> {
    let number = NUMERIC_PREFIX.find(value.trim())?;
    determine_status(number.as_str().parse().ok()?, range)
}
