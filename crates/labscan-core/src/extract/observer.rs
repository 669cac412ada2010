//! Diagnostic hook for following extraction decisions.
//!
//! The parser reports every line it visits, every raw match, every relevance
//! decision and every accepted parameter to an [`ExtractionObserver`]. No
//! observer is installed by default, so extraction stays silent.

use tracing::trace;

use crate::models::parameter::HealthParameter;

/// A raw, trimmed match produced by a rule before it is accepted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Candidate {
    pub name: String,
    pub value: String,
    pub unit: Option<String>,
    pub range: Option<String>,
}

/// Receives extraction events. All methods default to doing nothing.
pub trait ExtractionObserver {
    /// A non-blank line is about to be processed.
    fn line(&self, _index: usize, _line: &str) {}

    /// A rule produced a raw match on the current line.
    fn candidate(&self, _rule: &str, _candidate: &Candidate) {}

    /// The relevance filter ruled on a name.
    fn relevance(&self, _name: &str, _accepted: bool) {}

    /// A parameter was appended to the result.
    fn accepted(&self, _rule: &str, _parameter: &HealthParameter) {}

    /// Extraction finished.
    fn finished(&self, _parameters: &[HealthParameter]) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {}

/// Observer that forwards every event to `tracing` at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn line(&self, index: usize, line: &str) {
        trace!(index, line, "processing line");
    }

    fn candidate(&self, rule: &str, candidate: &Candidate) {
        trace!(
            rule,
            name = %candidate.name,
            value = %candidate.value,
            unit = ?candidate.unit,
            range = ?candidate.range,
            "candidate match"
        );
    }

    fn relevance(&self, name: &str, accepted: bool) {
        trace!(name, accepted, "relevance check");
    }

    fn accepted(&self, rule: &str, parameter: &HealthParameter) {
        trace!(
            rule,
            name = %parameter.name,
            value = %parameter.value,
            status = ?parameter.status,
            "parameter accepted"
        );
    }

    fn finished(&self, parameters: &[HealthParameter]) {
        trace!(count = parameters.len(), "extraction finished");
    }
}
