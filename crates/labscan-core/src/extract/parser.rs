//! Lab report parser combining manual keyword rules and generic patterns.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::parameter::{HealthParameter, StatusCounts};

use super::lines::split_lines;
use super::observer::{ExtractionObserver, NoopObserver, TracingObserver};
use super::rules::{LineExtractor, GENERIC_PATTERNS, MANUAL_RULES};

/// Result of a parse, with bookkeeping for callers.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted parameters, in emission order.
    pub parameters: Vec<HealthParameter>,
    /// Raw input text.
    pub raw_text: String,
    /// Number of non-blank lines examined.
    pub line_count: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::from_parameters(&self.parameters)
    }
}

/// Lab report parser.
///
/// Every non-blank line goes through all manual rules (table order) and then
/// all generic patterns (declared order). Results are concatenated as they
/// are produced; overlapping rules can emit the same parameter twice.
#[derive(Clone)]
pub struct LabReportParser {
    extractors: Vec<&'static (dyn LineExtractor + Sync)>,
    observer: Option<Arc<dyn ExtractionObserver + Send + Sync>>,
}

impl LabReportParser {
    /// Create a parser with the standard rule set and no observer.
    pub fn new() -> Self {
        let mut extractors: Vec<&'static (dyn LineExtractor + Sync)> = Vec::new();
        extractors.extend(MANUAL_RULES.iter().map(|r| r as &(dyn LineExtractor + Sync)));
        extractors.extend(GENERIC_PATTERNS.iter().map(|p| p as &(dyn LineExtractor + Sync)));

        Self {
            extractors,
            observer: None,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let parser = Self::new();
        if config.trace {
            parser.with_observer(Arc::new(TracingObserver))
        } else {
            parser
        }
    }

    /// Install a diagnostic observer.
    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver + Send + Sync>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Labels of the active extractors, in evaluation order.
    pub fn extractor_labels(&self) -> Vec<&'static str> {
        self.extractors
            .iter()
            .map(|e| {
                let extractor: &'static (dyn LineExtractor + Sync) = *e;
                extractor.label()
            })
            .collect()
    }

    /// Extract parameters from raw report text.
    pub fn extract(&self, text: &str) -> Vec<HealthParameter> {
        self.run(text).0
    }

    /// Extract parameters and report timing and line counts.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let stopwatch = Stopwatch::start();
        let (parameters, line_count) = self.run(text);

        debug!(
            "Extracted {} parameters from {} lines",
            parameters.len(),
            line_count
        );

        ExtractionResult {
            parameters,
            raw_text: text.to_string(),
            line_count,
            processing_time_ms: stopwatch.elapsed_ms(),
        }
    }

    fn run(&self, text: &str) -> (Vec<HealthParameter>, usize) {
        let observer: &dyn ExtractionObserver = match &self.observer {
            Some(observer) => observer.as_ref(),
            None => &NoopObserver,
        };

        let lines = split_lines(text);
        let mut parameters = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            observer.line(index, line);
            for extractor in &self.extractors {
                parameters.extend(extractor.extract_line(line, observer));
            }
        }

        observer.finished(&parameters);
        (parameters, lines.len())
    }
}

impl Default for LabReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock timer for `processing_time_ms`.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
struct Stopwatch(std::time::Instant);

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
impl Stopwatch {
    fn start() -> Self {
        Self(std::time::Instant::now())
    }

    fn elapsed_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

// Browsers have no `Instant`; timing is reported as 0 there.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
struct Stopwatch;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
impl Stopwatch {
    fn start() -> Self {
        Self
    }

    fn elapsed_ms(&self) -> u64 {
        0
    }
}

/// Extract health parameters with the default parser.
pub fn extract_health_parameters(text: &str) -> Vec<HealthParameter> {
    LabReportParser::new().extract(text)
}
