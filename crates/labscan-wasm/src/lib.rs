//! WASM bindings for lab report parameter extraction.
//!
//! Recognition runs in the browser; these bindings take the recognized text
//! and return health parameters as plain JS objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use labscan_core::extract::rules;
use labscan_core::{HealthParameter, LabReportParser, StatusCounts};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract health parameters from recognized report text.
///
/// Returns an array of `{ name, value, unit?, normalRange?, status? }`.
#[wasm_bindgen]
pub fn extract_parameters_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&labscan_core::extract_health_parameters(text))
}

/// Same as `extract_parameters_from_text`, as a JSON string.
#[wasm_bindgen]
pub fn extract_parameters_json(text: &str) -> Result<String, JsValue> {
    serde_json::to_string(&labscan_core::extract_health_parameters(text))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Classify a value against a printed reference range.
///
/// Returns `"normal"`, `"high"`, `"low"`, or `undefined`.
#[wasm_bindgen]
pub fn determine_status(value: f64, range: Option<String>) -> Option<String> {
    rules::determine_status(value, range.as_deref()).map(|s| s.as_str().to_string())
}

/// Extract parameters and count them by status.
#[wasm_bindgen]
pub fn count_statuses(text: &str) -> Result<JsValue, JsValue> {
    let parameters = labscan_core::extract_health_parameters(text);
    to_js(&StatusReport::from(StatusCounts::from_parameters(&parameters)))
}

#[derive(Serialize)]
struct StatusReport {
    normal: usize,
    high: usize,
    low: usize,
    unknown: usize,
    abnormal: usize,
    total: usize,
}

impl From<StatusCounts> for StatusReport {
    fn from(counts: StatusCounts) -> Self {
        Self {
            normal: counts.normal,
            high: counts.high,
            low: counts.low,
            unknown: counts.unknown,
            abnormal: counts.abnormal(),
            total: counts.total(),
        }
    }
}

/// Lab report extractor class for browser use.
#[wasm_bindgen]
pub struct LabReportExtractor {
    parser: LabReportParser,
}

#[wasm_bindgen]
impl LabReportExtractor {
    /// Create a new extractor with the standard rule set.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: LabReportParser::new(),
        }
    }

    /// Labels of the rules applied to every line, in order.
    #[wasm_bindgen]
    pub fn rule_labels(&self) -> Vec<String> {
        self.parser
            .extractor_labels()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Extract parameters from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract(text))
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            success: bool,
            parameters: Vec<HealthParameter>,
            counts: StatusReport,
            line_count: usize,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            success: true,
            counts: result.status_counts().into(),
            parameters: result.parameters,
            line_count: result.line_count,
            processing_time_ms: result.processing_time_ms,
        };

        to_js(&output)
    }
}

impl Default for LabReportExtractor {
    fn default() -> Self {
        Self::new()
    }
}
