//! Configuration structures for the labscan pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for labscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// PDF text loading configuration.
    pub pdf: PdfConfig,

    /// Parameter extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report history configuration.
    pub history: HistoryConfig,
}

/// PDF text loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Use the PDF's embedded text layer when it has one.
    pub prefer_embedded_text: bool,

    /// Minimum text length to consider a PDF text-based.
    pub min_text_length: usize,

    /// Largest input file accepted, in bytes.
    pub max_file_size: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            prefer_embedded_text: true,
            min_text_length: 50,
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

/// Parameter extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Emit a trace event for every line, candidate match and decision.
    pub trace: bool,
}

/// Report history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// JSON file holding saved reports.
    pub store_path: PathBuf,

    /// Maximum number of reports returned when listing a user's history.
    pub max_reports: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("reports.json"),
            max_reports: 50,
        }
    }
}

impl LabConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
