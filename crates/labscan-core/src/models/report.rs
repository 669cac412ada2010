//! Saved report models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HistoryError;

use super::parameter::{HealthParameter, StatusCounts};

/// A lab report saved to a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub extracted_text: String,
    pub health_parameters: Vec<HealthParameter>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A report as submitted for saving.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    /// Owner; required.
    pub user_id: Option<String>,
    /// Original upload name; required.
    pub file_name: String,
    pub file_size: Option<u64>,
    pub extracted_text: Option<String>,
    pub health_parameters: Vec<HealthParameter>,
}

impl NewReport {
    /// Check required fields, returning the owner id.
    pub fn validate(&self) -> Result<&str, HistoryError> {
        let user_id = self
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(HistoryError::Unauthorized)?;

        if self.file_name.trim().is_empty() {
            return Err(HistoryError::MissingField("fileName".to_string()));
        }

        Ok(user_id)
    }

    /// Validate and stamp the report with an id and timestamps.
    pub fn into_report(self, now: DateTime<Utc>) -> Result<HealthReport, HistoryError> {
        let user_id = self.validate()?.to_string();

        Ok(HealthReport {
            id: Uuid::new_v4().to_string(),
            user_id,
            file_name: self.file_name,
            file_size: self.file_size.unwrap_or(0),
            extracted_text: self.extracted_text.unwrap_or_default(),
            health_parameters: self.health_parameters,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Acknowledgement returned after a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub report_id: String,
    pub message: String,
    pub parameters_count: usize,
}

impl SaveReceipt {
    pub fn for_report(report: &HealthReport) -> Self {
        Self {
            report_id: report.id.clone(),
            message: "Report saved successfully!".to_string(),
            parameters_count: report.health_parameters.len(),
        }
    }
}

/// One entry of a history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub id: String,
    pub file_name: String,
    pub file_size: u64,
    pub health_parameters: Vec<HealthParameter>,
    pub created_at: DateTime<Utc>,
    pub parameters_count: usize,
}

impl ReportSummary {
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::from_parameters(&self.health_parameters)
    }
}

impl From<&HealthReport> for ReportSummary {
    fn from(report: &HealthReport) -> Self {
        Self {
            id: report.id.clone(),
            file_name: report.file_name.clone(),
            file_size: report.file_size,
            health_parameters: report.health_parameters.clone(),
            created_at: report.created_at,
            parameters_count: report.health_parameters.len(),
        }
    }
}

/// A user's saved reports, most recent first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListing {
    pub reports: Vec<ReportSummary>,
    pub total_reports: usize,
}

/// Human-readable byte count ("0 Bytes", "512 Bytes", "1.5 KB", "2 MB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 10.0).round() / 10.0;

    format!("{} {}", rounded, UNITS[exponent])
}
