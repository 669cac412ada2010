//! Report store persisted as a single JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::error::HistoryError;

use super::{build_listing, HealthReport, NewReport, ReportListing, ReportStore, Result, SaveReceipt};
use super::DEFAULT_MAX_REPORTS;

/// Report store that rewrites one pretty-printed JSON array on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    max_reports: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_reports: DEFAULT_MAX_REPORTS,
        }
    }

    /// Set the listing cap.
    pub fn with_max_reports(mut self, max_reports: usize) -> Self {
        self.max_reports = max_reports;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored report; a missing file is an empty history.
    pub fn load_all(&self) -> Result<Vec<HealthReport>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(store_error)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(store_error)
    }

    fn write_all(&self, reports: &[HealthReport]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(store_error)?;
        }

        let content = serde_json::to_string_pretty(reports).map_err(store_error)?;
        fs::write(&self.path, content).map_err(store_error)
    }
}

fn store_error(e: impl std::fmt::Display) -> HistoryError {
    HistoryError::Store(e.to_string())
}

impl ReportStore for JsonFileStore {
    fn save(&mut self, report: NewReport) -> Result<SaveReceipt> {
        let report = report.into_report(Utc::now())?;
        let receipt = SaveReceipt::for_report(&report);

        let mut reports = self.load_all()?;
        reports.push(report);
        self.write_all(&reports)?;

        debug!(
            "Saved report {} to {} ({} reports stored)",
            receipt.report_id,
            self.path.display(),
            reports.len()
        );
        Ok(receipt)
    }

    fn list(&self, user_id: &str) -> Result<ReportListing> {
        let reports = self.load_all()?;
        build_listing(reports.iter(), user_id, self.max_reports)
    }
}
