//! In-process report store.

use chrono::Utc;
use tracing::debug;

use super::{build_listing, HealthReport, NewReport, ReportListing, ReportStore, Result, SaveReceipt};
use super::DEFAULT_MAX_REPORTS;

/// Report store backed by a `Vec`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    reports: Vec<HealthReport>,
    max_reports: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            max_reports: DEFAULT_MAX_REPORTS,
        }
    }

    /// Set the listing cap.
    pub fn with_max_reports(mut self, max_reports: usize) -> Self {
        self.max_reports = max_reports;
        self
    }

    /// Insert an already-stamped report as-is.
    pub fn insert(&mut self, report: HealthReport) {
        self.reports.push(report);
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for MemoryStore {
    fn save(&mut self, report: NewReport) -> Result<SaveReceipt> {
        let report = report.into_report(Utc::now())?;
        let receipt = SaveReceipt::for_report(&report);

        debug!("Saved report {} for user {}", report.id, report.user_id);
        self.reports.push(report);
        Ok(receipt)
    }

    fn list(&self, user_id: &str) -> Result<ReportListing> {
        build_listing(self.reports.iter(), user_id, self.max_reports)
    }
}
