//! Per-user report history.
//!
//! Stores accept validated reports and list a user's reports newest first,
//! capped at a configurable limit.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

pub use crate::models::report::{
    format_file_size, HealthReport, NewReport, ReportListing, ReportSummary, SaveReceipt,
};

use crate::error::HistoryError;

/// Default number of reports returned by a listing.
pub const DEFAULT_MAX_REPORTS: usize = 50;

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Trait for report history backends.
pub trait ReportStore {
    /// Validate and persist a report.
    fn save(&mut self, report: NewReport) -> Result<SaveReceipt>;

    /// List a user's reports, most recent first.
    fn list(&self, user_id: &str) -> Result<ReportListing>;
}

/// Build a listing from every stored report, in insertion order.
///
/// Reports saved later win ties on `created_at`.
pub(crate) fn build_listing<'a>(
    reports: impl DoubleEndedIterator<Item = &'a HealthReport>,
    user_id: &str,
    limit: usize,
) -> Result<ReportListing> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(HistoryError::Unauthorized);
    }

    let mut owned: Vec<&HealthReport> = reports.rev().filter(|r| r.user_id == user_id).collect();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let reports: Vec<ReportSummary> = owned
        .into_iter()
        .take(limit)
        .map(ReportSummary::from)
        .collect();

    Ok(ReportListing {
        total_reports: reports.len(),
        reports,
    })
}
