//! Aggregate load report

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a complete load run.
///
/// `all` always equals `success + cancelled + errors`. The average response
/// time covers successful attempts only and is rounded to whole seconds, so
/// runs answering faster than half a second report zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub success: usize,
    pub cancelled: usize,
    pub errors: usize,
    pub all: usize,
    pub avg_response_time: Duration,
}

impl Report {
    /// Serializable view used by the JSON and YAML formatters
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from(self)
    }
}

/// Wire shape of a report: counters plus the average in whole seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub success: usize,
    pub canceled: usize,
    pub errors: usize,
    pub all: usize,
    pub avg_resp_time: u64,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            success: report.success,
            canceled: report.cancelled,
            errors: report.errors,
            all: report.all,
            avg_resp_time: report.avg_response_time.as_secs_f64().round() as u64,
        }
    }
}
