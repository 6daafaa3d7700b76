//! Core formatting trait and the plain, JSON and YAML implementations

use crate::{
    error::{AppError, Result},
    models::{Report, ReportSummary},
};
use std::fmt::Write as _;

/// Renders a finished report
pub trait ReportFormatter {
    /// Render the report as text ready for stdout
    fn format(&self, report: &Report) -> Result<String>;

    /// Format name, for logs
    fn name(&self) -> &'static str;
}

/// Labels of the human-readable report, in print order
pub(crate) const HUMAN_LABELS: [&str; 5] = [
    "Total requests",
    "Successful",
    "Failed",
    "Cancelled",
    "Average response time (sec)",
];

/// Plain text formatter implementation
#[derive(Debug, Default, Clone)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for PlainFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let summary = ReportSummary::from(report);
        let mut output = String::new();

        let write_lines = |output: &mut String| -> std::fmt::Result {
            writeln!(output, "{}: {}", HUMAN_LABELS[0], summary.all)?;
            writeln!(output, "Of them")?;
            writeln!(output, "{}: {}", HUMAN_LABELS[1], summary.success)?;
            writeln!(output, "{}: {}", HUMAN_LABELS[2], summary.errors)?;
            writeln!(output, "{}: {}", HUMAN_LABELS[3], summary.canceled)?;
            write!(output, "{}: {}", HUMAN_LABELS[4], summary.avg_resp_time)
        };
        write_lines(&mut output)
            .map_err(|e| AppError::serialization(format!("Failed to format report: {}", e)))?;

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "human"
    }
}

/// Pretty-printed JSON formatter
#[derive(Debug, Default, Clone)]
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(&report.summary())?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// YAML formatter
#[derive(Debug, Default, Clone)]
pub struct YamlFormatter;

impl ReportFormatter for YamlFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Ok(serde_yaml::to_string(&report.summary())?)
    }

    fn name(&self) -> &'static str {
        "yaml"
    }
}
