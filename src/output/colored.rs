//! Colored human-readable formatter

use super::formatter::{ReportFormatter, HUMAN_LABELS};
use crate::{error::Result, models::Report};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub error: Color,
    pub cancelled: Color,
    pub info: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            cancelled: Color::Yellow,
            info: Color::Cyan,
        }
    }
}

/// Human format with colored counters
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, label: &str, value: impl ToString, color: Color) -> String {
        format!("{}: {}", label.bold(), value.to_string().color(color))
    }
}

impl ReportFormatter for ColoredFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let summary = report.summary();
        let scheme = &self.color_scheme;

        let lines = [
            self.line(HUMAN_LABELS[0], summary.all, scheme.header),
            "Of them".dimmed().to_string(),
            self.line(HUMAN_LABELS[1], summary.success, scheme.success),
            self.line(HUMAN_LABELS[2], summary.errors, scheme.error),
            self.line(HUMAN_LABELS[3], summary.canceled, scheme.cancelled),
            self.line(HUMAN_LABELS[4], summary.avg_resp_time, scheme.info),
        ];

        Ok(lines.join("\n"))
    }

    fn name(&self) -> &'static str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PlainFormatter;
    use std::time::Duration;

    #[test]
    fn test_colored_matches_plain_without_colors() {
        colored::control::set_override(false);

        let report = Report {
            success: 3,
            cancelled: 0,
            errors: 1,
            all: 4,
            avg_response_time: Duration::from_secs(1),
        };

        let colored = ColoredFormatter::new().format(&report).unwrap();
        let plain = PlainFormatter::new().format(&report).unwrap();

        colored::control::unset_override();
        assert_eq!(colored, plain);
    }
}
