//! Output formatting for load reports
//!
//! Reports render as human-readable text (plain or colored), JSON or YAML.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{JsonFormatter, PlainFormatter, ReportFormatter, YamlFormatter};

use crate::{error::Result, models::Report, types::OutputFormat};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter for the format; color only affects the human format
    pub fn create_formatter(format: OutputFormat, enable_color: bool) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Human if enable_color => Box::new(ColoredFormatter::new()),
            OutputFormat::Human => Box::new(PlainFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::Yaml => Box::new(YamlFormatter),
        }
    }
}

/// Render `report` in `format`
pub fn format_report(report: &Report, format: OutputFormat, enable_color: bool) -> Result<String> {
    OutputFormatterFactory::create_formatter(format, enable_color).format(report)
}
