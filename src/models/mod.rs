//! Data models and structures for the load generator

pub mod config;
pub mod report;
pub mod request;

// Re-export main model types
pub use config::LoadConfig;
pub use report::{Report, ReportSummary};
pub use request::{Headers, RequestSpec};
