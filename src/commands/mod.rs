//! Command implementations.
//!
//! - **report**: score every immediate subproject of a root directory and
//!   write the CSV report

pub mod report;

pub use report::{write_metrics, write_metrics_to_csv, ReportConfig, ReportSummary};
