// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod errors;
pub mod io;
pub mod metrics;
pub mod scoring;

// Re-export commonly used types
pub use crate::analyzers::{FileMeasures, PythonAnalyzer, SourceAnalyzer};

pub use crate::commands::{write_metrics, write_metrics_to_csv, ReportConfig, ReportSummary};

pub use crate::complexity::{BlockKind, ComplexityBlock, HalsteadCounts};

pub use crate::config::{ConfigOverrides, PymaintConfig};

pub use crate::errors::{AnalysisError, Error, FileError, Result};

pub use crate::metrics::{ProjectAggregator, ProjectMetrics, ProjectOutcome, ProjectScan};

pub use crate::scoring::{calculate_maintainability_index, MaintainabilityRecord, ScoreError};
