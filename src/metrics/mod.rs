//! Metrics calculation module
//!
//! Line counting for single files and the per-project aggregation of the
//! three maintainability inputs.

pub mod loc_counter;
pub mod project;

pub use loc_counter::{LocCount, LocCounter};
pub use project::{FileFailure, ProjectAggregator, ProjectMetrics, ProjectOutcome, ProjectScan};
