pub mod maintainability;

pub use maintainability::{
    calculate_maintainability_index, raw_maintainability_index, round_score, ScoreError,
    MAX_SCORE, MIN_SCORE,
};

/// One row of the report: a project and its maintainability index.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintainabilityRecord {
    pub project: String,
    pub score: f64,
}

impl MaintainabilityRecord {
    pub fn new(project: impl Into<String>, score: f64) -> Self {
        Self {
            project: project.into(),
            score,
        }
    }
}
