//! Maintainability index.
//!
//! ```text
//! MI = 171 - 5.2 * ln(V) - 0.23 * G - 16.2 * ln(LOC)
//! ```
//!
//! where `V` is the Halstead volume, `G` the cyclomatic complexity and `LOC`
//! the line count, all summed over a project. The result is clamped to
//! `[0, 100]`.

use thiserror::Error;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

const BASE: f64 = 171.0;
const VOLUME_WEIGHT: f64 = 5.2;
const COMPLEXITY_WEIGHT: f64 = 0.23;
const LOC_WEIGHT: f64 = 16.2;

/// The inputs lie outside the domain of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreError {
    #[error("Halstead volume must be positive, got {0}")]
    NonPositiveVolume(f64),
    #[error("line count must be positive")]
    NonPositiveLoc,
}

/// The formula without clamping or domain checks.
pub fn raw_maintainability_index(complexity: f64, volume: f64, loc: f64) -> f64 {
    BASE - VOLUME_WEIGHT * volume.ln() - COMPLEXITY_WEIGHT * complexity - LOC_WEIGHT * loc.ln()
}

/// Clamped maintainability index. `volume` and `loc` must be positive.
pub fn calculate_maintainability_index(
    complexity: u64,
    volume: f64,
    loc: u64,
) -> Result<f64, ScoreError> {
    // also rejects NaN
    if !(volume > 0.0) {
        return Err(ScoreError::NonPositiveVolume(volume));
    }
    if loc == 0 {
        return Err(ScoreError::NonPositiveLoc);
    }

    let score = raw_maintainability_index(complexity as f64, volume, loc as f64);
    Ok(score.clamp(MIN_SCORE, MAX_SCORE))
}

/// Round to `decimals` places; `None` leaves the score untouched.
pub fn round_score(score: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(decimals) => {
            let factor = 10f64.powi(decimals as i32);
            (score * factor).round() / factor
        }
        None => score,
    }
}
