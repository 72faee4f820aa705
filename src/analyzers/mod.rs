//! Source analyzers.
//!
//! A [`SourceAnalyzer`] turns the text of one source file into the three
//! measures the maintainability index needs. Each capability is a pure
//! function of the text, so the aggregator can be driven by a stub in tests.

use crate::complexity::ComplexityBlock;
use crate::errors::AnalysisError;

pub mod python;

pub use python::PythonAnalyzer;

pub trait SourceAnalyzer: Send + Sync {
    /// Complexity of every block (function, method, class) in the source.
    fn complexity_of(&self, source: &str) -> Result<Vec<ComplexityBlock>, AnalysisError>;

    /// Aggregate Halstead volume of the whole source.
    fn volume_of(&self, source: &str) -> Result<f64, AnalysisError>;

    /// Raw line count of the source.
    fn loc_of(&self, source: &str) -> Result<u64, AnalysisError>;

    /// Run all three analyses. Fails if any of them fails.
    fn measure(&self, source: &str) -> Result<FileMeasures, AnalysisError> {
        let complexity = self
            .complexity_of(source)?
            .iter()
            .map(|block| u64::from(block.complexity))
            .sum();
        let volume = self.volume_of(source)?;
        let loc = self.loc_of(source)?;

        Ok(FileMeasures {
            complexity,
            volume,
            loc,
        })
    }
}

/// The three scalar measures of one file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FileMeasures {
    pub complexity: u64,
    pub volume: f64,
    pub loc: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::BlockKind;

    struct FixedAnalyzer;

    impl SourceAnalyzer for FixedAnalyzer {
        fn complexity_of(&self, _source: &str) -> Result<Vec<ComplexityBlock>, AnalysisError> {
            Ok(vec![
                ComplexityBlock::new("a", BlockKind::Function, 1, 3),
                ComplexityBlock::new("b", BlockKind::Function, 5, 2),
            ])
        }

        fn volume_of(&self, _source: &str) -> Result<f64, AnalysisError> {
            Ok(12.5)
        }

        fn loc_of(&self, source: &str) -> Result<u64, AnalysisError> {
            if source.is_empty() {
                Err(AnalysisError::parser("empty"))
            } else {
                Ok(7)
            }
        }
    }

    #[test]
    fn test_measure_sums_block_complexity() {
        let measures = FixedAnalyzer.measure("x").unwrap();
        assert_eq!(
            measures,
            FileMeasures {
                complexity: 5,
                volume: 12.5,
                loc: 7
            }
        );
    }

    #[test]
    fn test_measure_fails_when_any_analysis_fails() {
        assert!(FixedAnalyzer.measure("").is_err());
    }
}
