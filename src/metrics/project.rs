//! Per-project aggregation of complexity, Halstead volume and line count.

use crate::analyzers::{FileMeasures, SourceAnalyzer};
use crate::errors::FileError;
use crate::io::walker::FileWalker;
use crate::scoring::{calculate_maintainability_index, ScoreError};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Totals over every analyzable file of one project.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectMetrics {
    pub complexity: u64,
    pub volume: f64,
    pub loc: u64,
    /// Files that contributed to the totals
    pub files: usize,
}

impl ProjectMetrics {
    pub fn add(&mut self, measures: &FileMeasures) {
        self.complexity += measures.complexity;
        self.volume += measures.volume;
        self.loc += measures.loc;
        self.files += 1;
    }

    pub fn maintainability_index(&self) -> Result<f64, ScoreError> {
        calculate_maintainability_index(self.complexity, self.volume, self.loc)
    }
}

/// Whether a project produced anything to score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectOutcome {
    /// No file could be analyzed; the project gets no record.
    NoData,
    Measured(ProjectMetrics),
}

/// A file left out of the totals, and why.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: FileError,
}

/// Result of walking one project directory.
#[derive(Debug, Default)]
pub struct ProjectScan {
    pub totals: ProjectMetrics,
    pub failures: Vec<FileFailure>,
}

impl ProjectScan {
    pub fn outcome(&self) -> ProjectOutcome {
        if self.totals.files == 0 {
            ProjectOutcome::NoData
        } else {
            ProjectOutcome::Measured(self.totals)
        }
    }
}

/// Sums the measures of every source file below a project directory.
pub struct ProjectAggregator<'a, A: SourceAnalyzer + ?Sized> {
    analyzer: &'a A,
    extension: String,
    ignore_patterns: Vec<Pattern>,
}

impl<'a, A: SourceAnalyzer + ?Sized> ProjectAggregator<'a, A> {
    pub fn new(analyzer: &'a A) -> Self {
        Self {
            analyzer,
            extension: crate::config::DEFAULT_EXTENSION.to_string(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Walk `directory` and total every file that reads and analyzes
    /// cleanly. Failing files are collected, never fatal.
    pub fn aggregate(&self, directory: &Path) -> ProjectScan {
        let walker = FileWalker::new(directory.to_path_buf())
            .with_extension(self.extension.as_str())
            .with_ignore_patterns(self.ignore_patterns.clone());

        let mut scan = ProjectScan::default();
        for entry in walker.walk() {
            let result = match entry {
                Ok(path) => self.measure_file(&path).map_err(|error| (path, error)),
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| directory.to_path_buf(), Path::to_path_buf);
                    Err((path, FileError::from(e)))
                }
            };

            match result {
                Ok(measures) => scan.totals.add(&measures),
                Err((path, error)) => {
                    log::debug!("Skipping {}: {:?}", path.display(), error);
                    scan.failures.push(FileFailure { path, error });
                }
            }
        }

        log::debug!(
            "{}: {} files, complexity {}, volume {:.2}, {} lines",
            directory.display(),
            scan.totals.files,
            scan.totals.complexity,
            scan.totals.volume,
            scan.totals.loc
        );
        scan
    }

    fn measure_file(&self, path: &Path) -> Result<FileMeasures, FileError> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.analyzer.measure(&source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::{BlockKind, ComplexityBlock};
    use crate::errors::AnalysisError;
    use std::fs;
    use tempfile::TempDir;

    /// Complexity 2, volume 10.0, loc 5 for any source not containing "boom".
    struct StubAnalyzer;

    impl SourceAnalyzer for StubAnalyzer {
        fn complexity_of(&self, source: &str) -> Result<Vec<ComplexityBlock>, AnalysisError> {
            if source.contains("boom") {
                return Err(AnalysisError::syntax(1, 1));
            }
            Ok(vec![ComplexityBlock::new("f", BlockKind::Function, 1, 2)])
        }

        fn volume_of(&self, _source: &str) -> Result<f64, AnalysisError> {
            Ok(10.0)
        }

        fn loc_of(&self, _source: &str) -> Result<u64, AnalysisError> {
            Ok(5)
        }
    }

    #[test]
    fn test_totals_accumulate_across_subtree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("a.py"), "x").unwrap();
        fs::write(root.join("pkg/b.py"), "y").unwrap();
        fs::write(root.join("README.md"), "boom").unwrap();

        let scan = ProjectAggregator::new(&StubAnalyzer).aggregate(root);
        assert!(scan.failures.is_empty());
        assert_eq!(
            scan.outcome(),
            ProjectOutcome::Measured(ProjectMetrics {
                complexity: 4,
                volume: 20.0,
                loc: 10,
                files: 2,
            })
        );
    }

    #[test]
    fn test_failing_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("good.py"), "x").unwrap();
        fs::write(root.join("bad.py"), "boom").unwrap();

        let scan = ProjectAggregator::new(&StubAnalyzer).aggregate(root);
        assert_eq!(scan.totals.files, 1);
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].path, root.join("bad.py"));
        assert_eq!(
            scan.failures[0].error.to_string(),
            "invalid syntax (line 1, column 1)"
        );
    }

    #[test]
    fn test_only_failing_files_is_no_data() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bad.py"), "boom").unwrap();

        let scan = ProjectAggregator::new(&StubAnalyzer).aggregate(temp_dir.path());
        assert_eq!(scan.outcome(), ProjectOutcome::NoData);
    }

    #[test]
    fn test_non_utf8_file_is_a_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("latin1.py"), [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let scan = ProjectAggregator::new(&StubAnalyzer).aggregate(temp_dir.path());
        assert_eq!(scan.outcome(), ProjectOutcome::NoData);
        assert!(matches!(scan.failures[0].error, FileError::Read(_)));
    }

    #[test]
    fn test_empty_directory_is_no_data() {
        let temp_dir = TempDir::new().unwrap();
        let scan = ProjectAggregator::new(&StubAnalyzer).aggregate(temp_dir.path());
        assert_eq!(scan.outcome(), ProjectOutcome::NoData);
        assert!(scan.failures.is_empty());
    }

    #[test]
    fn test_project_metrics_score() {
        let metrics = ProjectMetrics {
            complexity: 1,
            volume: 1.0,
            loc: 1,
            files: 1,
        };
        assert_eq!(metrics.maintainability_index(), Ok(100.0));

        let degenerate = ProjectMetrics {
            volume: 0.0,
            ..metrics
        };
        assert!(degenerate.maintainability_index().is_err());
    }
}
