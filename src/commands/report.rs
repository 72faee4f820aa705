//! Maintainability report over the subprojects of a root directory.
//!
//! Each immediate subdirectory of the root is one project. A project with at
//! least one analyzable file gets one CSV row, in directory-listing order;
//! a project without any gets none.

use crate::analyzers::SourceAnalyzer;
use crate::config::PymaintConfig;
use crate::errors::{Error, Result};
use crate::io::{list_subdirectories, CsvWriter};
use crate::metrics::{ProjectAggregator, ProjectOutcome};
use crate::scoring::{round_score, MaintainabilityRecord};
use glob::Pattern;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything a report run needs, resolved from configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub extension: String,
    pub exclude: Vec<Pattern>,
    pub precision: Option<u32>,
}

impl ReportConfig {
    pub fn new(root: impl Into<PathBuf>, config: &PymaintConfig) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            output: config.output.clone(),
            extension: config.extension.clone(),
            exclude: config.exclude_patterns()?,
            precision: config.precision,
        })
    }
}

/// Counts from one report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub projects_scanned: usize,
    pub rows_written: usize,
    /// Projects without a single analyzable file
    pub projects_without_data: usize,
    /// Projects with files but a zero Halstead volume or line count
    pub projects_unscorable: usize,
    pub files_analyzed: usize,
    pub files_failed: usize,
}

/// Create (or overwrite) `config.output` and write the report into it.
pub fn write_metrics_to_csv<A: SourceAnalyzer + ?Sized>(
    analyzer: &A,
    config: &ReportConfig,
) -> Result<ReportSummary> {
    let file = File::create(&config.output).map_err(|source| Error::WriteReport {
        path: config.output.clone(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    let summary = write_metrics(analyzer, config, &mut writer)?;
    writer.flush().map_err(|source| Error::WriteReport {
        path: config.output.clone(),
        source,
    })?;

    Ok(summary)
}

/// Write the report for `config.root` to any writer.
pub fn write_metrics<A: SourceAnalyzer + ?Sized, W: Write>(
    analyzer: &A,
    config: &ReportConfig,
    writer: W,
) -> Result<ReportSummary> {
    let write_error = |source| Error::WriteReport {
        path: config.output.clone(),
        source,
    };

    let mut csv = CsvWriter::new(writer);
    csv.write_header().map_err(write_error)?;

    let projects = list_subdirectories(&config.root).map_err(|source| Error::ListDirectory {
        path: config.root.clone(),
        source,
    })?;

    let aggregator = ProjectAggregator::new(analyzer)
        .with_extension(config.extension.as_str())
        .with_ignore_patterns(config.exclude.clone());

    let mut summary = ReportSummary::default();
    for project_dir in projects {
        summary.projects_scanned += 1;
        let name = project_name(&project_dir);

        let scan = aggregator.aggregate(&project_dir);
        for failure in &scan.failures {
            println!(
                "Error processing file {}: {}",
                failure.path.display(),
                failure.error
            );
        }
        summary.files_failed += scan.failures.len();
        summary.files_analyzed += scan.totals.files;

        let metrics = match scan.outcome() {
            ProjectOutcome::NoData => {
                log::debug!("{name}: no analyzable .{} files", config.extension);
                summary.projects_without_data += 1;
                continue;
            }
            ProjectOutcome::Measured(metrics) => metrics,
        };

        match metrics.maintainability_index() {
            Ok(score) => {
                let record = MaintainabilityRecord::new(name, round_score(score, config.precision));
                log::info!("{}: {}", record.project, record.score);
                csv.write_record(&record).map_err(write_error)?;
                summary.rows_written += 1;
            }
            Err(e) => {
                log::warn!("Skipping project {name}: {e}");
                summary.projects_unscorable += 1;
            }
        }
    }

    csv.flush().map_err(write_error)?;
    Ok(summary)
}

fn project_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
