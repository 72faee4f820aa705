use anyhow::{Context, Result};
use clap::Parser;
use pymaint::analyzers::PythonAnalyzer;
use pymaint::cli::Cli;
use pymaint::commands::{write_metrics_to_csv, ReportConfig, ReportSummary};
use pymaint::config::{load_config, load_config_from, PymaintConfig};
use pymaint::errors::Error;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let root = match &cli.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };

    let config = resolve_config(&cli, &root)?;
    let report = ReportConfig::new(&root, &config)?;
    let analyzer = PythonAnalyzer::new();

    let summary = write_metrics_to_csv(&analyzer, &report)
        .with_context(|| format!("Failed to score projects under {}", root.display()))?;
    log_summary(&summary);

    println!(
        "Maintainability metrics written to {}",
        report.output.display()
    );
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

// Explicit --config must load; a discovered file falls back to defaults.
fn resolve_config(cli: &Cli, root: &Path) -> Result<PymaintConfig> {
    let base = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(root),
    };

    let config = base.with_overrides(cli.overrides());
    let source = cli.config.as_deref().unwrap_or(root);
    config
        .validate()
        .map_err(|message| Error::configuration(source, message))?;
    Ok(config)
}

fn log_summary(summary: &ReportSummary) {
    log::info!(
        "Scanned {} projects: {} scored, {} without source files, {} unscorable",
        summary.projects_scanned,
        summary.rows_written,
        summary.projects_without_data,
        summary.projects_unscorable
    );
    log::info!(
        "Analyzed {} files, {} failed",
        summary.files_analyzed,
        summary.files_failed
    );
}
