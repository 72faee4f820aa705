//! Run configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional `.pymaint.toml`, and command-line flags.

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
};

use glob::Pattern;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_EXTENSION: &str = "py";
pub const DEFAULT_OUTPUT: &str = "maintainability_metrics.csv";
pub const CONFIG_FILE_NAME: &str = ".pymaint.toml";

/// Largest accepted `precision`; f64 carries about 15 significant digits.
pub const MAX_PRECISION: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PymaintConfig {
    /// Source file extension, without the leading dot
    pub extension: String,
    /// CSV report path, relative to the working directory
    pub output: PathBuf,
    /// Glob patterns of source files to skip
    pub exclude: Vec<String>,
    /// Round scores to this many decimals; full precision when unset
    pub precision: Option<u32>,
}

impl Default for PymaintConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            exclude: Vec::new(),
            precision: None,
        }
    }
}

/// Command-line values that override the file configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub extension: Option<String>,
    pub output: Option<PathBuf>,
    /// Appended to the configured patterns
    pub exclude: Vec<String>,
    pub precision: Option<u32>,
}

impl PymaintConfig {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(extension) = overrides.extension {
            self.extension = extension;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        self.exclude.extend(overrides.exclude);
        if overrides.precision.is_some() {
            self.precision = overrides.precision;
        }
        self.normalized()
    }

    /// Accept `.py` as well as `py`.
    pub fn normalized(mut self) -> Self {
        self.extension = self.extension.trim().trim_start_matches('.').to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.extension.is_empty() {
            return Err("extension must not be empty".to_string());
        }
        if self.extension.contains(['/', '\\']) {
            return Err(format!(
                "extension must not contain a path separator: {}",
                self.extension
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err("output must not be empty".to_string());
        }
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                return Err(format!(
                    "precision must be at most {MAX_PRECISION}, got {precision}"
                ));
            }
        }
        Ok(())
    }

    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>, glob::PatternError> {
        self.exclude.iter().map(|p| Pattern::new(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PymaintConfig::default();
        assert_eq!(config.extension, "py");
        assert_eq!(config.output, PathBuf::from("maintainability_metrics.csv"));
        assert!(config.exclude.is_empty());
        assert_eq!(config.precision, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_win_and_excludes_accumulate() {
        let config = PymaintConfig {
            exclude: vec!["**/build/**".to_string()],
            precision: Some(2),
            ..PymaintConfig::default()
        };
        let merged = config.with_overrides(ConfigOverrides {
            extension: Some(".pyw".to_string()),
            output: Some(PathBuf::from("out.csv")),
            exclude: vec!["**/venv/**".to_string()],
            precision: None,
        });

        assert_eq!(merged.extension, "pyw");
        assert_eq!(merged.output, PathBuf::from("out.csv"));
        assert_eq!(merged.exclude, vec!["**/build/**", "**/venv/**"]);
        assert_eq!(merged.precision, Some(2));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let empty = PymaintConfig {
            extension: String::new(),
            ..PymaintConfig::default()
        };
        assert!(empty.validate().is_err());

        let separator = PymaintConfig {
            extension: "py/x".to_string(),
            ..PymaintConfig::default()
        };
        assert!(separator.validate().is_err());

        let precise = PymaintConfig {
            precision: Some(16),
            ..PymaintConfig::default()
        };
        assert!(precise.validate().is_err());
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let config = PymaintConfig {
            exclude: vec!["[".to_string()],
            ..PymaintConfig::default()
        };
        assert!(config.exclude_patterns().is_err());
    }
}
