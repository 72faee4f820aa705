//! Error types for pymaint.
//!
//! Two tiers, matching how failures are handled:
//!
//! - [`FileError`]: a single source file could not be read or analyzed. These
//!   are reported and the file is skipped; they never abort a run.
//! - [`Error`]: anything that stops the run (root not listable, output not
//!   writable, bad configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one of the source analyses on a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The source does not parse. Line and column are 1-based.
    #[error("invalid syntax (line {line}, column {column})")]
    Syntax { line: usize, column: usize },

    /// The source nests deeper than the analyzers walk.
    #[error("maximum nesting depth exceeded (line {line}, limit {limit})")]
    TooDeep { line: usize, limit: usize },

    /// The tree-sitter grammar could not be loaded or produced no tree.
    #[error("parser failure: {0}")]
    Parser(String),
}

impl AnalysisError {
    pub fn syntax(line: usize, column: usize) -> Self {
        Self::Syntax { line, column }
    }

    pub fn too_deep(line: usize, limit: usize) -> Self {
        Self::TooDeep { line, limit }
    }

    pub fn parser(message: impl Into<String>) -> Self {
        Self::Parser(message.into())
    }
}

/// Per-file failure. Displayed without the path; callers prefix it.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),
}

/// Fatal errors for a report run.
#[derive(Debug, Error)]
pub enum Error {
    /// The root directory could not be listed
    #[error("Failed to list directory {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written
    #[error("Failed to write report {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error in {}: {message}", path.display())]
    Configuration { path: PathBuf, message: String },

    /// Invalid exclude pattern
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        let err = AnalysisError::syntax(3, 7);
        assert_eq!(err.to_string(), "invalid syntax (line 3, column 7)");
    }

    #[test]
    fn test_too_deep_message() {
        let err = AnalysisError::too_deep(1, 1000);
        assert_eq!(
            err.to_string(),
            "maximum nesting depth exceeded (line 1, limit 1000)"
        );
    }

    #[test]
    fn test_file_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = FileError::from(io);
        assert_eq!(err.to_string(), "No such file or directory");

        let err = FileError::from(AnalysisError::parser("no tree"));
        assert_eq!(err.to_string(), "parser failure: no tree");
    }

    #[test]
    fn test_configuration_error_names_file() {
        let err = Error::configuration("/tmp/.pymaint.toml", "expected a string");
        assert_eq!(
            err.to_string(),
            "Configuration error in /tmp/.pymaint.toml: expected a string"
        );
    }
}
