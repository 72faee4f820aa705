use crate::config::ConfigOverrides;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pymaint")]
#[command(
    about = "Maintainability index for every Python project below a directory",
    long_about = "Scores each immediate subdirectory of PATH (default: the current \
                  directory) with the maintainability index and writes one CSV row \
                  per project that has at least one analyzable source file."
)]
#[command(version)]
pub struct Cli {
    /// Root directory whose subdirectories are scored (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// CSV report file [default: maintainability_metrics.csv]
    #[arg(short, long, env = "PYMAINT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .pymaint.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source file extension [default: py]
    #[arg(long)]
    pub extension: Option<String>,

    /// Glob pattern of source files to skip (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Round scores to this many decimals
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=15))]
    pub precision: Option<u32>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show per-project scores
    /// -vv: Show per-file failures and project totals
    /// -vvv: Show all debug information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            extension: self.extension.clone(),
            output: self.output.clone(),
            exclude: self.exclude.clone(),
            precision: self.precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["pymaint"]).unwrap();
        assert!(cli.path.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbosity, 0);
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "pymaint",
            "repos",
            "-o",
            "out.csv",
            "--extension",
            "pyw",
            "--exclude",
            "**/venv/**",
            "--exclude",
            "**/build/**",
            "--precision",
            "2",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.path, Some(PathBuf::from("repos")));
        let overrides = cli.overrides();
        assert_eq!(overrides.output, Some(PathBuf::from("out.csv")));
        assert_eq!(overrides.extension.as_deref(), Some("pyw"));
        assert_eq!(overrides.exclude.len(), 2);
        assert_eq!(overrides.precision, Some(2));
        assert_eq!(cli.verbosity, 2);
    }

    #[test]
    fn test_precision_out_of_range() {
        assert!(Cli::try_parse_from(["pymaint", "--precision", "16"]).is_err());
    }
}
