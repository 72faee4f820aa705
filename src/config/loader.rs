use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::{PymaintConfig, CONFIG_FILE_NAME};
use crate::errors::Error;

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<PymaintConfig, String> {
    let config = toml::from_str::<PymaintConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?
        .normalized();
    config.validate()?;
    Ok(config)
}

/// Load a discovered config file. Missing files are silent, broken ones warn.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<PymaintConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, nearest first, at most `max_depth` of them
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.pymaint.toml` at or above `start`, or use defaults.
pub fn load_config(start: &Path) -> PymaintConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PymaintConfig::default()
        })
}

/// Load an explicitly requested config file; any failure is an error.
pub fn load_config_from(path: &Path) -> Result<PymaintConfig, Error> {
    let contents =
        read_config_file(path).map_err(|e| Error::configuration(path, e.to_string()))?;
    parse_and_validate_config(&contents).map_err(|message| Error::configuration(path, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            extension = ".py"
            output = "reports/mi.csv"
            exclude = ["**/venv/**", "**/migrations/**"]
            precision = 3
        "#})
        .unwrap();

        assert_eq!(config.extension, "py");
        assert_eq!(config.output, PathBuf::from("reports/mi.csv"));
        assert_eq!(config.exclude.len(), 2);
        assert_eq!(config.precision, Some(3));
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_and_validate_config("precision = 1\n").unwrap();
        assert_eq!(
            config,
            PymaintConfig {
                precision: Some(1),
                ..PymaintConfig::default()
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = parse_and_validate_config("extensions = [\"py\"]\n").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_directory_ancestors_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_load_config_finds_parent_file() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("projects/one");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "extension = \"pyw\"\n").unwrap();

        assert_eq!(load_config(&nested).extension, "pyw");
    }

    #[test]
    fn test_load_config_ignores_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "precision = \"high\"\n").unwrap();

        assert_eq!(load_config(temp_dir.path()), PymaintConfig::default());
    }

    #[test]
    fn test_load_config_from_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(matches!(
            load_config_from(&missing),
            Err(Error::Configuration { .. })
        ));
    }
}
