use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recursive enumeration of the source files below one directory.
///
/// Hidden files and ignore files get no special treatment: every file whose
/// name ends in `.<extension>` is yielded, in file-name order within each
/// directory.
pub struct FileWalker {
    root: PathBuf,
    extension: String,
    ignore_patterns: Vec<Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extension: crate::config::DEFAULT_EXTENSION.to_string(),
            ignore_patterns: vec![],
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

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source files below the root. Entries that cannot be read are yielded
    /// as errors so the caller can report them and carry on.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if self.should_process(&entry) => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
    }

    fn should_process(&self, entry: &DirEntry) -> bool {
        if !is_file(entry) {
            return false;
        }

        let suffix = format!(".{}", self.extension);
        if !entry.file_name().to_string_lossy().ends_with(&suffix) {
            return false;
        }

        let path_str = entry.path().to_string_lossy();
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches(&path_str))
    }
}

/// Regular files, and symlinks that resolve to one.
fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
