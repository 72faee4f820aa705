pub mod csv_writer;
pub mod walker;

pub use csv_writer::CsvWriter;
pub use walker::FileWalker;

use std::fs;
use std::path::{Path, PathBuf};

/// Immediate subdirectories of `root`, in directory-listing order.
///
/// Symlinks to directories count as directories.
pub fn list_subdirectories(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut directories = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            directories.push(path);
        }
    }
    Ok(directories)
}
