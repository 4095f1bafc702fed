//! Finding the files to work on

use crate::error::CliError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `paths` into GDScript files: files are taken as given, directories
/// are searched recursively (hidden directories skipped) in name order.
/// Duplicates are dropped, keeping the first occurrence.
pub fn collect(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if !is_gdscript(path) {
                return Err(CliError::NotGdScript(path.clone()));
            }
            if seen.insert(path.clone()) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            let walker = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));
            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_file()
                    && is_gdscript(entry.path())
                    && seen.insert(entry.path().to_path_buf())
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            return Err(CliError::Missing(path.clone()));
        }
    }

    if files.is_empty() {
        return Err(CliError::NoSources);
    }
    tracing::debug!(count = files.len(), "collected sources");
    Ok(files)
}

fn is_gdscript(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gd")
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
