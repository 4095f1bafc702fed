//! Errors that end a command early

use gdtoolkit_config::ConfigLoadError;
use gdtoolkit_format::FormatError;
use gdtoolkit_lint::LintError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("path '{}' does not exist", .0.display())]
    Missing(PathBuf),

    #[error("'{}' is not a GDScript (.gd) file", .0.display())]
    NotGdScript(PathBuf),

    #[error("no .gd files found")]
    NoSources,

    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot format '{}': {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error(transparent)]
    Lint(#[from] LintError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
