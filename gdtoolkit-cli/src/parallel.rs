//! Per-file work on the blocking pool
//!
//! Every file is read and processed in its own `spawn_blocking` task; the
//! results are handed back in the order the files were given, whatever order
//! the tasks finish in.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct FileOutcome<T> {
    pub path: PathBuf,
    pub source: String,
    pub result: Result<T, CliError>,
}

pub async fn for_each_file<T, F>(files: Vec<PathBuf>, work: F) -> Result<Vec<FileOutcome<T>>, CliError>
where
    T: Send + 'static,
    F: Fn(&Path, &str) -> Result<T, CliError> + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let work = Arc::clone(&work);
        tasks.spawn_blocking(move || {
            let outcome = match std::fs::read_to_string(&path) {
                Ok(source) => {
                    let result = work(&path, &source);
                    FileOutcome {
                        path,
                        source,
                        result,
                    }
                }
                Err(error) => FileOutcome {
                    result: Err(CliError::Read {
                        path: path.clone(),
                        source: error,
                    }),
                    path,
                    source: String::new(),
                },
            };
            (index, outcome)
        });
    }

    let mut finished = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        finished.push(joined?);
    }
    finished.sort_by_key(|(index, _)| *index);
    Ok(finished.into_iter().map(|(_, outcome)| outcome).collect())
}
