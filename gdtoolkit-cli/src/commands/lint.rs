//! `gdtoolkit lint <paths..>`

use crate::error::CliError;
use crate::parallel::for_each_file;
use crate::sources;
use gdtoolkit_config::ToolkitConfig;
use gdtoolkit_lint::Linter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Lint every file; fails when any problem is reported or a file cannot be read.
pub async fn run(paths: &[PathBuf], config: ToolkitConfig) -> Result<ExitCode, CliError> {
    let files = sources::collect(paths)?;
    let linter = Arc::new(Linter::new(config.lint)?);
    tracing::debug!(rules = linter.rules().count(), "linting");

    let outcomes = for_each_file(files, move |path, source| Ok(linter.lint_file(path, source))).await?;

    let mut problems = 0;
    let mut failures = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(found) => {
                for problem in &found {
                    println!("{}: {}", outcome.path.display(), problem);
                }
                problems += found.len();
            }
            Err(error) => {
                eprintln!("error: {error}");
                failures += 1;
            }
        }
    }

    if problems == 0 && failures == 0 {
        println!("Success: no problems found");
        return Ok(ExitCode::SUCCESS);
    }
    if problems > 0 {
        println!("Failure: {problems} problem(s) found");
    }
    Ok(ExitCode::FAILURE)
}
