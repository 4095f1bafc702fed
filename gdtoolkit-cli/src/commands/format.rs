//! `gdtoolkit format <paths..> [--check] [--stdout]`
//!
//! Without flags, files that change are rewritten in place. `--check` only
//! reports them; `--stdout` prints every formatted file instead of writing.
//! Files that do not parse are never touched.

use crate::error::CliError;
use crate::parallel::for_each_file;
use crate::sources;
use gdtoolkit_config::ToolkitConfig;
use gdtoolkit_format::{Format, FormatOptions, GdFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    Check,
    Stdout,
}

pub async fn run(paths: &[PathBuf], config: ToolkitConfig, mode: Mode) -> Result<ExitCode, CliError> {
    let files = sources::collect(paths)?;
    let formatter = Arc::new(GdFormat::new(FormatOptions::from(&config.format)));

    let outcomes = for_each_file(files, move |path, source| {
        formatter.format(source).map_err(|error| CliError::Format {
            path: path.to_path_buf(),
            source: error,
        })
    })
    .await?;

    let mut changed = 0;
    let mut unchanged = 0;
    let mut failures = 0;
    for outcome in outcomes {
        let formatted = match outcome.result {
            Ok(formatted) => formatted,
            Err(error) => {
                eprintln!("error: {error}");
                failures += 1;
                continue;
            }
        };
        let differs = formatted != outcome.source;
        match mode {
            Mode::Stdout => print!("{formatted}"),
            Mode::Check if differs => println!("would reformat {}", outcome.path.display()),
            Mode::Write if differs => {
                std::fs::write(&outcome.path, &formatted).map_err(|source| CliError::Write {
                    path: outcome.path.clone(),
                    source,
                })?;
                println!("reformatted {}", outcome.path.display());
            }
            Mode::Check | Mode::Write => {}
        }
        if differs {
            changed += 1;
        } else {
            unchanged += 1;
        }
    }

    match mode {
        Mode::Stdout => {}
        Mode::Check => eprintln!(
            "{changed} file(s) would be reformatted, {unchanged} file(s) would be left unchanged"
        ),
        Mode::Write => {
            eprintln!("{changed} file(s) reformatted, {unchanged} file(s) left unchanged")
        }
    }

    let failed = failures > 0 || (mode == Mode::Check && changed > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
