//! Command-line interface for the GDScript toolkit
//!
//! ```text
//! gdtoolkit lint <paths..>                               report lint problems
//! gdtoolkit format <paths..> [--check | --stdout]        reformat files in place
//! gdtoolkit parse <path> [--tokens] [--json] [--strict]  dump tokens or the tree
//! ```
//!
//! Exit codes: 0 on success, 1 when problems are found (or files would be
//! reformatted, or do not parse), 2 on usage and I/O errors.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod logging;
mod parallel;
mod settings;
mod sources;

use commands::format::Mode;
use error::CliError;

/// Lint, format and inspect GDScript files
#[derive(Debug, Parser)]
#[command(name = "gdtoolkit", version, about, long_about = None)]
struct Cli {
    /// Configuration file layered over the defaults (TOML, JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check files against the lint rules
    Lint {
        /// Files or directories to lint
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Reformat files
    Format {
        /// Files or directories to format
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report files that would change without writing them
        #[arg(long)]
        check: bool,

        /// Print formatted output instead of writing files
        #[arg(long, conflicts_with = "check")]
        stdout: bool,
    },

    /// Print the syntax tree (or tokens) of a file
    Parse {
        /// File to parse
        path: PathBuf,

        /// Dump the token stream instead of the tree
        #[arg(long)]
        tokens: bool,

        /// Emit JSON
        #[arg(long)]
        json: bool,

        /// Stop at the first error
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::Lint { paths } => {
            let config = settings::load(cli.config.as_deref())?;
            commands::lint::run(&paths, config).await
        }
        Command::Format {
            paths,
            check,
            stdout,
        } => {
            let config = settings::load(cli.config.as_deref())?;
            let mode = if check {
                Mode::Check
            } else if stdout {
                Mode::Stdout
            } else {
                Mode::Write
            };
            commands::format::run(&paths, config, mode).await
        }
        Command::Parse {
            path,
            tokens,
            json,
            strict,
        } => commands::parse::run(
            &path,
            commands::parse::Options {
                tokens,
                json,
                strict,
            },
        ),
    }
}
