//! Configuration for a run
//!
//! Built-in defaults, then the nearest lint rc file above the working
//! directory, then the file given with `--config`.

use crate::error::CliError;
use gdtoolkit_config::{find_lintrc, Loader, ToolkitConfig};
use std::path::Path;

pub fn load(explicit: Option<&Path>) -> Result<ToolkitConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(lintrc) = std::env::current_dir().ok().and_then(find_lintrc) {
        tracing::info!(path = %lintrc.display(), "using lint rc");
        loader = loader.with_lintrc(&lintrc)?;
    }
    if let Some(path) = explicit {
        tracing::info!(path = %path.display(), "using configuration file");
        loader = loader.with_file(path);
    }
    Ok(loader.build()?)
}
