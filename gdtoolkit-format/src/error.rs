//! Error types for formatting

use gdtoolkit_parser::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The source did not parse cleanly; nothing is formatted.
    #[error("cannot format source with {} parse error(s): {}", .diagnostics.len(), first(.diagnostics))]
    Parse { diagnostics: Vec<Diagnostic> },
}

fn first(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(|diagnostic| diagnostic.to_string())
        .unwrap_or_default()
}
