//! Format trait definition

use crate::error::FormatError;

/// A source-to-source formatter.
pub trait Format: Send + Sync {
    /// The name of this format (e.g. "gdscript")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Reformat `source`, or explain why it cannot be.
    fn format(&self, source: &str) -> Result<String, FormatError>;

    /// Whether `source` is already formatted.
    fn check(&self, source: &str) -> Result<bool, FormatError> {
        Ok(self.format(source)? == source)
    }
}
