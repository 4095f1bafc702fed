//! Output settings

use gdtoolkit_config::FormatConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// One level of indentation.
    pub indent_string: String,
    /// Columns one level occupies when measuring line length.
    pub indent_width: usize,
    /// Function headers longer than this are split one parameter per line.
    pub max_line_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_string: "\t".to_string(),
            indent_width: 4,
            max_line_length: 100,
        }
    }
}

impl From<&FormatConfig> for FormatOptions {
    fn from(config: &FormatConfig) -> Self {
        Self {
            indent_string: config.indent_string(),
            indent_width: config.indent_width,
            max_line_length: config.max_line_length,
        }
    }
}
