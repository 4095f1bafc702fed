//! The GDScript formatter

use crate::error::FormatError;
use crate::format::Format;
use crate::layout::{collect_comments, render};
use crate::options::FormatOptions;
use crate::serializer::Serializer;
use gdtoolkit_parser::parse;

#[derive(Debug, Clone, Default)]
pub struct GdFormat {
    options: FormatOptions,
}

impl GdFormat {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

impl Format for GdFormat {
    fn name(&self) -> &str {
        "gdscript"
    }

    fn description(&self) -> &str {
        "Canonical GDScript layout"
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        let (tree, diagnostics) = parse(source);
        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "refusing to format");
            return Err(FormatError::Parse { diagnostics });
        }
        let lines = Serializer::new(&self.options).serialize(&tree);
        let comments = collect_comments(source);
        tracing::debug!(lines = lines.len(), comments = comments.len(), "formatted");
        Ok(render(lines, comments, source, &self.options.indent_string))
    }
}
