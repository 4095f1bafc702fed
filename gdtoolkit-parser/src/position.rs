//! Source positions
//!
//! Every token and AST node carries a [`Position`]: a 1-based line and column
//! plus the byte offset it was taken from. Columns count characters, not
//! bytes, so multi-byte identifiers and strings report the column an editor
//! would show.
//!
//! [`SourceLocation`] converts byte offsets into positions with a binary search
//! over the line-start table, which keeps the lexer free of line bookkeeping.

use serde::Serialize;
use std::fmt;

/// A line:column position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The first character of a file.
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation<'src> {
    source: &'src str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'src> SourceLocation<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to it.
    pub fn position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);
        Position::new(line + 1, column + 1, offset)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Render a few lines around `position`, marking the offending line with `>>`.
pub fn format_source_context(source: &str, position: &Position) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = position.line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
        if line_num == error_line {
            let pad = " ".repeat(position.column.saturating_sub(1));
            context.push_str(&format!("       | {}^\n", pad));
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offset_is_line_one_column_one() {
        let loc = SourceLocation::new("var x\n");
        assert_eq!(loc.position(0), Position::new(1, 1, 0));
    }

    #[test]
    fn test_offsets_after_newline() {
        let loc = SourceLocation::new("a\nbc\nd");
        assert_eq!(loc.position(2), Position::new(2, 1, 2));
        assert_eq!(loc.position(3), Position::new(2, 2, 3));
        assert_eq!(loc.position(5), Position::new(3, 1, 5));
        assert_eq!(loc.line_count(), 3);
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "var ñame = 1";
        let loc = SourceLocation::new(source);
        let offset = source.find('=').unwrap();
        assert_eq!(loc.position(offset).column, 10);
    }

    #[test]
    fn test_offsets_past_end_clamp() {
        let loc = SourceLocation::new("ab");
        assert_eq!(loc.position(99), Position::new(1, 3, 2));
    }

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let context = format_source_context(source, &Position::new(4, 3, 23));

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
        assert!(context.contains("|   ^"));
    }
}
