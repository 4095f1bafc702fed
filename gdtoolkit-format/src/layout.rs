//! Line layout: blank lines and comments
//!
//! The serializer produces [`Line`]s that remember which source line they came
//! from. [`render`] turns them into text:
//!
//! - an *inline* comment (code before it on its line) is appended, two spaces
//!   out, to the last printed line whose source line is at or before its own;
//! - a *standalone* comment is printed right before the first line whose
//!   source line is after it, at that line's depth, or at the end of the file;
//! - a statement keeps at most one blank line from the source above it, and
//!   gets at least its structural spacing (two blank lines around top-level
//!   functions, for instance). The structural spacing goes above any comments
//!   that lead into the statement.

use gdtoolkit_parser::{tokenize, TokenKind};

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
    /// `None` for lines the formatter made up, like the closing `):` of a
    /// split function header.
    pub source_line: Option<usize>,
    pub spacing: Spacing,
}

/// Blank lines wanted above a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    /// Printed regardless of the source.
    pub min_blanks: usize,
    /// Keep a blank line found above it in the source.
    pub keep_blank: bool,
}

impl Spacing {
    pub fn between(min_blanks: usize) -> Self {
        Self {
            min_blanks,
            keep_blank: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub standalone: bool,
}

/// Every comment in `source`, in order.
pub fn collect_comments(source: &str) -> Vec<Comment> {
    tokenize(source)
        .into_iter()
        .filter(|token| token.kind == TokenKind::Comment)
        .map(|token| {
            let line_start = source[..token.offset].rfind('\n').map_or(0, |i| i + 1);
            Comment {
                line: token.line,
                column: token.column,
                text: token.literal.trim_end().to_string(),
                standalone: source[line_start..token.offset].trim().is_empty(),
            }
        })
        .collect()
}

/// Accumulates output text, tracking how many newlines end it.
struct Writer<'a> {
    indent_string: &'a str,
    output: String,
    consecutive_newlines: usize,
}

impl<'a> Writer<'a> {
    fn new(indent_string: &'a str) -> Self {
        Self {
            indent_string,
            output: String::new(),
            // nothing goes above the first line
            consecutive_newlines: usize::MAX,
        }
    }

    fn write_line(&mut self, depth: usize, text: &str) {
        self.output.push_str(&self.indent_string.repeat(depth));
        self.output.push_str(text);
        self.output.push('\n');
        self.consecutive_newlines = 1;
    }

    fn ensure_blank_lines(&mut self, count: usize) {
        let target_newlines = count + 1;
        while self.consecutive_newlines < target_newlines {
            self.output.push('\n');
            self.consecutive_newlines += 1;
        }
    }
}

/// Source lines with a blank line right above them.
struct BlankLines<'a> {
    lines: Vec<&'a str>,
}

impl BlankLines<'_> {
    fn above(&self, line: usize) -> usize {
        let blank = line >= 2
            && self
                .lines
                .get(line - 2)
                .is_some_and(|text| text.trim().is_empty());
        usize::from(blank)
    }
}

pub fn render(mut lines: Vec<Line>, comments: Vec<Comment>, source: &str, indent_string: &str) -> String {
    let (standalone, inline): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(|comment| comment.standalone);

    let mut orphans = Vec::new();
    for comment in inline {
        match attach_target(&lines, comment.line) {
            Some(index) => {
                lines[index].text.push_str("  ");
                lines[index].text.push_str(&comment.text);
            }
            None => orphans.push(comment),
        }
    }
    let mut standalone: Vec<Comment> = standalone.into_iter().chain(orphans).collect();
    standalone.sort_by_key(|comment| comment.line);

    let blanks = BlankLines {
        lines: source.lines().collect(),
    };
    let mut writer = Writer::new(indent_string);
    let mut pending = standalone.into_iter().peekable();
    let mut last_depth = 0;

    for line in &lines {
        last_depth = line.depth;
        let Some(source_line) = line.source_line else {
            writer.ensure_blank_lines(line.spacing.min_blanks);
            writer.write_line(line.depth, &line.text);
            continue;
        };

        let mut leading = true;
        let lead_blanks = |own_line: usize| {
            let from_source = if line.spacing.keep_blank {
                blanks.above(own_line)
            } else {
                0
            };
            line.spacing.min_blanks.max(from_source)
        };
        while let Some(comment) = pending.next_if(|comment| comment.line < source_line) {
            let count = if leading {
                lead_blanks(comment.line)
            } else {
                blanks.above(comment.line)
            };
            writer.ensure_blank_lines(count);
            writer.write_line(line.depth, &comment.text);
            leading = false;
        }
        let count = if leading {
            lead_blanks(source_line)
        } else {
            blanks.above(source_line)
        };
        writer.ensure_blank_lines(count);
        writer.write_line(line.depth, &line.text);
    }

    for comment in pending {
        let depth = if comment.column > 1 { last_depth } else { 0 };
        writer.ensure_blank_lines(blanks.above(comment.line));
        writer.write_line(depth, &comment.text);
    }
    writer.output
}

/// The last line printed from source line `line` or the closest one before it.
fn attach_target(lines: &[Line], line: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, printed)| {
            printed
                .source_line
                .filter(|source_line| *source_line <= line)
                .map(|source_line| (source_line, index))
        })
        .max()
        .map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(depth: usize, text: &str, source_line: usize, spacing: Spacing) -> Line {
        Line {
            depth,
            text: text.to_string(),
            source_line: Some(source_line),
            spacing,
        }
    }

    #[test]
    fn test_collect_comments_classifies_position() {
        let comments = collect_comments("# head\nvar a = 1 # tail \n\t# nested\n");
        let summary: Vec<_> = comments
            .iter()
            .map(|c| (c.line, c.text.as_str(), c.standalone))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "# head", true),
                (2, "# tail", false),
                (3, "# nested", true)
            ]
        );
    }

    #[test]
    fn test_structural_spacing_goes_above_leading_comments() {
        let source = "var a\n# about f\nfunc f():\n\tpass\n";
        let lines = vec![
            line(0, "var a", 1, Spacing::default()),
            line(0, "func f():", 3, Spacing::between(2)),
            line(1, "pass", 4, Spacing::default()),
        ];
        let output = render(lines, collect_comments(source), source, "\t");
        assert_eq!(output, "var a\n\n\n# about f\nfunc f():\n\tpass\n");
    }

    #[test]
    fn test_source_blank_lines_are_capped_at_one() {
        let source = "a()\n\n\n\nb()\n";
        let lines = vec![
            line(0, "a()", 1, Spacing::default()),
            line(0, "b()", 5, Spacing::between(0)),
        ];
        assert_eq!(render(lines, Vec::new(), source, "\t"), "a()\n\nb()\n");
    }

    #[test]
    fn test_trailing_comments_follow_the_last_line() {
        let source = "func f():\n\tpass\n\n\t# end\n";
        let lines = vec![
            line(0, "func f():", 1, Spacing::default()),
            line(1, "pass", 2, Spacing::default()),
        ];
        let output = render(lines, collect_comments(source), source, "    ");
        assert_eq!(output, "func f():\n    pass\n\n    # end\n");
    }

    #[test]
    fn test_inline_comments_attach_to_the_closest_earlier_line() {
        let source = "var d = {\n\t\"a\": 1, # one\n}\nvar e\n";
        let lines = vec![
            line(0, "var d = {\"a\": 1}", 1, Spacing::default()),
            line(0, "var e", 4, Spacing::between(0)),
        ];
        let output = render(lines, collect_comments(source), source, "\t");
        assert_eq!(output, "var d = {\"a\": 1}  # one\nvar e\n");
    }
}
