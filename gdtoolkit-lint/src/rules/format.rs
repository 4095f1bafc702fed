//! Checks on the raw source text

use crate::linter::{LintContext, Rule};
use crate::problem::Problem;
use gdtoolkit_parser::Position;

/// A physical line with its number (1-based) and starting byte offset.
/// A trailing `\r` is not part of the text.
struct Line<'a> {
    number: usize,
    offset: usize,
    text: &'a str,
}

impl Line<'_> {
    fn position(&self, column: usize, byte: usize) -> Position {
        Position::new(self.number, column, self.offset + byte)
    }
}

fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source.lines().enumerate().map(move |(index, text)| {
        let line = Line {
            number: index + 1,
            offset,
            text,
        };
        // `lines` strips "\n" or "\r\n"; step over whichever was there
        offset += text.len();
        if source[offset..].starts_with("\r\n") {
            offset += 2;
        } else if offset < source.len() {
            offset += 1;
        }
        Line {
            text: text.strip_suffix('\r').unwrap_or(text),
            ..line
        }
    })
}

pub struct MaxLineLength;

impl Rule for MaxLineLength {
    fn name(&self) -> &str {
        "max-line-length"
    }

    fn description(&self) -> &str {
        "Checks for lines longer than the configured maximum"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let threshold = context.settings.max_line_length;
        let tab_width = context.settings.tab_characters;
        lines(context.source)
            .filter(|line| {
                let width: usize = line
                    .text
                    .chars()
                    .map(|c| if c == '\t' { tab_width } else { 1 })
                    .sum();
                width > threshold
            })
            .map(|line| {
                Problem::warning(
                    line.position(1, 0),
                    format!("Max allowed line length ({threshold}) exceeded"),
                    self.name(),
                )
            })
            .collect()
    }
}

pub struct MaxFileLines;

impl Rule for MaxFileLines {
    fn name(&self) -> &str {
        "max-file-lines"
    }

    fn description(&self) -> &str {
        "Checks for files longer than the configured number of lines"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let threshold = context.settings.max_file_lines;
        match lines(context.source).last() {
            Some(last) if last.number > threshold => vec![Problem::warning(
                last.position(1, 0),
                format!("Max allowed file lines num ({threshold}) exceeded"),
                self.name(),
            )],
            _ => Vec::new(),
        }
    }
}

pub struct TrailingWhitespace;

impl Rule for TrailingWhitespace {
    fn name(&self) -> &str {
        "trailing-whitespace"
    }

    fn description(&self) -> &str {
        "Checks for whitespace at the end of lines"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        lines(context.source)
            .filter_map(|line| {
                let kept = line.text.trim_end_matches([' ', '\t']);
                if kept.len() == line.text.len() {
                    return None;
                }
                let column = kept.chars().count() + 1;
                Some(Problem::warning(
                    line.position(column, kept.len()),
                    "Trailing whitespace(s)",
                    self.name(),
                ))
            })
            .collect()
    }
}

pub struct MixedTabsAndSpaces;

impl Rule for MixedTabsAndSpaces {
    fn name(&self) -> &str {
        "mixed-tabs-and-spaces"
    }

    fn description(&self) -> &str {
        "Checks for indentation mixing tabs and spaces"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        lines(context.source)
            .filter(|line| {
                let content = line.text.trim_start_matches([' ', '\t']);
                let indent = &line.text[..line.text.len() - content.len()];
                indent.contains(' ') && indent.contains('\t')
            })
            .map(|line| Problem::warning(line.position(1, 0), "Mixed tabs and spaces", self.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{check, check_with, lines as summary, settings};

    #[test]
    fn test_max_line_length_expands_tabs() {
        let mut settings = settings();
        settings.max_line_length = 12;
        settings.tab_characters = 4;
        let source = "var abcdefghij = 1\nfunc f():\n\t\tpass\n\t\tprint(1)\n";
        let problems = check_with(&MaxLineLength, source, &settings);
        assert_eq!(
            summary(&problems),
            vec![
                "1:Max allowed line length (12) exceeded",
                "4:Max allowed line length (12) exceeded",
            ]
        );
    }

    #[test]
    fn test_max_file_lines() {
        let mut settings = settings();
        settings.max_file_lines = 3;
        let problems = check_with(&MaxFileLines, "var a\nvar b\nvar c\n", &settings);
        assert!(problems.is_empty());
        let problems = check_with(&MaxFileLines, "var a\nvar b\nvar c\nvar d\n", &settings);
        assert_eq!(summary(&problems), vec!["4:Max allowed file lines num (3) exceeded"]);
        assert_eq!(problems[0].position.offset, 18);
    }

    #[test]
    fn test_trailing_whitespace() {
        let problems = check(&TrailingWhitespace, "var a = 1  \r\nvar b = 2\r\nfunc f():\n\tpass\t\n");
        assert_eq!(
            summary(&problems),
            vec!["1:Trailing whitespace(s)", "4:Trailing whitespace(s)"]
        );
        assert_eq!(problems[0].position.column, 10);
        assert_eq!(problems[1].position.column, 6);
        assert_eq!(problems[1].position.offset, 39);
    }

    #[test]
    fn test_mixed_tabs_and_spaces() {
        let source = "func f():\n\t if true:\n\t\tpass\n";
        let (tree, _) = gdtoolkit_parser::parse(source);
        let problems = MixedTabsAndSpaces.check(&LintContext {
            tree: &tree,
            source,
            settings: &settings(),
        });
        assert_eq!(summary(&problems), vec!["2:Mixed tabs and spaces"]);
    }
}
