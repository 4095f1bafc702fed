//! Parse diagnostics

use crate::position::Position;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical error"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A problem found while lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub position: Position,
    pub expected: Option<String>,
    pub found: Option<String>,
}

impl Diagnostic {
    pub fn lexical(message: impl Into<String>, position: Position) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            message: message.into(),
            position,
            expected: None,
            found: None,
        }
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            message: message.into(),
            position,
            expected: None,
            found: None,
        }
    }

    /// `expected next token to be X, got Y instead`
    pub fn expected(expected: impl Into<String>, found: impl Into<String>, position: Position) -> Self {
        let expected = expected.into();
        let found = found.into();
        Self {
            kind: DiagnosticKind::Syntax,
            message: format!("expected next token to be {}, got {} instead", expected, found),
            position,
            expected: Some(expected),
            found: Some(found),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}: {}",
            self.kind, self.position.line, self.position.column, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_message_form() {
        let diagnostic = Diagnostic::expected("':'", "newline", Position::new(3, 9, 40));
        assert_eq!(
            diagnostic.message,
            "expected next token to be ':', got newline instead"
        );
        assert_eq!(
            diagnostic.to_string(),
            "syntax error at line 3, column 9: expected next token to be ':', got newline instead"
        );
        assert_eq!(diagnostic.expected.as_deref(), Some("':'"));
    }
}
