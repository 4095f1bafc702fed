//! Lint findings

use gdtoolkit_parser::Position;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}

/// One finding, attributed to the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub position: Position,
    pub message: String,
    pub rule: String,
    pub severity: Severity,
}

impl Problem {
    pub fn new(
        position: Position,
        message: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            position,
            message: message.into(),
            rule: rule.into(),
            severity,
        }
    }

    pub fn error(position: Position, message: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::new(position, message, rule, Severity::Error)
    }

    pub fn warning(position: Position, message: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::new(position, message, rule, Severity::Warning)
    }

    pub fn info(position: Position, message: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::new(position, message, rule, Severity::Info)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}) at line {}, column {}",
            self.severity, self.message, self.rule, self.position.line, self.position.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let problem = Problem::warning(
            Position::new(3, 5, 20),
            "Trailing whitespace(s)",
            "trailing-whitespace",
        );
        assert_eq!(
            problem.to_string(),
            "warning: Trailing whitespace(s) (trailing-whitespace) at line 3, column 5"
        );
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
