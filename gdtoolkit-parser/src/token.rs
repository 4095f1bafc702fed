//! Token definitions
//!
//! Tokens are plain values: a [`TokenKind`], the exact source text, and the
//! position it was found at. The synthetic indentation tokens carry an empty
//! literal.

use crate::position::Position;
use serde::Serialize;
use std::fmt;

/// Why the lexer produced an illegal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexIssue {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    InconsistentDedent,
}

impl fmt::Display for LexIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LexIssue::UnexpectedCharacter => "unexpected character",
            LexIssue::UnterminatedString => "unterminated string literal",
            LexIssue::InconsistentDedent => {
                "unindent does not match any outer indentation level"
            }
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Eof,
    Illegal(LexIssue),
    Comment,
    Newline,
    Indent,
    Dedent,

    Identifier,
    Int,
    Float,
    Hex,
    Binary,
    String,
    RawString,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Star,
    Slash,
    Percent,
    Power,
    Less,
    Greater,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    AndAnd,
    OrOr,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    AmpAssign,
    PipeAssign,
    CaretAssign,
    ShlAssign,
    ShrAssign,
    PowerAssign,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    // Punctuation
    Dot,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    At,
    Dollar,
    Arrow,
    ColonAssign,

    // Keywords
    Func,
    Class,
    Extends,
    ClassName,
    Var,
    Const,
    Static,
    Enum,
    Signal,
    Pass,
    Return,
    If,
    Elif,
    Else,
    For,
    While,
    Break,
    Continue,
    Match,
    When,
    In,
    Is,
    As,
    Await,
    Breakpoint,
    True,
    False,
    Null,
    SelfKw,
    Get,
    Set,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// The fixed spelling of operators, punctuation and keywords.
    pub fn text(self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Power => "**",
            Less => "<",
            Greater => ">",
            Equal => "==",
            NotEqual => "!=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            AndAnd => "&&",
            OrOr => "||",
            PlusAssign => "+=",
            MinusAssign => "-=",
            StarAssign => "*=",
            SlashAssign => "/=",
            PercentAssign => "%=",
            AmpAssign => "&=",
            PipeAssign => "|=",
            CaretAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            PowerAssign => "**=",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            Tilde => "~",
            Shl => "<<",
            Shr => ">>",
            Dot => ".",
            Comma => ",",
            Colon => ":",
            Semicolon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            At => "@",
            Dollar => "$",
            Arrow => "->",
            ColonAssign => ":=",
            Func => "func",
            Class => "class",
            Extends => "extends",
            ClassName => "class_name",
            Var => "var",
            Const => "const",
            Static => "static",
            Enum => "enum",
            Signal => "signal",
            Pass => "pass",
            Return => "return",
            If => "if",
            Elif => "elif",
            Else => "else",
            For => "for",
            While => "while",
            Break => "break",
            Continue => "continue",
            Match => "match",
            When => "when",
            In => "in",
            Is => "is",
            As => "as",
            Await => "await",
            Breakpoint => "breakpoint",
            True => "true",
            False => "false",
            Null => "null",
            SelfKw => "self",
            Get => "get",
            Set => "set",
            And => "and",
            Or => "or",
            Not => "not",
            Eof | Illegal(_) | Comment | Newline | Indent | Dedent | Identifier | Int | Float
            | Hex | Binary | String | RawString => return None,
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        self.text()
            .is_some_and(|text| text.starts_with(|c: char| c.is_ascii_alphabetic()))
    }

    pub fn is_assignment(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Assign
                | PlusAssign
                | MinusAssign
                | StarAssign
                | SlashAssign
                | PercentAssign
                | AmpAssign
                | PipeAssign
                | CaretAssign
                | ShlAssign
                | ShrAssign
                | PowerAssign
        )
    }

    /// Whether a token of this kind can begin an expression.
    pub fn starts_expression(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Identifier
                | Int
                | Float
                | Hex
                | Binary
                | String
                | RawString
                | True
                | False
                | Null
                | SelfKw
                | Get
                | Set
                | LParen
                | LBracket
                | LBrace
                | Minus
                | Plus
                | Bang
                | Tilde
                | Not
                | Await
                | Dollar
        )
    }

    /// Keywords that only ever open a statement, never continue an expression.
    pub fn starts_statement_only(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Func | Class
                | Var
                | Const
                | Signal
                | Enum
                | Static
                | Extends
                | ClassName
                | Return
                | Pass
        )
    }

    /// Keywords that are valid as plain names (properties, functions, parameters).
    pub fn is_contextual_name(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Get | TokenKind::Set)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.text() {
            return write!(f, "'{}'", text);
        }
        let name = match self {
            TokenKind::Eof => "end of file",
            TokenKind::Illegal(_) => "illegal token",
            TokenKind::Comment => "comment",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Identifier => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Hex => "hexadecimal integer",
            TokenKind::Binary => "binary integer",
            TokenKind::String => "string",
            TokenKind::RawString => "raw string",
            _ => "token",
        };
        f.write_str(name)
    }
}

/// A single lexical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line: position.line,
            column: position.column,
            offset: position.offset,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    /// Byte offset just past the token's text.
    pub fn end(&self) -> usize {
        self.offset + self.literal.len()
    }

    /// How the token reads in a diagnostic: identifiers and literals show their text.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Hex
            | TokenKind::Binary => format!("{} '{}'", self.kind, self.literal),
            _ => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof => {
                write!(f, "<{:?}>", self.kind)
            }
            TokenKind::Illegal(issue) => write!(f, "<Illegal:{}>", issue),
            _ => f.write_str(&self.literal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_recognised_by_spelling() {
        assert!(TokenKind::Func.is_keyword());
        assert!(TokenKind::ClassName.is_keyword());
        assert!(!TokenKind::Plus.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
    }

    #[test]
    fn test_display_quotes_fixed_spellings() {
        assert_eq!(TokenKind::Colon.to_string(), "':'");
        assert_eq!(TokenKind::Newline.to_string(), "newline");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
    }

    #[test]
    fn test_describe_includes_identifier_text() {
        let token = Token::new(TokenKind::Identifier, "speed", Position::start());
        assert_eq!(token.describe(), "identifier 'speed'");
        assert_eq!(token.end(), 5);
    }
}
