//! Raw tokenization
//!
//! The logos-derived [`RawToken`] recognises every lexeme of a single line:
//! operators by longest match, keywords ahead of identifiers, numbers and the
//! string forms. Whitespace, newlines and line continuations are surfaced as
//! tokens of their own so that [`super::Lexer`] can resolve indentation on top.

use crate::token::{LexIssue, TokenKind};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexIssue)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\r\f]+")]
    Whitespace,
    #[regex(r"\\\r?\n")]
    LineContinuation,
    #[token("\n")]
    Newline,
    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[\p{XID_Start}_][\p{XID_Continue}]*")]
    Identifier,
    #[regex(r"[0-9][0-9_]*")]
    Int,
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    Float,
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    Hex,
    #[regex(r"0[bB][01_]+")]
    Binary,

    #[token("\"", |lex| close(lex, |rest| scan_quoted(rest, '"')))]
    #[token("'", |lex| close(lex, |rest| scan_quoted(rest, '\'')))]
    #[token("\"\"\"", |lex| close(lex, |rest| scan_triple(rest, "\"\"\"")))]
    #[token("'''", |lex| close(lex, |rest| scan_triple(rest, "'''")))]
    String,
    #[token("r\"", |lex| close(lex, |rest| scan_raw(rest, '"')))]
    #[token("r'", |lex| close(lex, |rest| scan_raw(rest, '\'')))]
    RawString,

    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    Power,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AmpAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token("**=")]
    PowerAssign,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("@")]
    At,
    #[token("$")]
    Dollar,
    #[token("->")]
    Arrow,
    #[token(":=")]
    ColonAssign,

    #[token("func")]
    Func,
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("class_name")]
    ClassName,
    #[token("var")]
    Var,
    #[token("const")]
    Const,
    #[token("static")]
    Static,
    #[token("enum")]
    Enum,
    #[token("signal")]
    Signal,
    #[token("pass")]
    Pass,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("match")]
    Match,
    #[token("when")]
    When,
    #[token("in")]
    In,
    #[token("is")]
    Is,
    #[token("as")]
    As,
    #[token("await")]
    Await,
    #[token("breakpoint")]
    Breakpoint,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("self")]
    SelfKw,
    #[token("get")]
    Get,
    #[token("set")]
    Set,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
}

/// Advance past the rest of a string literal; `scan` reports how many bytes of
/// the remainder belong to it and whether the closing delimiter was found.
fn close<'s>(
    lex: &mut logos::Lexer<'s, RawToken>,
    scan: impl Fn(&str) -> (usize, bool),
) -> Result<(), LexIssue> {
    let (len, terminated) = scan(lex.remainder());
    lex.bump(len);
    if terminated {
        Ok(())
    } else {
        Err(LexIssue::UnterminatedString)
    }
}

fn scan_quoted(rest: &str, quote: char) -> (usize, bool) {
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '\n' => return (idx, false),
            c if c == quote => return (idx + c.len_utf8(), true),
            _ => {}
        }
    }
    (rest.len(), false)
}

fn scan_raw(rest: &str, quote: char) -> (usize, bool) {
    for (idx, ch) in rest.char_indices() {
        match ch {
            '\n' => return (idx, false),
            c if c == quote => return (idx + c.len_utf8(), true),
            _ => {}
        }
    }
    (rest.len(), false)
}

fn scan_triple(rest: &str, delimiter: &str) -> (usize, bool) {
    match rest.find(delimiter) {
        Some(idx) => (idx + delimiter.len(), true),
        None => (rest.len(), false),
    }
}

impl RawToken {
    /// The public kind for a significant raw token. Layout tokens have none.
    pub(crate) fn kind(self) -> Option<TokenKind> {
        use RawToken as R;
        use TokenKind as K;
        let kind = match self {
            R::Whitespace | R::LineContinuation | R::Newline => return None,
            R::Comment => K::Comment,
            R::Identifier => K::Identifier,
            R::Int => K::Int,
            R::Float => K::Float,
            R::Hex => K::Hex,
            R::Binary => K::Binary,
            R::String => K::String,
            R::RawString => K::RawString,
            R::Assign => K::Assign,
            R::Plus => K::Plus,
            R::Minus => K::Minus,
            R::Bang => K::Bang,
            R::Star => K::Star,
            R::Slash => K::Slash,
            R::Percent => K::Percent,
            R::Power => K::Power,
            R::Less => K::Less,
            R::Greater => K::Greater,
            R::Equal => K::Equal,
            R::NotEqual => K::NotEqual,
            R::LessEqual => K::LessEqual,
            R::GreaterEqual => K::GreaterEqual,
            R::AndAnd => K::AndAnd,
            R::OrOr => K::OrOr,
            R::PlusAssign => K::PlusAssign,
            R::MinusAssign => K::MinusAssign,
            R::StarAssign => K::StarAssign,
            R::SlashAssign => K::SlashAssign,
            R::PercentAssign => K::PercentAssign,
            R::AmpAssign => K::AmpAssign,
            R::PipeAssign => K::PipeAssign,
            R::CaretAssign => K::CaretAssign,
            R::ShlAssign => K::ShlAssign,
            R::ShrAssign => K::ShrAssign,
            R::PowerAssign => K::PowerAssign,
            R::Amp => K::Amp,
            R::Pipe => K::Pipe,
            R::Caret => K::Caret,
            R::Tilde => K::Tilde,
            R::Shl => K::Shl,
            R::Shr => K::Shr,
            R::Dot => K::Dot,
            R::Comma => K::Comma,
            R::Colon => K::Colon,
            R::Semicolon => K::Semicolon,
            R::LParen => K::LParen,
            R::RParen => K::RParen,
            R::LBrace => K::LBrace,
            R::RBrace => K::RBrace,
            R::LBracket => K::LBracket,
            R::RBracket => K::RBracket,
            R::At => K::At,
            R::Dollar => K::Dollar,
            R::Arrow => K::Arrow,
            R::ColonAssign => K::ColonAssign,
            R::Func => K::Func,
            R::Class => K::Class,
            R::Extends => K::Extends,
            R::ClassName => K::ClassName,
            R::Var => K::Var,
            R::Const => K::Const,
            R::Static => K::Static,
            R::Enum => K::Enum,
            R::Signal => K::Signal,
            R::Pass => K::Pass,
            R::Return => K::Return,
            R::If => K::If,
            R::Elif => K::Elif,
            R::Else => K::Else,
            R::For => K::For,
            R::While => K::While,
            R::Break => K::Break,
            R::Continue => K::Continue,
            R::Match => K::Match,
            R::When => K::When,
            R::In => K::In,
            R::Is => K::Is,
            R::As => K::As,
            R::Await => K::Await,
            R::Breakpoint => K::Breakpoint,
            R::True => K::True,
            R::False => K::False,
            R::Null => K::Null,
            R::SelfKw => K::SelfKw,
            R::Get => K::Get,
            R::Set => K::Set,
            R::And => K::And,
            R::Or => K::Or,
            R::Not => K::Not,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<Result<RawToken, LexIssue>> {
        RawToken::lexer(source).collect()
    }

    #[test]
    fn test_keywords_win_over_identifiers() {
        assert_eq!(raw("func"), vec![Ok(RawToken::Func)]);
        assert_eq!(raw("funcs"), vec![Ok(RawToken::Identifier)]);
        assert_eq!(raw("class_name"), vec![Ok(RawToken::ClassName)]);
    }

    #[test]
    fn test_longest_operator_match() {
        assert_eq!(raw("**="), vec![Ok(RawToken::PowerAssign)]);
        assert_eq!(raw("<<="), vec![Ok(RawToken::ShlAssign)]);
        assert_eq!(raw(":="), vec![Ok(RawToken::ColonAssign)]);
        assert_eq!(raw("->"), vec![Ok(RawToken::Arrow)]);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(raw("1_000"), vec![Ok(RawToken::Int)]);
        assert_eq!(raw("3.14"), vec![Ok(RawToken::Float)]);
        assert_eq!(raw("1e10"), vec![Ok(RawToken::Float)]);
        assert_eq!(raw("0xFF"), vec![Ok(RawToken::Hex)]);
        assert_eq!(raw("0b1010"), vec![Ok(RawToken::Binary)]);
    }

    #[test]
    fn test_string_forms() {
        let mut lexer = RawToken::lexer(r#""a\"b" rest"#);
        assert_eq!(lexer.next(), Some(Ok(RawToken::String)));
        assert_eq!(lexer.slice(), r#""a\"b""#);

        let mut lexer = RawToken::lexer(r#"r"C:\path""#);
        assert_eq!(lexer.next(), Some(Ok(RawToken::RawString)));
        assert_eq!(lexer.slice(), r#"r"C:\path""#);

        let mut lexer = RawToken::lexer("\"\"\"one\ntwo\"\"\"");
        assert_eq!(lexer.next(), Some(Ok(RawToken::String)));
        assert_eq!(lexer.slice(), "\"\"\"one\ntwo\"\"\"");
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let mut lexer = RawToken::lexer("\"abc\nx");
        assert_eq!(lexer.next(), Some(Err(LexIssue::UnterminatedString)));
        assert_eq!(lexer.slice(), "\"abc");
        assert_eq!(lexer.next(), Some(Ok(RawToken::Newline)));
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(raw("?"), vec![Err(LexIssue::UnexpectedCharacter)]);
    }
}
