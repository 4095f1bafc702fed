//! Pull lexer
//!
//! [`Lexer`] wraps the logos scanner from [`raw`] and turns physical lines into
//! logical ones. It tracks an indentation stack seeded with `[0]`; at the first
//! significant token of a line it measures the leading whitespace (a space
//! counts one column, a tab four) and queues the INDENT or DEDENT tokens the
//! change implies. Queued tokens are drained before scanning resumes.
//!
//! Rules on top of plain scanning:
//!
//! - blank and comment-only lines neither emit NEWLINE nor touch indentation;
//! - inside `()`, `[]` and `{}` newlines and indentation are ignored, unless
//!   the next line opens with a statement-only keyword such as `var` or
//!   `func`: the brackets are then taken as unclosed, and the line break and
//!   indentation count again;
//! - a backslash right before a newline joins the two lines;
//! - a dedent that lands between two stack levels queues an illegal token and
//!   narrows the inner level to the new width, so the line stays in its block
//!   and INDENT/DEDENT stay balanced;
//! - at end of input a final NEWLINE (if the last line had content) is followed
//!   by one DEDENT per open level, then EOF forever.

mod raw;

use crate::position::SourceLocation;
use crate::token::{LexIssue, Token, TokenKind};
use logos::Logos;
use raw::RawToken;
use std::collections::VecDeque;
use std::ops::Range;

/// Columns a tab advances the indentation width by.
pub const TAB_WIDTH: usize = 4;

pub struct Lexer<'src> {
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    locations: SourceLocation<'src>,
    indents: Vec<usize>,
    pending: VecDeque<Token>,
    depth: usize,
    at_line_start: bool,
    line_indent: usize,
    line_has_content: bool,
    /// A newline swallowed inside brackets, until the next line's first token.
    joined_newline: Option<usize>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            raw: RawToken::lexer(source),
            locations: SourceLocation::new(source),
            indents: vec![0],
            pending: VecDeque::new(),
            depth: 0,
            at_line_start: true,
            line_indent: 0,
            line_has_content: false,
            joined_newline: None,
            finished: false,
        }
    }

    /// Produce the next token. After end of input every call returns EOF.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }
            if self.finished {
                return self.synthetic(TokenKind::Eof, self.source.len());
            }
            match self.raw.next() {
                Some(result) => self.scan(result),
                None => self.finish(),
            }
        }
    }

    fn scan(&mut self, result: Result<RawToken, LexIssue>) {
        let span = self.raw.span();
        match result {
            Ok(RawToken::Whitespace) => {
                if self.at_line_start || self.joined_newline.is_some() {
                    self.line_indent = indentation_width(self.raw.slice());
                }
            }
            Ok(RawToken::LineContinuation) => {}
            Ok(RawToken::Newline) => self.end_line(span.start),
            Ok(RawToken::Comment) => {
                let token = self.token(TokenKind::Comment, span);
                self.pending.push_back(token);
            }
            Ok(raw) => {
                let Some(kind) = raw.kind() else {
                    return;
                };
                if let Some(newline) = self.joined_newline.take() {
                    if kind.starts_statement_only() {
                        self.close_brackets(newline);
                    }
                }
                self.begin_content(span.start);
                match kind {
                    TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                        self.depth += 1
                    }
                    TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                        self.depth = self.depth.saturating_sub(1)
                    }
                    _ => {}
                }
                let token = self.token(kind, span);
                self.pending.push_back(token);
            }
            Err(issue) => {
                self.joined_newline = None;
                self.begin_content(span.start);
                let token = self.token(TokenKind::Illegal(issue), span);
                self.pending.push_back(token);
            }
        }
    }

    fn end_line(&mut self, offset: usize) {
        if self.depth > 0 {
            self.joined_newline = Some(offset);
            self.line_indent = 0;
            return;
        }
        if self.line_has_content {
            let token = self.token(TokenKind::Newline, offset..offset + 1);
            self.pending.push_back(token);
        }
        self.line_has_content = false;
        self.at_line_start = true;
        self.line_indent = 0;
    }

    /// Give up on the open brackets and end the line at `newline`.
    fn close_brackets(&mut self, newline: usize) {
        tracing::trace!(depth = self.depth, "unclosed bracket before statement keyword");
        let indent = self.line_indent;
        self.depth = 0;
        self.end_line(newline);
        self.line_indent = indent;
    }

    fn begin_content(&mut self, offset: usize) {
        self.line_has_content = true;
        if !self.at_line_start {
            return;
        }
        self.at_line_start = false;
        self.resolve_indentation(offset);
    }

    fn resolve_indentation(&mut self, offset: usize) {
        let width = self.line_indent;
        if width > self.current_level() {
            self.indents.push(width);
            self.pending.push_back(self.synthetic(TokenKind::Indent, offset));
            return;
        }
        while width < self.current_level() {
            self.indents.pop();
            if width > self.current_level() {
                // between two levels: stay in the inner block at the new width
                tracing::trace!(width, level = self.current_level(), "inconsistent dedent");
                self.indents.push(width);
                let issue = TokenKind::Illegal(LexIssue::InconsistentDedent);
                self.pending.push_back(self.synthetic(issue, offset));
                return;
            }
            self.pending.push_back(self.synthetic(TokenKind::Dedent, offset));
        }
    }

    fn finish(&mut self) {
        let end = self.source.len();
        if self.line_has_content {
            self.pending
                .push_back(self.synthetic(TokenKind::Newline, end));
            self.line_has_content = false;
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending.push_back(self.synthetic(TokenKind::Dedent, end));
        }
        self.finished = true;
    }

    fn current_level(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    fn token(&self, kind: TokenKind, span: Range<usize>) -> Token {
        let literal = self.source.get(span.clone()).unwrap_or_default();
        Token::new(kind, literal, self.locations.position(span.start))
    }

    fn synthetic(&self, kind: TokenKind, offset: usize) -> Token {
        Token::new(kind, "", self.locations.position(offset))
    }
}

/// Width of a run of leading whitespace.
fn indentation_width(run: &str) -> usize {
    run.chars()
        .map(|c| match c {
            ' ' => 1,
            '\t' => TAB_WIDTH,
            _ => 0,
        })
        .sum()
}

/// Lex the whole source, EOF included.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
