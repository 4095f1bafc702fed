//! Recursive-descent parser with Pratt expressions
//!
//! The parser pulls tokens from the [`Lexer`] on demand, keeping two tokens of
//! lookahead. Comments are dropped on the way in and every illegal token
//! becomes a lexical [`Diagnostic`].
//!
//! Each parse routine consumes its whole construct, terminator included, and
//! returns `None` when it had to give up. What happens next depends on the
//! [`ParseMode`]:
//!
//! - `Panic` (the default) skips ahead to the next token in
//!   [`SYNC_TOKENS`](precedence::SYNC_TOKENS) and carries on, so one bad
//!   statement costs one diagnostic and its siblings survive;
//! - `Strict` halts at the first diagnostic and returns the tree built so far.
//!
//! Blocks are delimited by INDENT/DEDENT only. An INDENT where no block is
//! expected is reported once and its statements are folded into the
//! surrounding block.

mod declarations;
mod diagnostic;
mod expressions;
pub mod precedence;
mod statements;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use precedence::{operator_precedence, Precedence};

use crate::ast::{Class, Statement, Tree, GLOBAL_SCOPE};
use crate::lexer::Lexer;
use crate::position::Position;
use crate::token::{Token, TokenKind};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Stop at the first diagnostic.
    Strict,
    /// Record the diagnostic, resynchronize and keep going.
    #[default]
    Panic,
}

/// What a statement-level parse produced, before it is routed into a block.
pub(crate) enum Item {
    Statement(Statement),
    Extends(String, Position),
    ClassName {
        name: String,
        extends: Option<String>,
        icon: Option<String>,
        position: Position,
    },
    /// Annotations with no declaration after them.
    Annotations(Vec<crate::ast::Annotation>),
}

/// How deep expressions and blocks may nest before the parser gives up on
/// the construct.
pub const MAX_NESTING: usize = 64;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    peek: Token,
    mode: ParseMode,
    diagnostics: Vec<Diagnostic>,
    halted: bool,
    /// Set after resynchronizing; cleared once a statement parses cleanly.
    recovering: bool,
    /// An inline body continues after `;` on the same line.
    line_open: bool,
    /// Open expressions and blocks, bounded by [`MAX_NESTING`].
    nesting: usize,
    root_name: String,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let placeholder = Token::new(TokenKind::Eof, "", Position::start());
        let mut parser = Self {
            lexer: Lexer::new(source),
            current: placeholder.clone(),
            peek: placeholder,
            mode: ParseMode::default(),
            diagnostics: Vec::new(),
            halted: false,
            recovering: false,
            line_open: false,
            nesting: 0,
            root_name: GLOBAL_SCOPE.to_string(),
        };
        parser.advance();
        parser.advance();
        parser
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        // the lookahead tokens were pulled before the mode was known
        if mode == ParseMode::Strict && !self.diagnostics.is_empty() {
            self.diagnostics.truncate(1);
            self.halted = true;
        }
        self
    }

    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Parse the whole input into a tree whose root class is module scope.
    pub fn parse(mut self) -> (Tree, Vec<Diagnostic>) {
        tracing::debug!(mode = ?self.mode, root = %self.root_name, "parsing module");
        let mut root = Class::new(self.root_name.clone(), Position::start());
        let mut sink =
            |parser: &mut Self, item: Item| parser.add_class_item(&mut root, item, true);
        self.parse_items(&mut sink, false);
        tracing::debug!(diagnostics = self.diagnostics.len(), "parsed module");
        (Tree::new(root), self.diagnostics)
    }

    // Token plumbing

    fn pull(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Comment => continue,
                TokenKind::Illegal(issue) => {
                    let message = match issue {
                        crate::token::LexIssue::UnexpectedCharacter => {
                            format!("{} '{}'", issue, token.literal)
                        }
                        _ => issue.to_string(),
                    };
                    self.record(Diagnostic::lexical(message, token.position()));
                }
                _ => return token,
            }
        }
    }

    fn advance(&mut self) {
        let next = self.pull();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or report what was found instead.
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            let token = self.current.clone();
            self.advance();
            Some(token)
        } else {
            self.unexpected(&kind.to_string());
            None
        }
    }

    /// Consume an identifier, or a contextual keyword used as a name.
    fn expect_name(&mut self, what: &str) -> Option<Token> {
        if self.current.kind.is_contextual_name() {
            let token = self.current.clone();
            self.advance();
            Some(token)
        } else {
            self.unexpected(what);
            None
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof | TokenKind::Dedent
        )
    }

    // Diagnostics and recovery

    fn record(&mut self, diagnostic: Diagnostic) {
        if self.halted {
            return;
        }
        tracing::debug!(%diagnostic, "diagnostic");
        self.diagnostics.push(diagnostic);
        if self.mode == ParseMode::Strict {
            self.halted = true;
        }
    }

    /// Report the current token as unexpected and recover.
    fn unexpected(&mut self, expected: &str) {
        let diagnostic =
            Diagnostic::expected(expected, self.current.describe(), self.current.position());
        self.record(diagnostic);
        self.synchronize();
    }

    fn error_at(&mut self, message: impl Into<String>, position: Position) {
        self.record(Diagnostic::syntax(message, position));
    }

    /// Run `parse` one nesting level deeper, or report and recover when the
    /// limit is reached.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.nesting >= MAX_NESTING {
            self.error_at("nesting too deep", self.current.position());
            self.synchronize();
            return None;
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    /// Skip to the next synchronization token without consuming it.
    fn synchronize(&mut self) {
        if self.mode == ParseMode::Strict {
            return;
        }
        let from = self.current.position();
        while !precedence::is_sync_token(self.current.kind) {
            self.advance();
        }
        self.recovering = true;
        tracing::trace!(%from, to = %self.current.position(), "resynchronized");
    }

    // Blocks

    /// Parse statements until the block's DEDENT (consumed) or end of input.
    /// At top level a stray DEDENT is skipped instead.
    fn parse_items<F>(&mut self, sink: &mut F, until_dedent: bool)
    where
        F: FnMut(&mut Self, Item),
    {
        loop {
            if self.halted {
                return;
            }
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Dedent => {
                    self.advance();
                    if until_dedent {
                        return;
                    }
                }
                TokenKind::Newline | TokenKind::Semicolon => self.advance(),
                TokenKind::Indent => {
                    if !self.recovering {
                        self.error_at("unexpected indentation", self.current.position());
                    }
                    self.advance();
                    // past the limit the lines are folded into this block
                    if self.nesting < MAX_NESTING {
                        self.nesting += 1;
                        self.parse_items(sink, true);
                        self.nesting -= 1;
                    }
                }
                _ => {
                    let before = (self.current.offset, self.current.kind);
                    if let Some(item) = self.parse_item() {
                        self.recovering = false;
                        sink(self, item);
                    }
                    if !self.halted && (self.current.offset, self.current.kind) == before {
                        self.advance();
                    }
                }
            }
        }
    }

    /// Parse the body after a header's `:`, indented or on the same line.
    fn parse_body<F>(&mut self, sink: &mut F)
    where
        F: FnMut(&mut Self, Item),
    {
        self.nested(|parser| {
            parser.parse_body_contents(sink);
            Some(())
        });
    }

    fn parse_body_contents<F>(&mut self, sink: &mut F)
    where
        F: FnMut(&mut Self, Item),
    {
        if self.eat(TokenKind::Newline) {
            if self.expect(TokenKind::Indent).is_some() {
                self.parse_items(sink, true);
            }
            return;
        }
        if self.at_statement_end() {
            self.unexpected("a block");
            return;
        }
        loop {
            if self.halted || self.at_statement_end() {
                return;
            }
            let before = (self.current.offset, self.current.kind);
            if let Some(item) = self.parse_item() {
                self.recovering = false;
                sink(self, item);
            }
            if !self.line_open || (self.current.offset, self.current.kind) == before {
                return;
            }
        }
    }

    /// A statement block (function body, `if` branch, loop body).
    fn parse_block(&mut self) -> Vec<Statement> {
        let mut body = Vec::new();
        let mut sink = |parser: &mut Self, item: Item| parser.add_block_item(&mut body, item);
        self.parse_body(&mut sink);
        body
    }

    fn add_block_item(&mut self, body: &mut Vec<Statement>, item: Item) {
        match item {
            Item::Statement(statement) => body.push(statement),
            Item::Extends(_, position) => {
                self.error_at("'extends' is only allowed in a class body", position)
            }
            Item::ClassName { position, .. } => {
                self.error_at("'class_name' is only allowed at the top of a file", position)
            }
            Item::Annotations(annotations) => {
                body.extend(annotations.into_iter().map(Statement::Annotation))
            }
        }
    }

    fn add_class_item(&mut self, class: &mut Class, item: Item, is_root: bool) {
        match item {
            Item::Statement(statement) => class.add_member(statement),
            Item::Extends(parent, position) => {
                class.extends = Some(parent);
                class.extends_position = Some(position);
            }
            Item::ClassName {
                name,
                extends,
                icon,
                position,
            } => {
                if !is_root {
                    self.error_at("'class_name' is only allowed at the top of a file", position);
                    return;
                }
                class.class_name = Some(name);
                class.class_name_position = Some(position);
                class.icon = icon;
                if extends.is_some() {
                    class.extends = extends;
                }
            }
            Item::Annotations(annotations) => class.annotations.extend(annotations),
        }
    }
}

/// Parse in panic mode; the root class is named `"global scope"`.
pub fn parse(source: &str) -> (Tree, Vec<Diagnostic>) {
    parse_with_mode(source, ParseMode::Panic)
}

pub fn parse_with_mode(source: &str, mode: ParseMode) -> (Tree, Vec<Diagnostic>) {
    Parser::new(source).with_mode(mode).parse()
}

/// Parse in panic mode, naming the root class after the file's base name.
pub fn parse_file(path: impl AsRef<Path>, source: &str) -> (Tree, Vec<Diagnostic>) {
    let name = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| GLOBAL_SCOPE.to_string());
    Parser::new(source).with_root_name(name).parse()
}
