//! Statement dispatch and control flow

use super::precedence::Precedence;
use super::{Item, Parser};
use crate::ast::{
    ElifBranch, ElseBranch, ExpressionStatement, ForStatement, IfStatement, MatchBranch,
    MatchStatement, ReturnStatement, Statement, WhileStatement,
};
use crate::token::TokenKind;

impl<'src> Parser<'src> {
    /// One statement-level construct, terminator included.
    pub(super) fn parse_item(&mut self) -> Option<Item> {
        self.line_open = false;
        match self.current.kind {
            TokenKind::At => self.parse_annotated(),
            TokenKind::Extends => self.parse_extends(),
            TokenKind::ClassName => self.parse_class_name(),
            _ => self.parse_statement().map(Item::Statement),
        }
    }

    pub(super) fn parse_statement(&mut self) -> Option<Statement> {
        let position = self.current.position();
        match self.current.kind {
            TokenKind::Pass => self.parse_simple(Statement::Pass(position)),
            TokenKind::Break => self.parse_simple(Statement::Break(position)),
            TokenKind::Continue => self.parse_simple(Statement::Continue(position)),
            TokenKind::Return => self.parse_return(),
            TokenKind::Var => self.parse_var(position, false),
            TokenKind::Const => self.parse_const(),
            TokenKind::Static => self.parse_static(),
            TokenKind::Func => self.parse_function(position, false),
            TokenKind::Class => self.parse_class(),
            TokenKind::Signal => self.parse_signal(),
            TokenKind::Enum => self.parse_enum(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Match => self.parse_match(),
            kind if kind.starts_expression() => self.parse_expression_statement(),
            _ => {
                let diagnostic = super::Diagnostic::expected(
                    "a statement",
                    self.current.describe(),
                    position,
                );
                self.record(diagnostic);
                if self.mode == super::ParseMode::Panic {
                    self.advance();
                    self.synchronize();
                }
                None
            }
        }
    }

    /// Consume `;`, a newline, or nothing before DEDENT/EOF. Anything else is
    /// reported, but the statement already parsed is kept.
    pub(super) fn end_statement(&mut self) {
        match self.current.kind {
            TokenKind::Semicolon => {
                self.advance();
                if !self.eat(TokenKind::Newline)
                    && !matches!(self.current.kind, TokenKind::Eof | TokenKind::Dedent)
                {
                    self.line_open = true;
                }
            }
            TokenKind::Newline => self.advance(),
            TokenKind::Eof | TokenKind::Dedent => {}
            _ => self.unexpected("end of statement"),
        }
    }

    fn parse_simple(&mut self, statement: Statement) -> Option<Statement> {
        self.advance();
        self.end_statement();
        Some(statement)
    }

    fn parse_return(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expression(Precedence::Lowest)?)
        };
        self.end_statement();
        Some(Statement::Return(ReturnStatement { value, position }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let position = self.current.position();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.end_statement();
        Some(Statement::Expression(ExpressionStatement {
            expression,
            position,
        }))
    }

    fn parse_if(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::Colon)?;
        let consequence = self.parse_block();
        let mut statement = IfStatement {
            condition,
            consequence,
            elif_branches: Vec::new(),
            else_branch: None,
            position,
        };

        while self.at(TokenKind::Elif) && !self.halted {
            let position = self.current.position();
            self.advance();
            let Some(condition) = self.parse_expression(Precedence::Lowest) else {
                return Some(Statement::If(statement));
            };
            if self.expect(TokenKind::Colon).is_none() {
                return Some(Statement::If(statement));
            }
            let body = self.parse_block();
            statement.elif_branches.push(ElifBranch {
                condition,
                body,
                position,
            });
        }

        if self.at(TokenKind::Else) && !self.halted {
            let position = self.current.position();
            self.advance();
            if self.expect(TokenKind::Colon).is_some() {
                let body = self.parse_block();
                statement.else_branch = Some(ElseBranch { body, position });
            }
        }
        Some(Statement::If(statement))
    }

    fn parse_for(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let iterator = self.expect_name("a loop variable")?.literal;
        let type_hint = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(TokenKind::In)?;
        let collection = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block();
        Some(Statement::For(ForStatement {
            iterator,
            type_hint,
            collection,
            body,
            position,
        }))
    }

    fn parse_while(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block();
        Some(Statement::While(WhileStatement {
            condition,
            body,
            position,
        }))
    }

    fn parse_match(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let subject = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::Colon)?;
        let mut statement = MatchStatement {
            subject,
            branches: Vec::new(),
            position,
        };
        if self.expect(TokenKind::Newline).is_none() || self.expect(TokenKind::Indent).is_none() {
            return Some(Statement::Match(statement));
        }

        loop {
            if self.halted {
                break;
            }
            match self.current.kind {
                TokenKind::Dedent => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => break,
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.advance();
                    continue;
                }
                TokenKind::Indent => {
                    // body of a branch whose header failed
                    if !self.recovering {
                        self.error_at("unexpected indentation", self.current.position());
                    }
                    self.advance();
                    let mut discard = |_: &mut Self, _: Item| {};
                    self.parse_items(&mut discard, true);
                    continue;
                }
                _ => {}
            }
            let before = (self.current.offset, self.current.kind);
            if let Some(branch) = self.parse_match_branch() {
                self.recovering = false;
                statement.branches.push(branch);
            }
            if !self.halted && (self.current.offset, self.current.kind) == before {
                self.advance();
            }
        }
        Some(Statement::Match(statement))
    }

    fn parse_match_branch(&mut self) -> Option<MatchBranch> {
        let position = self.current.position();
        let pattern = self.parse_expression(Precedence::Lowest)?;
        let guard = if self.eat(TokenKind::When) {
            Some(self.parse_expression(Precedence::Lowest)?)
        } else {
            None
        };
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block();
        Some(MatchBranch {
            pattern,
            guard,
            body,
            position,
        })
    }
}
