//! Pratt expression parsing
//!
//! `parse_expression(min)` parses a prefix form, then keeps folding infix
//! operators that bind tighter than `min`. Left associativity comes from
//! parsing the right operand at the operator's own level; assignment and the
//! conditional parse their right side one level lower, which makes them right
//! associative.

use super::precedence::Precedence;
use super::Parser;
use crate::ast::{
    ArrayLiteral, AssignmentExpression, AttributeExpression, AstNode, BooleanLiteral,
    CallExpression, ConditionalExpression, DictionaryEntry, DictionaryLiteral, Expression,
    Identifier, IndexExpression, InfixExpression, NodePath, NumberLiteral, PrefixExpression,
    StringLiteral,
};
use crate::token::TokenKind;

impl<'src> Parser<'src> {
    pub(crate) fn parse_expression(&mut self, min: Precedence) -> Option<Expression> {
        self.nested(|parser| parser.parse_operators(min))
    }

    fn parse_operators(&mut self, min: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;
        while !self.halted {
            let Some(precedence) = self.infix_precedence() else {
                break;
            };
            if precedence <= min {
                break;
            }
            left = self.parse_infix(left, precedence)?;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let position = token.position();
        let expression = match token.kind {
            TokenKind::Identifier | TokenKind::SelfKw | TokenKind::Get | TokenKind::Set => {
                self.advance();
                Expression::Identifier(Identifier {
                    name: token.literal,
                    position,
                })
            }
            TokenKind::Int | TokenKind::Float | TokenKind::Hex | TokenKind::Binary => {
                self.advance();
                Expression::Number(number_literal(token.kind, token.literal, position))
            }
            TokenKind::String | TokenKind::RawString => {
                self.advance();
                Expression::String(StringLiteral {
                    literal: token.literal,
                    position,
                })
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Expression::Boolean(BooleanLiteral {
                    value: token.kind == TokenKind::True,
                    position,
                })
            }
            TokenKind::Null => {
                self.advance();
                Expression::Null(position)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::RParen)?;
                inner
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.parse_arguments(TokenKind::RBracket)?;
                Expression::Array(ArrayLiteral { elements, position })
            }
            TokenKind::LBrace => {
                self.advance();
                let entries = self.parse_dictionary_entries()?;
                Expression::Dictionary(DictionaryLiteral { entries, position })
            }
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang | TokenKind::Tilde => {
                self.advance();
                let operand = self.parse_expression(Precedence::Prefix)?;
                prefix(token.literal, operand, position)
            }
            TokenKind::Not => {
                // `not a == b` is `not (a == b)`; `not a and b` is `(not a) and b`
                self.advance();
                let operand = self.parse_expression(Precedence::Logical)?;
                prefix(token.literal, operand, position)
            }
            TokenKind::Await => {
                self.advance();
                let operand = self.parse_expression(Precedence::Prefix)?;
                prefix(token.literal, operand, position)
            }
            TokenKind::Dollar => {
                self.advance();
                Expression::NodePath(NodePath {
                    path: self.parse_node_path()?,
                    position,
                })
            }
            _ => {
                self.unexpected("an expression");
                return None;
            }
        };
        Some(expression)
    }

    /// `not in` is the one infix operator that starts with a prefix keyword.
    fn infix_precedence(&self) -> Option<Precedence> {
        match (self.current.kind, self.peek.kind) {
            (TokenKind::Not, TokenKind::In) => Some(Precedence::Comparison),
            (kind, _) => Precedence::of_infix(kind),
        }
    }

    /// Spell the operator at the current token, consuming `is not` and
    /// `not in` as single operators.
    fn take_operator(&mut self) -> String {
        let operator = match (self.current.kind, self.peek.kind) {
            (TokenKind::Is, TokenKind::Not) | (TokenKind::Not, TokenKind::In) => {
                let operator = format!("{} {}", self.current.literal, self.peek.literal);
                self.advance();
                operator
            }
            _ => self.current.literal.clone(),
        };
        self.advance();
        operator
    }

    fn parse_infix(&mut self, left: Expression, precedence: Precedence) -> Option<Expression> {
        let token = self.current.clone();
        let position = left.position();
        let expression = match token.kind {
            TokenKind::LParen => {
                self.advance();
                let arguments = self.parse_arguments(TokenKind::RParen)?;
                Expression::Call(CallExpression {
                    callee: Box::new(left),
                    arguments,
                    position,
                })
            }
            TokenKind::LBracket => {
                self.advance();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::RBracket)?;
                Expression::Index(IndexExpression {
                    target: Box::new(left),
                    index: Box::new(index),
                    position,
                })
            }
            TokenKind::Dot => {
                self.advance();
                let property = self.parse_property_name()?;
                Expression::Attribute(AttributeExpression {
                    target: Box::new(left),
                    property,
                    position,
                })
            }
            TokenKind::If => {
                self.advance();
                let condition = self.parse_expression(Precedence::Conditional)?;
                self.expect(TokenKind::Else)?;
                let else_value = self.parse_expression(Precedence::Assignment)?;
                Expression::Conditional(ConditionalExpression {
                    condition: Box::new(condition),
                    then_value: Box::new(left),
                    else_value: Box::new(else_value),
                    position,
                })
            }
            kind if kind.is_assignment() => {
                self.advance();
                let value = self.parse_expression(Precedence::Lowest)?;
                Expression::Assignment(AssignmentExpression {
                    target: Box::new(left),
                    operator: token.literal,
                    value: Box::new(value),
                    position,
                })
            }
            _ => {
                let operator = self.take_operator();
                let right = self.parse_expression(precedence)?;
                Expression::Infix(InfixExpression {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                    position,
                })
            }
        };
        Some(expression)
    }

    /// Comma-separated expressions up to `close`, trailing comma allowed.
    /// The opening bracket is already consumed; `close` is consumed here.
    pub(super) fn parse_arguments(&mut self, close: TokenKind) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();
        while !self.at(close) {
            arguments.push(self.parse_expression(Precedence::Lowest)?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Some(arguments)
    }

    fn parse_dictionary_entries(&mut self) -> Option<Vec<DictionaryEntry>> {
        let mut entries = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expression(Precedence::Lowest)?;
            entries.push(DictionaryEntry { key, value });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Some(entries)
    }

    /// Any name or keyword is a valid property after `.`.
    fn parse_property_name(&mut self) -> Option<String> {
        if self.current.kind == TokenKind::Identifier || self.current.kind.is_keyword() {
            let name = self.current.literal.clone();
            self.advance();
            Some(name)
        } else {
            self.unexpected("a property name");
            None
        }
    }

    /// The text after `$`: a string, or names joined by `/` with no spaces.
    fn parse_node_path(&mut self) -> Option<String> {
        if self.at(TokenKind::String) {
            let path = self.current.literal.clone();
            self.advance();
            return Some(path);
        }
        let first = self.expect_name("a node path")?;
        let mut path = first.literal.clone();
        let mut end = first.end();
        while self.at(TokenKind::Slash)
            && self.current.offset == end
            && self.peek.kind == TokenKind::Identifier
            && self.peek.offset == end + 1
        {
            self.advance();
            path.push('/');
            path.push_str(&self.current.literal);
            end = self.current.end();
            self.advance();
        }
        Some(path)
    }
}

fn prefix(operator: String, operand: Expression, position: crate::position::Position) -> Expression {
    Expression::Prefix(PrefixExpression {
        operator,
        operand: Box::new(operand),
        position,
    })
}

fn number_literal(
    kind: TokenKind,
    original: String,
    position: crate::position::Position,
) -> NumberLiteral {
    let digits: String = original.chars().filter(|c| *c != '_').collect();
    let (value, is_int) = match kind {
        TokenKind::Hex => (parse_radix(&digits[2..], 16), true),
        TokenKind::Binary => (parse_radix(&digits[2..], 2), true),
        TokenKind::Float => (digits.parse::<f64>().unwrap_or(f64::NAN), false),
        _ => (digits.parse::<f64>().unwrap_or(f64::NAN), true),
    };
    NumberLiteral {
        value,
        is_int,
        original,
        position,
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    u64::from_str_radix(digits, radix)
        .map(|value| value as f64)
        .unwrap_or(f64::NAN)
}
