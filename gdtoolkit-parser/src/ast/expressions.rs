//! Expression nodes
//!
//! Compound expressions box their children. A node's position is where its
//! source text starts, so `a + b` sits at `a` and a call sits at its callee.

use super::AstNode;
use crate::position::Position;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    Identifier(Identifier),
    String(StringLiteral),
    Number(NumberLiteral),
    Boolean(BooleanLiteral),
    Null(Position),
    Array(ArrayLiteral),
    Dictionary(DictionaryLiteral),
    NodePath(NodePath),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    Call(CallExpression),
    Index(IndexExpression),
    Attribute(AttributeExpression),
    Assignment(AssignmentExpression),
    Conditional(ConditionalExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub position: Position,
}

/// A string literal, kept exactly as written (quotes and `r` prefix included).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub literal: String,
    pub position: Position,
}

impl StringLiteral {
    /// The text between the quotes. Escapes are left as written.
    pub fn value(&self) -> &str {
        let text = self.literal.strip_prefix('r').unwrap_or(&self.literal);
        for quote in ["\"\"\"", "'''", "\"", "'"] {
            if let Some(inner) = text
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return inner;
            }
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLiteral {
    pub value: f64,
    pub is_int: bool,
    pub original: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryEntry {
    pub key: Expression,
    pub value: Expression,
}

/// Entries stay in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryLiteral {
    pub entries: Vec<DictionaryEntry>,
    pub position: Position,
}

/// `$Path/To/Node` or `$"path"`; `path` is the text after `$`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePath {
    pub path: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixExpression {
    pub operator: String,
    pub operand: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub position: Position,
}

impl CallExpression {
    /// The called name for plain calls like `load("x")`.
    pub fn function_name(&self) -> Option<&str> {
        match self.callee.as_ref() {
            Expression::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexExpression {
    pub target: Box<Expression>,
    pub index: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeExpression {
    pub target: Box<Expression>,
    pub property: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub operator: String,
    pub value: Box<Expression>,
    pub position: Position,
}

/// `then_value if condition else else_value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    pub condition: Box<Expression>,
    pub then_value: Box<Expression>,
    pub else_value: Box<Expression>,
    pub position: Position,
}

impl Expression {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::String(_)
                | Expression::Number(_)
                | Expression::Boolean(_)
                | Expression::Null(_)
        )
    }

    /// `load(..)` / `preload(..)` calls, as far as naming rules care.
    pub fn is_load_call(&self) -> bool {
        match self {
            Expression::Call(call) => {
                matches!(call.function_name(), Some("load") | Some("preload"))
            }
            _ => false,
        }
    }
}

impl AstNode for Expression {
    fn kind(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "identifier",
            Expression::String(_) => "string",
            Expression::Number(_) => "number",
            Expression::Boolean(_) => "bool",
            Expression::Null(_) => "null",
            Expression::Array(_) => "array",
            Expression::Dictionary(_) => "dictionary",
            Expression::NodePath(_) => "node_path",
            Expression::Prefix(_) => "prefix",
            Expression::Infix(_) => "infix",
            Expression::Call(_) => "call",
            Expression::Index(_) => "index",
            Expression::Attribute(_) => "attribute",
            Expression::Assignment(_) => "assignment",
            Expression::Conditional(_) => "conditional",
        }
    }

    fn position(&self) -> Position {
        match self {
            Expression::Identifier(e) => e.position,
            Expression::String(e) => e.position,
            Expression::Number(e) => e.position,
            Expression::Boolean(e) => e.position,
            Expression::Null(position) => *position,
            Expression::Array(e) => e.position,
            Expression::Dictionary(e) => e.position,
            Expression::NodePath(e) => e.position,
            Expression::Prefix(e) => e.position,
            Expression::Infix(e) => e.position,
            Expression::Call(e) => e.position,
            Expression::Index(e) => e.position,
            Expression::Attribute(e) => e.position,
            Expression::Assignment(e) => e.position,
            Expression::Conditional(e) => e.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(literal: &str) -> StringLiteral {
        StringLiteral {
            literal: literal.to_string(),
            position: Position::start(),
        }
    }

    #[test]
    fn test_string_value_strips_quotes() {
        assert_eq!(string("\"res://a.gd\"").value(), "res://a.gd");
        assert_eq!(string("'x'").value(), "x");
        assert_eq!(string("r\"C:\\d\"").value(), "C:\\d");
        assert_eq!(string("\"\"\"doc\"\"\"").value(), "doc");
    }
}
