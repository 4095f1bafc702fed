//! Syntax tree
//!
//! Closed sum types for statements and expressions plus the declaration
//! structs that hold them. Nodes own their children; the parser hands the
//! finished [`Tree`] to the caller and never touches it again.
//!
//! Every node reports a stable `kind()` tag (`var_typed_assigned`, `call`, ...)
//! and the [`Position`](crate::position::Position) its source text starts at.

pub mod expressions;
pub mod statements;
pub mod tree;

pub use expressions::{
    ArrayLiteral, AssignmentExpression, AttributeExpression, BooleanLiteral, CallExpression,
    ConditionalExpression, DictionaryEntry, DictionaryLiteral, Expression, Identifier,
    IndexExpression, InfixExpression, NodePath, NumberLiteral, PrefixExpression, StringLiteral,
};
pub use statements::{
    ElifBranch, ElseBranch, EnumDeclaration, EnumVariant, ExpressionStatement, ForStatement,
    IfStatement, MatchBranch, MatchStatement, ReturnStatement, SignalDeclaration, Statement,
    VarDeclaration, WhileStatement,
};
pub use tree::{Annotation, Class, Function, Parameter, Tree, GLOBAL_SCOPE};

use crate::position::Position;

/// Uniform access to node metadata.
pub trait AstNode {
    fn kind(&self) -> &'static str;
    fn position(&self) -> Position;
}
