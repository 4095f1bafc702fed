//! Statement nodes

use super::expressions::Expression;
use super::tree::{Annotation, Class, Function, Parameter};
use super::AstNode;
use crate::position::Position;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Pass(Position),
    Break(Position),
    Continue(Position),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Var(VarDeclaration),
    Function(Box<Function>),
    Class(Box<Class>),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    Match(MatchStatement),
    Signal(SignalDeclaration),
    Enum(EnumDeclaration),
    /// An annotation in a block with no declaration after it, such as
    /// `@warning_ignore("unused")` before an expression.
    Annotation(Annotation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub position: Position,
}

/// `var` and `const` declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDeclaration {
    pub name: String,
    pub type_hint: Option<String>,
    /// Declared with `:=`
    pub inferred: bool,
    pub value: Option<Expression>,
    pub is_const: bool,
    pub is_static: bool,
    pub annotations: Vec<Annotation>,
    pub position: Position,
}

impl VarDeclaration {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            inferred: false,
            value: None,
            is_const: false,
            is_static: false,
            annotations: Vec::new(),
            position,
        }
    }

    pub fn kind_tag(&self) -> &'static str {
        let typed = self.type_hint.is_some();
        let assigned = self.value.is_some();
        match (self.is_const, self.inferred, typed, assigned) {
            (true, _, true, true) => "const_typed_assigned",
            (true, _, _, true) => "const_assigned",
            (true, _, _, false) => "const_stmt",
            (false, true, _, _) => "var_inferred",
            (false, false, true, true) => "var_typed_assigned",
            (false, false, true, false) => "var_typed",
            (false, false, false, true) => "var_assigned",
            (false, false, false, false) => "var_stmt",
        }
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElifBranch {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseBranch {
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: Vec<Statement>,
    pub elif_branches: Vec<ElifBranch>,
    pub else_branch: Option<ElseBranch>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    pub iterator: String,
    pub type_hint: Option<String>,
    pub collection: Expression,
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBranch {
    pub pattern: Expression,
    pub guard: Option<Expression>,
    pub body: Vec<Statement>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStatement {
    pub subject: Expression,
    pub branches: Vec<MatchBranch>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumVariant {
    pub name: String,
    pub value: Option<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDeclaration {
    pub name: Option<String>,
    pub variants: Vec<EnumVariant>,
    pub position: Position,
}

impl Statement {
    /// Directly nested statement blocks, in source order.
    pub fn blocks(&self) -> Vec<&[Statement]> {
        match self {
            Statement::If(stmt) => {
                let mut blocks = vec![stmt.consequence.as_slice()];
                blocks.extend(stmt.elif_branches.iter().map(|b| b.body.as_slice()));
                if let Some(branch) = &stmt.else_branch {
                    blocks.push(branch.body.as_slice());
                }
                blocks
            }
            Statement::For(stmt) => vec![stmt.body.as_slice()],
            Statement::While(stmt) => vec![stmt.body.as_slice()],
            Statement::Match(stmt) => stmt.branches.iter().map(|b| b.body.as_slice()).collect(),
            Statement::Function(function) => vec![function.body.as_slice()],
            _ => Vec::new(),
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Statement::Return(_))
    }
}

impl AstNode for Statement {
    fn kind(&self) -> &'static str {
        match self {
            Statement::Pass(_) => "pass_stmt",
            Statement::Break(_) => "break_stmt",
            Statement::Continue(_) => "continue_stmt",
            Statement::Return(_) => "return_stmt",
            Statement::Expression(_) => "expr_stmt",
            Statement::Var(decl) => decl.kind_tag(),
            Statement::Function(_) => "func_def",
            Statement::Class(_) => "class_def",
            Statement::If(_) => "if_stmt",
            Statement::For(stmt) if stmt.type_hint.is_some() => "for_stmt_typed",
            Statement::For(_) => "for_stmt",
            Statement::While(_) => "while_stmt",
            Statement::Match(_) => "match_stmt",
            Statement::Signal(_) => "signal_stmt",
            Statement::Enum(_) => "enum_stmt",
            Statement::Annotation(_) => "annotation_stmt",
        }
    }

    fn position(&self) -> Position {
        match self {
            Statement::Pass(position)
            | Statement::Break(position)
            | Statement::Continue(position) => *position,
            Statement::Return(s) => s.position,
            Statement::Expression(s) => s.position,
            Statement::Var(s) => s.position,
            Statement::Function(s) => s.position,
            Statement::Class(s) => s.position,
            Statement::If(s) => s.position,
            Statement::For(s) => s.position,
            Statement::While(s) => s.position,
            Statement::Match(s) => s.position,
            Statement::Signal(s) => s.position,
            Statement::Enum(s) => s.position,
            Statement::Annotation(s) => s.position,
        }
    }
}
