//! Tree traversal
//!
//! [`walk`] drives a [`Visitor`] over any node in a fixed, documented order.
//! `visit` is called on the way down and decides whether to descend;
//! `leave` is called on the way back up for every node that was descended into.
//!
//! Functions and classes nested in statement blocks are reported as
//! [`NodeRef::Function`] / [`NodeRef::Class`], the same as class members, so
//! a visitor only has to match one shape per declaration.
//!
//! Child order:
//!
//! | node        | children                                               |
//! |-------------|--------------------------------------------------------|
//! | tree        | root class                                             |
//! | class       | annotations, statements, functions, sub-classes        |
//! | function    | annotations, parameters, body                          |
//! | parameter   | default                                                |
//! | annotation  | arguments                                              |
//! | var         | annotations, value                                     |
//! | if          | condition, consequence, each elif condition and body, else body |
//! | for         | collection, body                                       |
//! | while       | condition, body                                        |
//! | match       | subject, each branch (pattern, guard, body)            |
//! | signal      | parameters                                             |
//! | enum        | variant values                                         |
//! | conditional | then value, condition, else value                      |
//! | dictionary  | key then value per entry                               |

use crate::ast::{
    Annotation, AstNode, Class, Expression, Function, MatchBranch, Parameter, Statement, Tree,
};
use crate::position::Position;

/// A borrowed reference to any node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Tree(&'a Tree),
    Class(&'a Class),
    Function(&'a Function),
    Parameter(&'a Parameter),
    Annotation(&'a Annotation),
    Statement(&'a Statement),
    MatchBranch(&'a MatchBranch),
    Expression(&'a Expression),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Tree(_) => "tree",
            NodeRef::Class(node) => node.kind(),
            NodeRef::Function(node) => node.kind(),
            NodeRef::Parameter(node) => node.kind(),
            NodeRef::Annotation(node) => node.kind(),
            NodeRef::Statement(node) => node.kind(),
            NodeRef::MatchBranch(_) => "match_branch",
            NodeRef::Expression(node) => node.kind(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            NodeRef::Tree(tree) => tree.root.position,
            NodeRef::Class(node) => node.position,
            NodeRef::Function(node) => node.position,
            NodeRef::Parameter(node) => node.position,
            NodeRef::Annotation(node) => node.position,
            NodeRef::Statement(node) => node.position(),
            NodeRef::MatchBranch(node) => node.position,
            NodeRef::Expression(node) => node.position(),
        }
    }
}

impl<'a> From<&'a Tree> for NodeRef<'a> {
    fn from(node: &'a Tree) -> Self {
        NodeRef::Tree(node)
    }
}

impl<'a> From<&'a Class> for NodeRef<'a> {
    fn from(node: &'a Class) -> Self {
        NodeRef::Class(node)
    }
}

impl<'a> From<&'a Function> for NodeRef<'a> {
    fn from(node: &'a Function) -> Self {
        NodeRef::Function(node)
    }
}

impl<'a> From<&'a Expression> for NodeRef<'a> {
    fn from(node: &'a Expression) -> Self {
        NodeRef::Expression(node)
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(node: &'a Statement) -> Self {
        match node {
            Statement::Function(function) => NodeRef::Function(function),
            Statement::Class(class) => NodeRef::Class(class),
            other => NodeRef::Statement(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Skip,
}

pub trait Visitor<'a> {
    fn visit(&mut self, node: NodeRef<'a>) -> Flow;

    fn leave(&mut self, _node: NodeRef<'a>) {}
}

pub fn walk<'a, V>(visitor: &mut V, node: NodeRef<'a>)
where
    V: Visitor<'a> + ?Sized,
{
    if visitor.visit(node) == Flow::Skip {
        return;
    }
    match node {
        NodeRef::Tree(tree) => walk(visitor, NodeRef::Class(&tree.root)),
        NodeRef::Class(class) => {
            walk_all(visitor, class.annotations.iter().map(NodeRef::Annotation));
            walk_block(visitor, &class.statements);
            walk_all(visitor, class.functions.iter().map(NodeRef::Function));
            walk_all(visitor, class.sub_classes.iter().map(NodeRef::Class));
        }
        NodeRef::Function(function) => {
            walk_all(visitor, function.annotations.iter().map(NodeRef::Annotation));
            walk_all(visitor, function.parameters.iter().map(NodeRef::Parameter));
            walk_block(visitor, &function.body);
        }
        NodeRef::Parameter(parameter) => walk_optional(visitor, parameter.default.as_ref()),
        NodeRef::Annotation(annotation) => walk_expressions(visitor, &annotation.arguments),
        NodeRef::Statement(statement) => walk_statement(visitor, statement),
        NodeRef::MatchBranch(branch) => {
            walk(visitor, NodeRef::Expression(&branch.pattern));
            walk_optional(visitor, branch.guard.as_ref());
            walk_block(visitor, &branch.body);
        }
        NodeRef::Expression(expression) => walk_expression(visitor, expression),
    }
    visitor.leave(node);
}

fn walk_statement<'a, V>(visitor: &mut V, statement: &'a Statement)
where
    V: Visitor<'a> + ?Sized,
{
    match statement {
        Statement::Pass(_) | Statement::Break(_) | Statement::Continue(_) => {}
        Statement::Return(stmt) => walk_optional(visitor, stmt.value.as_ref()),
        Statement::Expression(stmt) => walk(visitor, NodeRef::Expression(&stmt.expression)),
        Statement::Var(decl) => {
            walk_all(visitor, decl.annotations.iter().map(NodeRef::Annotation));
            walk_optional(visitor, decl.value.as_ref());
        }
        // reached through From<&Statement>, which maps these to their own refs
        Statement::Function(function) => walk(visitor, NodeRef::Function(function)),
        Statement::Class(class) => walk(visitor, NodeRef::Class(class)),
        Statement::If(stmt) => {
            walk(visitor, NodeRef::Expression(&stmt.condition));
            walk_block(visitor, &stmt.consequence);
            for branch in &stmt.elif_branches {
                walk(visitor, NodeRef::Expression(&branch.condition));
                walk_block(visitor, &branch.body);
            }
            if let Some(branch) = &stmt.else_branch {
                walk_block(visitor, &branch.body);
            }
        }
        Statement::For(stmt) => {
            walk(visitor, NodeRef::Expression(&stmt.collection));
            walk_block(visitor, &stmt.body);
        }
        Statement::While(stmt) => {
            walk(visitor, NodeRef::Expression(&stmt.condition));
            walk_block(visitor, &stmt.body);
        }
        Statement::Match(stmt) => {
            walk(visitor, NodeRef::Expression(&stmt.subject));
            walk_all(visitor, stmt.branches.iter().map(NodeRef::MatchBranch));
        }
        Statement::Signal(signal) => {
            walk_all(visitor, signal.parameters.iter().map(NodeRef::Parameter));
        }
        Statement::Enum(decl) => {
            for variant in &decl.variants {
                walk_optional(visitor, variant.value.as_ref());
            }
        }
        Statement::Annotation(annotation) => walk(visitor, NodeRef::Annotation(annotation)),
    }
}

fn walk_expression<'a, V>(visitor: &mut V, expression: &'a Expression)
where
    V: Visitor<'a> + ?Sized,
{
    match expression {
        Expression::Identifier(_)
        | Expression::String(_)
        | Expression::Number(_)
        | Expression::Boolean(_)
        | Expression::Null(_)
        | Expression::NodePath(_) => {}
        Expression::Array(array) => walk_expressions(visitor, &array.elements),
        Expression::Dictionary(dict) => {
            for entry in &dict.entries {
                walk(visitor, NodeRef::Expression(&entry.key));
                walk(visitor, NodeRef::Expression(&entry.value));
            }
        }
        Expression::Prefix(prefix) => walk(visitor, NodeRef::Expression(&prefix.operand)),
        Expression::Infix(infix) => {
            walk(visitor, NodeRef::Expression(&infix.left));
            walk(visitor, NodeRef::Expression(&infix.right));
        }
        Expression::Call(call) => {
            walk(visitor, NodeRef::Expression(&call.callee));
            walk_expressions(visitor, &call.arguments);
        }
        Expression::Index(index) => {
            walk(visitor, NodeRef::Expression(&index.target));
            walk(visitor, NodeRef::Expression(&index.index));
        }
        Expression::Attribute(attribute) => walk(visitor, NodeRef::Expression(&attribute.target)),
        Expression::Assignment(assignment) => {
            walk(visitor, NodeRef::Expression(&assignment.target));
            walk(visitor, NodeRef::Expression(&assignment.value));
        }
        Expression::Conditional(conditional) => {
            walk(visitor, NodeRef::Expression(&conditional.then_value));
            walk(visitor, NodeRef::Expression(&conditional.condition));
            walk(visitor, NodeRef::Expression(&conditional.else_value));
        }
    }
}

fn walk_block<'a, V>(visitor: &mut V, block: &'a [Statement])
where
    V: Visitor<'a> + ?Sized,
{
    walk_all(visitor, block.iter().map(NodeRef::from));
}

fn walk_expressions<'a, V>(visitor: &mut V, expressions: &'a [Expression])
where
    V: Visitor<'a> + ?Sized,
{
    walk_all(visitor, expressions.iter().map(NodeRef::Expression));
}

fn walk_optional<'a, V>(visitor: &mut V, expression: Option<&'a Expression>)
where
    V: Visitor<'a> + ?Sized,
{
    if let Some(expression) = expression {
        walk(visitor, NodeRef::Expression(expression));
    }
}

fn walk_all<'a, V, I>(visitor: &mut V, nodes: I)
where
    V: Visitor<'a> + ?Sized,
    I: IntoIterator<Item = NodeRef<'a>>,
{
    for node in nodes {
        walk(visitor, node);
    }
}

struct Inspector<F>(F);

impl<'a, F> Visitor<'a> for Inspector<F>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    fn visit(&mut self, node: NodeRef<'a>) -> Flow {
        if (self.0)(node) {
            Flow::Continue
        } else {
            Flow::Skip
        }
    }
}

/// Walk with a closure; returning `false` skips the node's children.
pub fn inspect<'a, F>(node: impl Into<NodeRef<'a>>, f: F)
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    walk(&mut Inspector(f), node.into());
}
