//! Declarations and the tree root
//!
//! A parsed file is a [`Tree`] whose root is a synthetic [`Class`]: module
//! scope behaves exactly like a class body, so consumers handle top-level code
//! and inner classes with the same code paths.

use super::expressions::Expression;
use super::statements::Statement;
use super::AstNode;
use crate::position::Position;
use serde::Serialize;

/// Name given to the root class when no file name is known.
pub const GLOBAL_SCOPE: &str = "global scope";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree {
    pub root: Class,
}

impl Tree {
    pub fn new(root: Class) -> Self {
        Self { root }
    }

    /// The root class followed by every nested class, depth first.
    pub fn classes(&self) -> Vec<&Class> {
        let mut classes = Vec::new();
        collect_classes(&self.root, &mut classes);
        classes
    }

    /// Every function of every class.
    pub fn functions(&self) -> Vec<&Function> {
        self.classes()
            .into_iter()
            .flat_map(|class| class.functions.iter())
            .collect()
    }
}

fn collect_classes<'a>(class: &'a Class, out: &mut Vec<&'a Class>) {
    out.push(class);
    for sub in &class.sub_classes {
        collect_classes(sub, out);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub name: String,
    /// Parent as written (`Node2D`, `"res://base.gd"`), never resolved.
    pub extends: Option<String>,
    pub class_name: Option<String>,
    /// Icon path literal from `class_name Name, "res://icon.svg"`.
    pub icon: Option<String>,
    /// Where the file-level `class_name` / `extends` lines start.
    pub class_name_position: Option<Position>,
    pub extends_position: Option<Position>,
    pub statements: Vec<Statement>,
    pub functions: Vec<Function>,
    pub sub_classes: Vec<Class>,
    pub annotations: Vec<Annotation>,
    pub position: Position,
}

impl Class {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            extends: None,
            class_name: None,
            icon: None,
            class_name_position: None,
            extends_position: None,
            statements: Vec::new(),
            functions: Vec::new(),
            sub_classes: Vec::new(),
            annotations: Vec::new(),
            position,
        }
    }

    /// Route a parsed statement into the member list it belongs to.
    pub fn add_member(&mut self, statement: Statement) {
        match statement {
            Statement::Function(function) => self.functions.push(*function),
            Statement::Class(class) => self.sub_classes.push(*class),
            other => self.statements.push(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_hint: Option<String>,
    pub default: Option<Expression>,
    /// Declared with `:=`
    pub inferred: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub body: Vec<Statement>,
    pub is_static: bool,
    pub annotations: Vec<Annotation>,
    pub position: Position,
}

impl Function {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            body: Vec::new(),
            is_static: false,
            annotations: Vec::new(),
            position,
        }
    }

    /// Every statement in the body, nested blocks included, in pre-order.
    ///
    /// Computed from `body` on each call; there is no second copy to drift.
    pub fn flat_statements(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        flatten(&self.body, &mut out);
        out
    }

    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }
}

fn flatten<'a>(block: &'a [Statement], out: &mut Vec<&'a Statement>) {
    for statement in block {
        out.push(statement);
        // nested functions own their statements
        if matches!(statement, Statement::Function(_) | Statement::Class(_)) {
            continue;
        }
        for nested in statement.blocks() {
            flatten(nested, out);
        }
    }
}

impl AstNode for Class {
    fn kind(&self) -> &'static str {
        "class_def"
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl AstNode for Function {
    fn kind(&self) -> &'static str {
        "func_def"
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl AstNode for Parameter {
    fn kind(&self) -> &'static str {
        "parameter"
    }

    fn position(&self) -> Position {
        self.position
    }
}

impl AstNode for Annotation {
    fn kind(&self) -> &'static str {
        "annotation"
    }

    fn position(&self) -> Position {
        self.position
    }
}
