//! Tree to lines
//!
//! Structural recursion over the tree. Each statement becomes one or more
//! [`Line`]s at the current depth; blocks raise the depth by one. The spacing
//! decided for a class member is consumed by the first line it prints.

use crate::expressions::{annotation, expression, parameters};
use crate::layout::{Line, Spacing};
use crate::options::FormatOptions;
use gdtoolkit_parser::ast::{
    Annotation, AstNode, Class, EnumDeclaration, Function, IfStatement, MatchStatement,
    SignalDeclaration, Statement, VarDeclaration,
};
use gdtoolkit_parser::Tree;

/// Blank lines around functions and classes at file scope.
const TOP_LEVEL_GAP: usize = 2;
/// Blank lines around functions and classes inside a class.
const NESTED_GAP: usize = 1;

pub(crate) struct Serializer<'a> {
    options: &'a FormatOptions,
    lines: Vec<Line>,
    depth: usize,
    spacing: Spacing,
}

/// Something printed at class scope, in source order.
enum Member<'a> {
    ClassName(&'a Class),
    Extends(&'a Class),
    Annotation(&'a Annotation),
    Statement(&'a Statement),
    Function(&'a Function),
    Class(&'a Class),
}

impl Member<'_> {
    fn offset(&self) -> usize {
        match self {
            Member::ClassName(class) => class.class_name_position.map_or(0, |p| p.offset),
            Member::Extends(class) => class.extends_position.map_or(0, |p| p.offset),
            Member::Annotation(annotation) => annotation.position.offset,
            Member::Statement(statement) => statement.position().offset,
            Member::Function(function) => first_annotation_offset(&function.annotations)
                .unwrap_or(function.position.offset),
            Member::Class(class) => first_annotation_offset(&class.annotations)
                .map_or(class.position.offset, |offset| offset.min(class.position.offset)),
        }
    }

    fn is_definition(&self) -> bool {
        matches!(self, Member::Function(_) | Member::Class(_))
    }
}

fn first_annotation_offset(annotations: &[Annotation]) -> Option<usize> {
    annotations.iter().map(|a| a.position.offset).min()
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            depth: 0,
            spacing: Spacing::default(),
        }
    }

    pub(crate) fn serialize(mut self, tree: &Tree) -> Vec<Line> {
        let root = &tree.root;
        let mut members = Vec::new();
        if root.class_name.is_some() {
            members.push(Member::ClassName(root));
        }
        if root.extends.is_some() && root.extends_position.is_some() {
            members.push(Member::Extends(root));
        }
        members.extend(root.annotations.iter().map(Member::Annotation));
        self.members(root, members, TOP_LEVEL_GAP);
        self.lines
    }

    fn push(&mut self, text: impl Into<String>, source_line: Option<usize>) {
        self.lines.push(Line {
            depth: self.depth,
            text: text.into(),
            source_line,
            spacing: std::mem::take(&mut self.spacing),
        });
    }

    fn width(&self, text: &str) -> usize {
        self.depth * self.options.indent_width + text.chars().count()
    }

    /// Print the body of `class` after the given leading members.
    fn members<'t>(&mut self, class: &'t Class, mut members: Vec<Member<'t>>, gap: usize) {
        members.extend(class.statements.iter().map(Member::Statement));
        members.extend(class.functions.iter().map(Member::Function));
        members.extend(class.sub_classes.iter().map(Member::Class));
        members.sort_by_key(Member::offset);

        let mut previous_definition = None;
        for member in &members {
            if let Some(previous) = previous_definition {
                let min_blanks = if previous || member.is_definition() { gap } else { 0 };
                self.spacing = Spacing::between(min_blanks);
            }
            previous_definition = Some(member.is_definition());
            self.member(member);
        }
    }

    fn member(&mut self, member: &Member<'_>) {
        match member {
            Member::ClassName(class) => {
                let line = class.class_name_position.map(|p| p.line);
                let name = class.class_name.as_deref().unwrap_or_default();
                match &class.icon {
                    Some(icon) => self.push(format!("class_name {name}, {icon}"), line),
                    None => self.push(format!("class_name {name}"), line),
                }
                // `class_name X extends Y` is printed as two lines
                if let (Some(parent), None) = (&class.extends, class.extends_position) {
                    self.push(format!("extends {parent}"), None);
                }
            }
            Member::Extends(class) => {
                let parent = class.extends.as_deref().unwrap_or_default();
                self.push(
                    format!("extends {parent}"),
                    class.extends_position.map(|p| p.line),
                );
            }
            Member::Annotation(annotation) => self.annotation_line(annotation),
            Member::Statement(statement) => self.statement(statement),
            Member::Function(function) => self.function(function),
            Member::Class(class) => self.class(class),
        }
    }

    fn annotation_line(&mut self, value: &Annotation) {
        self.push(annotation(value), Some(value.position.line));
    }

    fn block(&mut self, body: &[Statement]) {
        self.depth += 1;
        if body.is_empty() {
            self.push("pass", None);
        }
        for (index, statement) in body.iter().enumerate() {
            if index > 0 {
                self.spacing = Spacing::between(0);
            }
            self.statement(statement);
        }
        self.depth -= 1;
    }

    fn statement(&mut self, statement: &Statement) {
        let line = Some(statement.position().line);
        match statement {
            Statement::Pass(_) => self.push("pass", line),
            Statement::Break(_) => self.push("break", line),
            Statement::Continue(_) => self.push("continue", line),
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => self.push(format!("return {}", expression(value)), line),
                None => self.push("return", line),
            },
            Statement::Expression(stmt) => self.push(expression(&stmt.expression), line),
            Statement::Var(decl) => self.var(decl),
            Statement::Function(function) => self.function(function),
            Statement::Class(class) => self.class(class),
            Statement::If(stmt) => self.if_statement(stmt),
            Statement::For(stmt) => {
                let type_hint = stmt
                    .type_hint
                    .as_ref()
                    .map(|t| format!(": {t}"))
                    .unwrap_or_default();
                self.push(
                    format!(
                        "for {}{} in {}:",
                        stmt.iterator,
                        type_hint,
                        expression(&stmt.collection)
                    ),
                    line,
                );
                self.block(&stmt.body);
            }
            Statement::While(stmt) => {
                self.push(format!("while {}:", expression(&stmt.condition)), line);
                self.block(&stmt.body);
            }
            Statement::Match(stmt) => self.match_statement(stmt),
            Statement::Signal(signal) => self.signal(signal),
            Statement::Enum(decl) => self.enumeration(decl),
            Statement::Annotation(value) => self.annotation_line(value),
        }
    }

    fn var(&mut self, decl: &VarDeclaration) {
        let mut text = String::new();
        for value in &decl.annotations {
            text.push_str(&annotation(value));
            text.push(' ');
        }
        if decl.is_static {
            text.push_str("static ");
        }
        text.push_str(if decl.is_const { "const " } else { "var " });
        text.push_str(&decl.name);
        match (&decl.type_hint, &decl.value) {
            (_, Some(value)) if decl.inferred => {
                text.push_str(" := ");
                text.push_str(&expression(value));
            }
            (type_hint, value) => {
                if let Some(type_hint) = type_hint {
                    text.push_str(": ");
                    text.push_str(type_hint);
                }
                if let Some(value) = value {
                    text.push_str(" = ");
                    text.push_str(&expression(value));
                }
            }
        }
        let line = decl
            .annotations
            .first()
            .map_or(decl.position.line, |a| a.position.line);
        self.push(text, Some(line));
    }

    fn function(&mut self, function: &Function) {
        for value in &function.annotations {
            self.annotation_line(value);
        }
        let keyword = if function.is_static { "static func" } else { "func" };
        let return_type = function
            .return_type
            .as_ref()
            .map(|t| format!(" -> {t}"))
            .unwrap_or_default();
        let params = parameters(&function.parameters);
        let line = Some(function.position.line);

        let header = format!(
            "{keyword} {}({}){return_type}:",
            function.name,
            params.join(", ")
        );
        if params.is_empty() || self.width(&header) <= self.options.max_line_length {
            self.push(header, line);
        } else {
            tracing::trace!(function = %function.name, "splitting long header");
            self.push(format!("{keyword} {}(", function.name), line);
            self.depth += 1;
            for param in params {
                self.push(format!("{param},"), None);
            }
            self.depth -= 1;
            self.push(format!("){return_type}:"), None);
        }
        self.block(&function.body);
    }

    fn class(&mut self, class: &Class) {
        let (leading, inner): (Vec<&Annotation>, Vec<&Annotation>) = class
            .annotations
            .iter()
            .partition(|a| a.position.offset < class.position.offset);
        for value in leading {
            self.annotation_line(value);
        }
        let extends = class
            .extends
            .as_ref()
            .map(|parent| format!(" extends {parent}"))
            .unwrap_or_default();
        self.push(
            format!("class {}{}:", class.name, extends),
            Some(class.position.line),
        );

        self.depth += 1;
        let members: Vec<Member<'_>> = inner.into_iter().map(Member::Annotation).collect();
        let empty = members.is_empty()
            && class.statements.is_empty()
            && class.functions.is_empty()
            && class.sub_classes.is_empty();
        if empty {
            self.push("pass", None);
        } else {
            self.members(class, members, NESTED_GAP);
        }
        self.depth -= 1;
    }

    fn if_statement(&mut self, stmt: &IfStatement) {
        self.push(
            format!("if {}:", expression(&stmt.condition)),
            Some(stmt.position.line),
        );
        self.block(&stmt.consequence);
        for branch in &stmt.elif_branches {
            self.push(
                format!("elif {}:", expression(&branch.condition)),
                Some(branch.position.line),
            );
            self.block(&branch.body);
        }
        if let Some(branch) = &stmt.else_branch {
            self.push("else:", Some(branch.position.line));
            self.block(&branch.body);
        }
    }

    fn match_statement(&mut self, stmt: &MatchStatement) {
        self.push(
            format!("match {}:", expression(&stmt.subject)),
            Some(stmt.position.line),
        );
        self.depth += 1;
        for (index, branch) in stmt.branches.iter().enumerate() {
            if index > 0 {
                self.spacing = Spacing::between(0);
            }
            let guard = branch
                .guard
                .as_ref()
                .map(|g| format!(" when {}", expression(g)))
                .unwrap_or_default();
            self.push(
                format!("{}{}:", expression(&branch.pattern), guard),
                Some(branch.position.line),
            );
            self.block(&branch.body);
        }
        self.depth -= 1;
    }

    fn signal(&mut self, signal: &SignalDeclaration) {
        let text = if signal.parameters.is_empty() {
            format!("signal {}", signal.name)
        } else {
            format!(
                "signal {}({})",
                signal.name,
                parameters(&signal.parameters).join(", ")
            )
        };
        self.push(text, Some(signal.position.line));
    }

    fn enumeration(&mut self, decl: &EnumDeclaration) {
        let variants: Vec<String> = decl
            .variants
            .iter()
            .map(|variant| match &variant.value {
                Some(value) => format!("{} = {}", variant.name, expression(value)),
                None => variant.name.clone(),
            })
            .collect();
        let body = if variants.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", variants.join(", "))
        };
        let text = match &decl.name {
            Some(name) => format!("enum {name} {body}"),
            None => format!("enum {body}"),
        };
        self.push(text, Some(decl.position.line));
    }
}
