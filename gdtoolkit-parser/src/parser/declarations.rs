//! Declarations: variables, constants, functions, classes, signals, enums,
//! annotations and the file-level `extends` / `class_name` lines.

use super::precedence::Precedence;
use super::{Item, Parser};
use crate::ast::{
    Annotation, Class, EnumDeclaration, EnumVariant, Function, Parameter, SignalDeclaration,
    Statement, VarDeclaration,
};
use crate::position::Position;
use crate::token::TokenKind;

impl<'src> Parser<'src> {
    /// Annotations attach to the declaration that follows them. When none
    /// follows they are handed back on their own: a class keeps them, a
    /// block turns each into a statement.
    pub(super) fn parse_annotated(&mut self) -> Option<Item> {
        let mut annotations = Vec::new();
        while self.at(TokenKind::At) {
            annotations.push(self.parse_annotation()?);
            while self.eat(TokenKind::Newline) {}
        }

        let position = self.current.position();
        let statement = match self.current.kind {
            TokenKind::Var => self.parse_var(position, false),
            TokenKind::Const => self.parse_const(),
            TokenKind::Static => self.parse_static(),
            TokenKind::Func => self.parse_function(position, false),
            TokenKind::Class => self.parse_class(),
            _ => return Some(Item::Annotations(annotations)),
        };
        let mut statement = statement?;
        match &mut statement {
            Statement::Var(decl) => decl.annotations = annotations,
            Statement::Function(function) => function.annotations = annotations,
            Statement::Class(class) => class.annotations = annotations,
            _ => {}
        }
        Some(Item::Statement(statement))
    }

    fn parse_annotation(&mut self) -> Option<Annotation> {
        let position = self.current.position();
        self.advance();
        let name = self.expect_name("an annotation name")?.literal;
        let arguments = if self.eat(TokenKind::LParen) {
            self.parse_arguments(TokenKind::RParen)?
        } else {
            Vec::new()
        };
        Some(Annotation {
            name,
            arguments,
            position,
        })
    }

    pub(super) fn parse_extends(&mut self) -> Option<Item> {
        let position = self.current.position();
        self.advance();
        let parent = self.parse_extends_target()?;
        self.end_statement();
        Some(Item::Extends(parent, position))
    }

    pub(super) fn parse_class_name(&mut self) -> Option<Item> {
        let position = self.current.position();
        self.advance();
        let name = self.expect_name("a class name")?.literal;
        let extends = if self.eat(TokenKind::Extends) {
            Some(self.parse_extends_target()?)
        } else {
            None
        };
        // icon path: `class_name Foo, "res://icon.svg"`
        let icon = if self.eat(TokenKind::Comma) {
            Some(self.expect(TokenKind::String)?.literal)
        } else {
            None
        };
        self.end_statement();
        Some(Item::ClassName {
            name,
            extends,
            icon,
            position,
        })
    }

    /// `Name`, `Outer.Inner`, `"res://path.gd"` or `"res://path.gd".Inner`
    fn parse_extends_target(&mut self) -> Option<String> {
        let mut target = if self.at(TokenKind::String) {
            let literal = self.current.literal.clone();
            self.advance();
            literal
        } else {
            self.expect_name("a class name")?.literal
        };
        while self.eat(TokenKind::Dot) {
            target.push('.');
            target.push_str(&self.expect_name("a class name")?.literal);
        }
        Some(target)
    }

    /// A type annotation: dotted names with an optional `[T]` element list.
    pub(super) fn parse_type(&mut self) -> Option<String> {
        let mut name = self.expect_name("a type")?.literal;
        while self.eat(TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_name("a type")?.literal);
        }
        if self.eat(TokenKind::LBracket) {
            let mut elements = vec![self.parse_type()?];
            while self.eat(TokenKind::Comma) {
                elements.push(self.parse_type()?);
            }
            self.expect(TokenKind::RBracket)?;
            name = format!("{}[{}]", name, elements.join(", "));
        }
        Some(name)
    }

    pub(super) fn parse_var(&mut self, position: Position, is_static: bool) -> Option<Statement> {
        self.advance();
        let name = self.expect_name("a variable name")?.literal;
        let mut decl = VarDeclaration::new(name, position);
        decl.is_static = is_static;
        self.parse_declaration_tail(&mut decl)?;
        self.end_statement();
        Some(Statement::Var(decl))
    }

    pub(super) fn parse_const(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let name = self.expect_name("a constant name")?.literal;
        let mut decl = VarDeclaration::new(name, position);
        decl.is_const = true;
        self.parse_declaration_tail(&mut decl)?;
        if decl.value.is_none() {
            self.unexpected(&TokenKind::Assign.to_string());
            return None;
        }
        self.end_statement();
        Some(Statement::Var(decl))
    }

    /// `[: Type] [= value]`, `:= value` or `: = value`
    fn parse_declaration_tail(&mut self, decl: &mut VarDeclaration) -> Option<()> {
        if self.eat(TokenKind::ColonAssign) {
            decl.inferred = true;
            decl.value = Some(self.parse_expression(Precedence::Lowest)?);
            return Some(());
        }
        if self.eat(TokenKind::Colon) {
            if self.at(TokenKind::Assign) {
                decl.inferred = true;
            } else {
                decl.type_hint = Some(self.parse_type()?);
            }
        }
        if self.eat(TokenKind::Assign) {
            decl.value = Some(self.parse_expression(Precedence::Lowest)?);
        }
        Some(())
    }

    pub(super) fn parse_static(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        match self.current.kind {
            TokenKind::Func => self.parse_function(position, true),
            TokenKind::Var => self.parse_var(position, true),
            _ => {
                self.unexpected("'func' or 'var'");
                None
            }
        }
    }

    pub(super) fn parse_function(
        &mut self,
        position: Position,
        is_static: bool,
    ) -> Option<Statement> {
        self.expect(TokenKind::Func)?;
        let name = self.expect_name("a function name")?.literal;
        let mut function = Function::new(name, position);
        function.is_static = is_static;
        self.expect(TokenKind::LParen)?;
        function.parameters = self.parse_parameters()?;
        if self.eat(TokenKind::Arrow) {
            function.return_type = Some(self.parse_type()?);
        }
        self.expect(TokenKind::Colon)?;
        function.body = self.parse_block();
        tracing::trace!(name = %function.name, statements = function.body.len(), "parsed function");
        Some(Statement::Function(Box::new(function)))
    }

    /// Parameters up to and including the closing `)`; the `(` is already consumed.
    pub(super) fn parse_parameters(&mut self) -> Option<Vec<Parameter>> {
        let mut parameters = Vec::new();
        while !self.at(TokenKind::RParen) {
            let position = self.current.position();
            let name = self.expect_name("a parameter name")?.literal;
            let mut parameter = Parameter {
                name,
                type_hint: None,
                default: None,
                inferred: false,
                position,
            };
            if self.eat(TokenKind::ColonAssign) {
                parameter.inferred = true;
                parameter.default = Some(self.parse_expression(Precedence::Lowest)?);
            } else {
                if self.eat(TokenKind::Colon) {
                    parameter.type_hint = Some(self.parse_type()?);
                }
                if self.eat(TokenKind::Assign) {
                    parameter.default = Some(self.parse_expression(Precedence::Lowest)?);
                }
            }
            parameters.push(parameter);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Some(parameters)
    }

    pub(super) fn parse_class(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let name = self.expect_name("a class name")?.literal;
        let mut class = Class::new(name, position);
        if self.eat(TokenKind::Extends) {
            class.extends = Some(self.parse_extends_target()?);
        }
        self.expect(TokenKind::Colon)?;
        let mut sink =
            |parser: &mut Self, item: Item| parser.add_class_item(&mut class, item, false);
        self.parse_body(&mut sink);
        Some(Statement::Class(Box::new(class)))
    }

    pub(super) fn parse_signal(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let name = self.expect_name("a signal name")?.literal;
        let parameters = if self.eat(TokenKind::LParen) {
            self.parse_parameters()?
        } else {
            Vec::new()
        };
        self.end_statement();
        Some(Statement::Signal(SignalDeclaration {
            name,
            parameters,
            position,
        }))
    }

    pub(super) fn parse_enum(&mut self) -> Option<Statement> {
        let position = self.current.position();
        self.advance();
        let name = if self.current.kind.is_contextual_name() {
            let name = self.current.literal.clone();
            self.advance();
            Some(name)
        } else {
            None
        };
        self.expect(TokenKind::LBrace)?;
        let mut variants = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let position = self.current.position();
            let name = self.expect_name("an enum variant")?.literal;
            let value = if self.eat(TokenKind::Assign) {
                Some(self.parse_expression(Precedence::Lowest)?)
            } else {
                None
            };
            variants.push(EnumVariant {
                name,
                value,
                position,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        self.end_statement();
        Some(Statement::Enum(EnumDeclaration {
            name,
            variants,
            position,
        }))
    }
}
