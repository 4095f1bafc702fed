//! GDScript front end
//!
//! Turns GDScript source into a position-annotated syntax tree:
//!
//! - [`lexer`]: a pull lexer that resolves indentation into INDENT / DEDENT
//!   tokens on top of a logos scanner;
//! - [`parser`]: recursive descent for statements, Pratt parsing for
//!   expressions, with strict and panic-mode error handling;
//! - [`ast`]: the node types, rooted at a synthetic module-scope class;
//! - [`visitor`]: the fixed-order walk that linters and formatters build on.
//!
//! ```text
//! let (tree, diagnostics) = gdtoolkit_parser::parse("func _ready():\n\tpass\n");
//! assert!(diagnostics.is_empty());
//! assert_eq!(tree.functions()[0].name, "_ready");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;
pub mod visitor;

pub use ast::{AstNode, Class, Expression, Function, Statement, Tree};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_file, parse_with_mode, Diagnostic, DiagnosticKind, ParseMode, Parser};
pub use position::{format_source_context, Position, SourceLocation};
pub use token::{LexIssue, Token, TokenKind};
pub use visitor::{inspect, walk, Flow, NodeRef, Visitor};
