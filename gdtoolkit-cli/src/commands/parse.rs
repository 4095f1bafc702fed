//! `gdtoolkit parse <path> [--tokens] [--json] [--strict]`
//!
//! Dumps the token stream or the syntax tree, as an indented outline or as
//! JSON, and reports diagnostics on stderr with the offending source lines.

use crate::error::CliError;
use gdtoolkit_parser::{
    format_source_context, tokenize, walk, Flow, NodeRef, ParseMode, Parser, Visitor,
};
use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub tokens: bool,
    pub json: bool,
    pub strict: bool,
}

pub fn run(path: &Path, options: Options) -> Result<ExitCode, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if options.tokens {
        let tokens = tokenize(&source);
        if options.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            for token in &tokens {
                println!("{}:{}\t{:?}\t{}", token.line, token.column, token.kind, token);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mode = if options.strict {
        ParseMode::Strict
    } else {
        ParseMode::Panic
    };
    let root_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (tree, diagnostics) = Parser::new(&source)
        .with_mode(mode)
        .with_root_name(root_name)
        .parse();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", outline(NodeRef::Tree(&tree)));
    }

    for diagnostic in &diagnostics {
        eprintln!("{}: {}", path.display(), diagnostic);
        eprint!("{}", format_source_context(&source, &diagnostic.position));
    }
    Ok(if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// One line per node: its kind, position and name where it has one.
fn outline(node: NodeRef<'_>) -> String {
    let mut printer = Outline::default();
    walk(&mut printer, node);
    printer.output
}

#[derive(Default)]
struct Outline {
    depth: usize,
    output: String,
}

impl<'a> Visitor<'a> for Outline {
    fn visit(&mut self, node: NodeRef<'a>) -> Flow {
        let name = match node {
            NodeRef::Class(class) => Some(class.name.as_str()),
            NodeRef::Function(function) => Some(function.name.as_str()),
            NodeRef::Parameter(parameter) => Some(parameter.name.as_str()),
            NodeRef::Annotation(annotation) => Some(annotation.name.as_str()),
            _ => None,
        };
        let indent = "  ".repeat(self.depth);
        let _ = match name {
            Some(name) => writeln!(self.output, "{indent}{} {name} @{}", node.kind(), node.position()),
            None => writeln!(self.output, "{indent}{} @{}", node.kind(), node.position()),
        };
        self.depth += 1;
        Flow::Continue
    }

    fn leave(&mut self, _node: NodeRef<'a>) {
        self.depth -= 1;
    }
}
