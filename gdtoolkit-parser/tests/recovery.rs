//! Error handling in panic and strict mode

use gdtoolkit_parser::ast::Statement;
use gdtoolkit_parser::{parse, parse_with_mode, AstNode, DiagnosticKind, ParseMode};

const ONE_BAD_STATEMENT: &str = "\
func f():
\tvar a = 1
\tvar b = )
\tvar c = 3

func g():
\tpass
";

#[test]
fn test_one_bad_statement_costs_one_diagnostic() {
    let (tree, diagnostics) = parse(ONE_BAD_STATEMENT);

    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Syntax);
    assert_eq!(diagnostics[0].position.line, 3);
    assert_eq!(
        diagnostics[0].message,
        "expected next token to be an expression, got ')' instead"
    );

    let names: Vec<_> = tree.functions().iter().map(|f| f.name.clone()).collect();
    assert_eq!(names, vec!["f", "g"]);
    let body = &tree.root.functions[0].body;
    let declared: Vec<_> = body
        .iter()
        .filter_map(|s| match s {
            Statement::Var(decl) => Some(decl.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(declared, vec!["a", "c"]);
}

#[test]
fn test_unclosed_bracket_ends_at_next_statement() {
    let source = "\
func f():
\tvar a = foo(1
\tvar b = 2
\tvar c = 3

func g():
\tpass
";
    let (tree, diagnostics) = parse(source);

    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].position.line, 2);
    let shape: Vec<_> = tree
        .root
        .functions
        .iter()
        .map(|f| (f.name.as_str(), f.body.len()))
        .collect();
    assert_eq!(shape[1], ("g", 1));
    let declared: Vec<_> = tree.root.functions[0]
        .body
        .iter()
        .filter_map(|s| match s {
            Statement::Var(decl) => Some(decl.name.as_str()),
            _ => None,
        })
        .collect();
    assert!(declared.ends_with(&["b", "c"]), "{:?}", declared);
}

#[test]
fn test_deep_nesting_is_reported_not_fatal() {
    let source = format!(
        "var x = {}1{}\nvar y = 2\n",
        "(".repeat(3000),
        ")".repeat(3000)
    );
    let (tree, diagnostics) = parse(&source);

    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].message, "nesting too deep");
    assert_eq!(diagnostics[0].position.line, 1);
    assert!(tree
        .root
        .statements
        .iter()
        .any(|s| matches!(s, Statement::Var(decl) if decl.name == "y")));
}

#[test]
fn test_deep_blocks_are_reported_not_fatal() {
    let source: String = (0..200)
        .map(|depth| format!("{}if a:\n", "\t".repeat(depth)))
        .chain(std::iter::once(format!("{}pass\n", "\t".repeat(200))))
        .collect();
    let (_, diagnostics) = parse(&source);
    assert!(diagnostics.iter().any(|d| d.message == "nesting too deep"));
}

#[test]
fn test_strict_mode_stops_at_first_error() {
    let source = "var a = )\nvar b = )\nfunc f():\n\tpass\n";
    let (tree, diagnostics) = parse_with_mode(source, ParseMode::Strict);
    assert_eq!(diagnostics.len(), 1);
    assert!(tree.root.functions.is_empty());

    let (tree, diagnostics) = parse_with_mode(source, ParseMode::Panic);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(tree.root.functions.len(), 1);
}

#[test]
fn test_missing_colon() {
    let (tree, diagnostics) = parse("func f()\n\tpass\nvar after = 1\n");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].expected.as_deref(), Some("':'"));
    assert_eq!(diagnostics[0].found.as_deref(), Some("newline"));
    // the orphaned body is folded into module scope without a second report
    assert!(tree
        .root
        .statements
        .iter()
        .any(|s| matches!(s, Statement::Var(decl) if decl.name == "after")));
}

#[test]
fn test_unexpected_indentation() {
    let (tree, diagnostics) = parse("var a = 1\n\tvar b = 2\nvar c = 3\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "unexpected indentation");
    assert_eq!(tree.root.statements.len(), 3);
}

#[test]
fn test_lexical_errors_are_reported_once_each() {
    let (tree, diagnostics) = parse("var a = 1 ?\nvar s = 'open\nvar b = 2\n");
    let lexical: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::Lexical)
        .collect();
    assert_eq!(lexical.len(), 2);
    assert_eq!(lexical[0].message, "unexpected character '?'");
    assert_eq!(lexical[1].message, "unterminated string literal");
    assert!(tree.root.statements.iter().any(|s| s.kind() == "var_assigned"));
}

#[test]
fn test_garbage_does_not_hang() {
    let inputs = [
        ")))",
        "func",
        "func (",
        "class :",
        "if if if",
        "match x:\n\tvar y:\n\t\tpass\n",
        "@",
        "enum {",
        "x = [1, 2",
        "else:\n\tpass\n",
        "\t\t\n\t)\n",
    ];
    for input in inputs {
        let (_, diagnostics) = parse(input);
        assert!(!diagnostics.is_empty(), "no diagnostics for {:?}", input);
    }
}
