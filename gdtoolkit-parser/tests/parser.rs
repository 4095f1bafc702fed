//! End-to-end parsing of representative GDScript files

use gdtoolkit_parser::ast::{Expression, Statement};
use gdtoolkit_parser::{parse, parse_file, AstNode, DiagnosticKind};

fn parse_clean(source: &str) -> gdtoolkit_parser::Tree {
    let (tree, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
    tree
}

#[test]
fn test_class_with_variable_and_method() {
    let tree = parse_clean("class MyClass:\n\tvar x = 5\n\tfunc test():\n\t\tpass");

    assert_eq!(tree.classes().len(), 2);
    assert_eq!(tree.functions().len(), 1);
    let inner = &tree.root.sub_classes[0];
    assert_eq!(inner.name, "MyClass");
    assert_eq!(inner.statements.len(), 1);
    assert_eq!(inner.statements[0].kind(), "var_assigned");
    assert_eq!(inner.functions[0].name, "test");
}

#[test]
fn test_function_signature_and_body() {
    let tree = parse_clean("func foo(a: int, b = 1):\n\treturn a + b");

    let function = &tree.root.functions[0];
    assert_eq!(function.name, "foo");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0].name, "a");
    assert_eq!(function.parameters[0].type_hint.as_deref(), Some("int"));
    assert_eq!(function.parameters[1].name, "b");
    assert!(function.parameters[1].default.is_some());

    let Statement::Return(ret) = &function.body[0] else {
        panic!("expected return, got {:?}", function.body[0]);
    };
    let Some(Expression::Infix(infix)) = &ret.value else {
        panic!("expected infix return value");
    };
    assert_eq!(infix.operator, "+");
}

#[test]
fn test_root_is_global_scope_or_file_name() {
    let tree = parse_clean("var a\n");
    assert_eq!(tree.root.name, "global scope");

    let (tree, _) = parse_file("scripts/player.gd", "var a\n");
    assert_eq!(tree.root.name, "player.gd");
}

#[test]
fn test_file_header() {
    let source = "@tool\nclass_name Player extends CharacterBody2D\n\n@export var speed: float = 300.0\n@onready var sprite = $Body/Sprite2D\n";
    let tree = parse_clean(source);

    assert_eq!(tree.root.class_name.as_deref(), Some("Player"));
    assert_eq!(tree.root.extends.as_deref(), Some("CharacterBody2D"));
    assert_eq!(tree.root.annotations[0].name, "tool");

    let Statement::Var(speed) = &tree.root.statements[0] else {
        panic!("expected var");
    };
    assert_eq!(speed.kind_tag(), "var_typed_assigned");
    assert!(speed.has_annotation("export"));

    let Statement::Var(sprite) = &tree.root.statements[1] else {
        panic!("expected var");
    };
    let Some(Expression::NodePath(path)) = &sprite.value else {
        panic!("expected node path");
    };
    assert_eq!(path.path, "Body/Sprite2D");
}

#[test]
fn test_declaration_kinds() {
    let source = "var a\nvar b: int\nvar c = 1\nvar d: int = 1\nvar e := 1\nconst F = 2\nconst G: int = 3\nstatic var h = 4\n";
    let tree = parse_clean(source);
    let kinds: Vec<_> = tree.root.statements.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "var_stmt",
            "var_typed",
            "var_assigned",
            "var_typed_assigned",
            "var_inferred",
            "const_assigned",
            "const_typed_assigned",
            "var_assigned",
        ]
    );
    let Statement::Var(h) = &tree.root.statements[7] else {
        panic!("expected var");
    };
    assert!(h.is_static);
}

#[test]
fn test_if_elif_else_keep_positions() {
    let source = "func f(x):\n\tif x > 1:\n\t\treturn 1\n\telif x < 0:\n\t\treturn 2\n\telse:\n\t\treturn 3\n";
    let tree = parse_clean(source);
    let Statement::If(stmt) = &tree.root.functions[0].body[0] else {
        panic!("expected if");
    };
    assert_eq!(stmt.position.line, 2);
    assert_eq!(stmt.elif_branches.len(), 1);
    assert_eq!(stmt.elif_branches[0].position.line, 4);
    let else_branch = stmt.else_branch.as_ref().unwrap();
    assert_eq!(else_branch.position.line, 6);
    assert_eq!(else_branch.body.len(), 1);
}

#[test]
fn test_loops_and_match() {
    let source = "\
func f(items):
\tfor i: int in range(3):
\t\tprint(i)
\twhile true:
\t\tbreak
\tmatch items.size():
\t\t0:
\t\t\tpass
\t\t1, :
\t\t\tpass
\t\t_ when items.is_empty(): return
";
    let (tree, diagnostics) = parse(source);
    // the multi-pattern branch is not supported and is reported once
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    let body = &tree.root.functions[0].body;
    assert_eq!(body[0].kind(), "for_stmt_typed");
    assert_eq!(body[1].kind(), "while_stmt");
    let Statement::Match(stmt) = &body[2] else {
        panic!("expected match");
    };
    assert_eq!(stmt.branches.len(), 2);
    assert!(stmt.branches[1].guard.is_some());
}

#[test]
fn test_signals_and_enums() {
    let source = "signal hit\nsignal moved(from: Vector2, to)\nenum State { IDLE, RUNNING = 2, }\nenum { A, B }\n";
    let tree = parse_clean(source);
    let Statement::Signal(moved) = &tree.root.statements[1] else {
        panic!("expected signal");
    };
    assert_eq!(moved.parameters.len(), 2);
    let Statement::Enum(state) = &tree.root.statements[2] else {
        panic!("expected enum");
    };
    assert_eq!(state.name.as_deref(), Some("State"));
    assert_eq!(state.variants.len(), 2);
    assert!(state.variants[1].value.is_some());
    let Statement::Enum(anonymous) = &tree.root.statements[3] else {
        panic!("expected enum");
    };
    assert!(anonymous.name.is_none());
}

#[test]
fn test_inline_bodies_and_semicolons() {
    let tree = parse_clean("func f(x):\n\tif x: return 1\n\tvar a = 1; var b = 2\n\treturn a + b\n");
    let body = &tree.root.functions[0].body;
    assert_eq!(body.len(), 4);
    let Statement::If(stmt) = &body[0] else {
        panic!("expected if");
    };
    assert!(stmt.consequence[0].is_return());
}

#[test]
fn test_multiline_literals() {
    let source = "var d = {\n\t\"a\": 1,\n\t\"b\": [\n\t\t1,\n\t\t2,\n\t],\n}\nfunc f():\n\tpass\n";
    let tree = parse_clean(source);
    let Statement::Var(decl) = &tree.root.statements[0] else {
        panic!("expected var");
    };
    let Some(Expression::Dictionary(dict)) = &decl.value else {
        panic!("expected dictionary");
    };
    assert_eq!(dict.entries.len(), 2);
    let keys: Vec<_> = dict
        .entries
        .iter()
        .map(|entry| match &entry.key {
            Expression::String(s) => s.value().to_string(),
            other => panic!("unexpected key {:?}", other),
        })
        .collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(tree.root.functions.len(), 1);
}

#[test]
fn test_static_functions_and_return_types() {
    let tree = parse_clean("static func make() -> Array[int]:\n\treturn []\n");
    let function = &tree.root.functions[0];
    assert!(function.is_static);
    assert_eq!(function.return_type.as_deref(), Some("Array[int]"));
}

#[test]
fn test_flat_statements_follow_body() {
    let source = "func f(x):\n\tif x:\n\t\tfor i in x:\n\t\t\tprint(i)\n\telse:\n\t\tpass\n\treturn\n";
    let tree = parse_clean(source);
    let kinds: Vec<_> = tree.root.functions[0]
        .flat_statements()
        .iter()
        .map(|s| s.kind())
        .collect();
    assert_eq!(
        kinds,
        vec!["if_stmt", "for_stmt", "expr_stmt", "pass_stmt", "return_stmt"]
    );
}

#[test]
fn test_positions_within_source() {
    let source = "extends Node\n\nfunc _ready():\n\tvar label := \"héllo\"\n\tprint(label)\n";
    let tree = parse_clean(source);
    let mut positions = Vec::new();
    gdtoolkit_parser::inspect(&tree, |node| {
        positions.push(node.position());
        true
    });
    for position in positions {
        assert!(position.offset <= source.len());
        assert!(position.line >= 1 && position.line <= 5);
        assert!(position.column >= 1);
    }
}

#[test]
fn test_mismatched_dedent_is_reported_not_fatal() {
    let source = "func f():\n        var a = 1\n    var b = 2\n";
    let (tree, diagnostics) = parse(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Lexical);
    assert_eq!(diagnostics[0].position.line, 3);
    assert_eq!(tree.root.functions.len(), 1);
}

#[test]
fn test_lines_after_mismatched_dedent_stay_in_function() {
    let source = "func f():\n        var a\n    var b\n    var c\n";
    let (tree, diagnostics) = parse(source);
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert!(tree.root.statements.is_empty());
    assert_eq!(tree.root.functions[0].body.len(), 3);
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "func f(a):\n\tvar x = a if a else 1\n\treturn x +\n";
    assert_eq!(parse(source), parse(source));
}

#[test]
fn test_token_stream_snapshot() {
    let rendered = gdtoolkit_parser::tokenize("func f():\n\tpass\n")
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    insta::assert_snapshot!(rendered, @"func f ( ) : <Newline> <Indent> pass <Newline> <Dedent> <Eof>");
}

#[test]
fn test_annotations_without_declaration_stay_in_block() {
    let tree = parse_clean("func f():\n\t@warning_ignore(\"unused\")\n\tprint(1)\n");
    let body = &tree.root.functions[0].body;
    let kinds: Vec<_> = body.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec!["annotation_stmt", "expr_stmt"]);
    match &body[0] {
        Statement::Annotation(annotation) => {
            assert_eq!(annotation.name, "warning_ignore");
            assert_eq!(annotation.arguments.len(), 1);
            assert_eq!(annotation.position.line, 2);
        }
        other => panic!("expected an annotation, got {:?}", other),
    }
}
