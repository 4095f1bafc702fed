//! Property-based tests for the lexer and parser
//!
//! Whatever the whitespace, INDENT and DEDENT tokens must balance by end of
//! input, and parsing must never panic and always reach a result.

use gdtoolkit_parser::{parse, tokenize, TokenKind};
use proptest::prelude::*;

/// A line with arbitrary leading whitespace and some content
fn line_strategy() -> impl Strategy<Value = String> {
    let indent = prop::collection::vec(prop_oneof![Just(' '), Just('\t')], 0..12)
        .prop_map(|chars| chars.into_iter().collect::<String>());
    let content = prop_oneof![
        Just("pass"),
        Just("var x = 1"),
        Just("if a:"),
        Just("func f():"),
        Just("# comment"),
        Just(""),
        Just("x = [1,"),
        Just("2]"),
        Just("return (a +"),
        Just("\"open string"),
    ];
    (indent, content).prop_map(|(indent, content)| format!("{indent}{content}"))
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..20).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn indents_and_dedents_balance(source in source_strategy()) {
        let tokens = tokenize(&source);
        let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();
        let dedents = tokens.iter().filter(|t| t.kind == TokenKind::Dedent).count();
        prop_assert_eq!(indents, dedents);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn positions_stay_within_source(source in source_strategy()) {
        for token in tokenize(&source) {
            prop_assert!(token.offset <= source.len());
            prop_assert!(token.line >= 1);
            prop_assert!(token.column >= 1);
        }
    }

    #[test]
    fn parsing_terminates_and_is_deterministic(source in source_strategy()) {
        let first = parse(&source);
        let second = parse(&source);
        prop_assert_eq!(first, second);
    }
}
