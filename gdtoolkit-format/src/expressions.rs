//! Expression printing
//!
//! The tree carries no parentheses. They are put back wherever the parser
//! would otherwise group the printed text differently: a left operand binding
//! looser than its operator, a right operand binding no tighter (operators are
//! left associative), and so on for each compound form.

use gdtoolkit_parser::ast::{Annotation, Expression, Parameter};
use gdtoolkit_parser::parser::{operator_precedence, Precedence};

pub(crate) fn expression(value: &Expression) -> String {
    match value {
        Expression::Identifier(id) => id.name.clone(),
        Expression::String(string) => string.literal.clone(),
        Expression::Number(number) => number.original.clone(),
        Expression::Boolean(boolean) => boolean.value.to_string(),
        Expression::Null(_) => "null".to_string(),
        Expression::Array(array) => format!("[{}]", list(&array.elements)),
        Expression::Dictionary(dict) => {
            let entries: Vec<String> = dict
                .entries
                .iter()
                .map(|entry| format!("{}: {}", expression(&entry.key), expression(&entry.value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Expression::NodePath(path) => format!("${}", path.path),
        Expression::Prefix(prefix) => {
            let level = if prefix.operator == "not" {
                Precedence::Logical
            } else {
                Precedence::Prefix
            };
            let operand = match prefix.operand.as_ref() {
                // the prefix parser takes nested prefix forms without help
                nested @ Expression::Prefix(_) => expression(nested),
                other => wrap(other, precedence(other) <= level),
            };
            // `- -1`, not `--1`
            let signs_touch = matches!(prefix.operator.as_str(), "-" | "+")
                && operand.starts_with(['-', '+']);
            if signs_touch || prefix.operator.chars().all(char::is_alphabetic) {
                format!("{} {}", prefix.operator, operand)
            } else {
                format!("{}{}", prefix.operator, operand)
            }
        }
        Expression::Infix(infix) => {
            let level = operator_precedence(&infix.operator).unwrap_or(Precedence::Lowest);
            format!(
                "{} {} {}",
                wrap(&infix.left, precedence(&infix.left) < level),
                infix.operator,
                wrap(&infix.right, precedence(&infix.right) <= level)
            )
        }
        Expression::Call(call) => format!("{}({})", postfix_target(&call.callee), list(&call.arguments)),
        Expression::Index(index) => format!(
            "{}[{}]",
            postfix_target(&index.target),
            expression(&index.index)
        ),
        Expression::Attribute(attribute) => {
            format!("{}.{}", postfix_target(&attribute.target), attribute.property)
        }
        Expression::Assignment(assignment) => format!(
            "{} {} {}",
            wrap(
                &assignment.target,
                precedence(&assignment.target) <= Precedence::Assignment
            ),
            assignment.operator,
            expression(&assignment.value)
        ),
        Expression::Conditional(conditional) => format!(
            "{} if {} else {}",
            wrap(
                &conditional.then_value,
                precedence(&conditional.then_value) <= Precedence::Conditional
            ),
            wrap(
                &conditional.condition,
                precedence(&conditional.condition) <= Precedence::Conditional
            ),
            wrap(
                &conditional.else_value,
                precedence(&conditional.else_value) < Precedence::Conditional
            )
        ),
    }
}

fn wrap(value: &Expression, parenthesize: bool) -> String {
    if parenthesize {
        format!("({})", expression(value))
    } else {
        expression(value)
    }
}

fn postfix_target(target: &Expression) -> String {
    wrap(target, precedence(target) < Precedence::Call)
}

fn list(values: &[Expression]) -> String {
    values.iter().map(expression).collect::<Vec<_>>().join(", ")
}

/// How tightly the printed form of `value` holds together.
///
/// A prefix chain is as loose as its loosest link: `-not x` swallows
/// everything a bare `not x` would.
fn precedence(value: &Expression) -> Precedence {
    match value {
        Expression::Infix(infix) => {
            operator_precedence(&infix.operator).unwrap_or(Precedence::Lowest)
        }
        Expression::Prefix(prefix) => {
            let own = if prefix.operator == "not" {
                Precedence::Logical
            } else {
                Precedence::Prefix
            };
            match prefix.operand.as_ref() {
                nested @ Expression::Prefix(_) => own.min(precedence(nested)),
                _ => own,
            }
        }
        Expression::Assignment(_) => Precedence::Assignment,
        Expression::Conditional(_) => Precedence::Conditional,
        Expression::Call(_) => Precedence::Call,
        Expression::Index(_) => Precedence::Index,
        _ => Precedence::Attribute,
    }
}

pub(crate) fn annotation(annotation: &Annotation) -> String {
    if annotation.arguments.is_empty() {
        format!("@{}", annotation.name)
    } else {
        format!("@{}({})", annotation.name, list(&annotation.arguments))
    }
}

pub(crate) fn parameter(parameter: &Parameter) -> String {
    let mut text = parameter.name.clone();
    if parameter.inferred {
        if let Some(default) = &parameter.default {
            text.push_str(" := ");
            text.push_str(&expression(default));
        }
        return text;
    }
    if let Some(type_hint) = &parameter.type_hint {
        text.push_str(": ");
        text.push_str(type_hint);
    }
    if let Some(default) = &parameter.default {
        text.push_str(" = ");
        text.push_str(&expression(default));
    }
    text
}

pub(crate) fn parameters(parameters: &[Parameter]) -> Vec<String> {
    parameters.iter().map(parameter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdtoolkit_parser::ast::Statement;
    use rstest::rstest;

    fn reprint(source: &str) -> String {
        let (tree, diagnostics) = gdtoolkit_parser::parse(source);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        match &tree.root.statements[0] {
            Statement::Expression(stmt) => expression(&stmt.expression),
            other => panic!("not an expression statement: {:?}", other),
        }
    }

    #[rstest]
    #[case("1+2*3", "1 + 2 * 3")]
    #[case("(1+2)*3", "(1 + 2) * 3")]
    #[case("a-(b-c)", "a - (b - c)")]
    #[case("(a-b)-c", "a - b - c")]
    #[case("a==b==c", "a == b == c")]
    #[case("a==(b==c)", "a == (b == c)")]
    #[case("not a==b", "not a == b")]
    #[case("(not a)==b", "(not a) == b")]
    #[case("not (a and b)", "not (a and b)")]
    #[case("not a and b", "not a and b")]
    #[case("-(a+b)", "-(a + b)")]
    #[case("-x.y()", "-x.y()")]
    #[case("(-x).y", "(-x).y")]
    #[case("(a+b).c", "(a + b).c")]
    #[case("x if c else y if d else z", "x if c else y if d else z")]
    #[case("(x if c else y) if d else z", "(x if c else y) if d else z")]
    #[case("1+2 if true else 3", "1 + 2 if true else 3")]
    #[case("a=b if c else d", "a = b if c else d")]
    #[case("await get_tree().process_frame", "await get_tree().process_frame")]
    #[case("f(1,[2,3],{\"k\":4})", "f(1, [2, 3], {\"k\": 4})")]
    #[case("$Path/To/Node.show()", "$Path/To/Node.show()")]
    #[case("x as Node2D", "x as Node2D")]
    #[case("arr[i+1]", "arr[i + 1]")]
    #[case("-(-1)", "- -1")]
    #[case("+-x", "+ -x")]
    #[case("-~x", "-~x")]
    #[case("a is not B", "a is not B")]
    #[case("a not in b", "a not in b")]
    #[case("not (a not in b)", "not a not in b")]
    fn test_reprint(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(reprint(source), expected);
    }

    #[test]
    fn test_reprinted_expressions_parse_back_to_the_same_tree() {
        for source in ["-(not x) + 1", "a == (not b)", "(a = 1) if c else d", "- -x"] {
            let printed = reprint(source);
            assert_eq!(reprint(&printed), printed, "{}", source);
        }
    }

    #[test]
    fn test_parameters() {
        let (tree, _) = gdtoolkit_parser::parse("func f(a, b: int, c = 1, d: float = 2.0, e := 3):\n\tpass\n");
        assert_eq!(
            parameters(&tree.root.functions[0].parameters),
            vec!["a", "b: int", "c = 1", "d: float = 2.0", "e := 3"]
        );
    }
}
