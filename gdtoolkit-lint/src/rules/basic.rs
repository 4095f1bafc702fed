//! Rules about individual statements and expressions

use crate::linter::{LintContext, Rule};
use crate::problem::Problem;
use gdtoolkit_parser::ast::{Expression, Statement};
use gdtoolkit_parser::{inspect, Function, NodeRef};
use std::collections::HashSet;

/// Expression statements whose value is thrown away.
///
/// Calls, assignments, `await` and bare strings (docstrings) are fine.
pub struct ExpressionNotAssigned;

impl Rule for ExpressionNotAssigned {
    fn name(&self) -> &str {
        "expression-not-assigned"
    }

    fn description(&self) -> &str {
        "Checks for expressions that are evaluated but not assigned or used"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        inspect(context.tree, |node| {
            if let NodeRef::Statement(Statement::Expression(stmt)) = node {
                if is_discarded_value(&stmt.expression) {
                    problems.push(Problem::warning(
                        stmt.position,
                        "Expression is not assigned to a variable or used",
                        self.name(),
                    ));
                }
            }
            true
        });
        problems
    }
}

fn is_discarded_value(expression: &Expression) -> bool {
    match expression {
        Expression::Call(_) | Expression::Assignment(_) | Expression::String(_) => false,
        Expression::Prefix(prefix) => prefix.operator != "await",
        _ => true,
    }
}

/// `pass` in a block that has other statements.
pub struct UnnecessaryPass;

impl Rule for UnnecessaryPass {
    fn name(&self) -> &str {
        "unnecessary-pass"
    }

    fn description(&self) -> &str {
        "Checks for pass statements in blocks that are not empty"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        let mut report = |block: &[Statement], other_members: usize| {
            let statements = block
                .iter()
                .filter(|statement| !matches!(statement, Statement::Annotation(_)))
                .count();
            if statements + other_members < 2 {
                return;
            }
            for statement in block {
                if let Statement::Pass(position) = statement {
                    problems.push(Problem::warning(
                        *position,
                        "Unnecessary pass statement",
                        self.name(),
                    ));
                }
            }
        };
        inspect(context.tree, |node| {
            match node {
                NodeRef::Class(class) => {
                    report(&class.statements, class.functions.len() + class.sub_classes.len())
                }
                NodeRef::Function(function) => report(&function.body, 0),
                NodeRef::Statement(statement) => {
                    for block in statement.blocks() {
                        report(block, 0);
                    }
                }
                _ => {}
            }
            true
        });
        problems
    }
}

/// The same resource loaded into two declarations.
pub struct DuplicatedLoad;

impl Rule for DuplicatedLoad {
    fn name(&self) -> &str {
        "duplicated-load"
    }

    fn description(&self) -> &str {
        "Checks for resources loaded more than once"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();
        inspect(context.tree, |node| {
            if let NodeRef::Statement(Statement::Var(decl)) = node {
                if let Some(path) = decl.value.as_ref().and_then(loaded_path) {
                    if !seen.insert(path) {
                        problems.push(Problem::warning(
                            decl.position,
                            format!("Duplicated load statement for '{path}'"),
                            self.name(),
                        ));
                    }
                }
            }
            true
        });
        problems
    }
}

/// The path in `load("path")` / `preload("path")`.
fn loaded_path(expression: &Expression) -> Option<&str> {
    let Expression::Call(call) = expression else {
        return None;
    };
    if !expression.is_load_call() {
        return None;
    }
    match call.arguments.first() {
        Some(Expression::String(path)) => Some(path.value()),
        _ => None,
    }
}

/// Parameters never mentioned in the function body. Names starting with `_`
/// are exempt.
pub struct UnusedArgument;

impl Rule for UnusedArgument {
    fn name(&self) -> &str {
        "unused-argument"
    }

    fn description(&self) -> &str {
        "Checks for function arguments that are never used"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        inspect(context.tree, |node| {
            if let NodeRef::Function(function) = node {
                let used = identifiers_in(function);
                for parameter in &function.parameters {
                    if parameter.name.starts_with('_') || used.contains(parameter.name.as_str()) {
                        continue;
                    }
                    problems.push(Problem::warning(
                        parameter.position,
                        format!("Unused argument '{}'", parameter.name),
                        self.name(),
                    ));
                }
            }
            true
        });
        problems
    }
}

fn identifiers_in(function: &Function) -> HashSet<&str> {
    let mut used = HashSet::new();
    for statement in &function.body {
        inspect(statement, |node| {
            if let NodeRef::Expression(Expression::Identifier(id)) = node {
                used.insert(id.name.as_str());
            }
            true
        });
    }
    used
}

/// `x == x` and friends.
pub struct ComparisonWithItself;

const COMPARISON_OPERATORS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

impl Rule for ComparisonWithItself {
    fn name(&self) -> &str {
        "comparison-with-itself"
    }

    fn description(&self) -> &str {
        "Checks for comparisons of an expression with itself"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        inspect(context.tree, |node| {
            if let NodeRef::Expression(Expression::Infix(infix)) = node {
                if COMPARISON_OPERATORS.contains(&infix.operator.as_str())
                    && same_expression(&infix.left, &infix.right)
                {
                    problems.push(Problem::warning(
                        infix.position,
                        "Comparison of identical expressions",
                        self.name(),
                    ));
                }
            }
            true
        });
        problems
    }
}

/// Structural equality, ignoring positions. Calls never compare equal since
/// they may return something different each time.
fn same_expression(left: &Expression, right: &Expression) -> bool {
    match (left, right) {
        (Expression::Identifier(l), Expression::Identifier(r)) => l.name == r.name,
        (Expression::Number(l), Expression::Number(r)) => l.original == r.original,
        (Expression::String(l), Expression::String(r)) => l.literal == r.literal,
        (Expression::Boolean(l), Expression::Boolean(r)) => l.value == r.value,
        (Expression::Null(_), Expression::Null(_)) => true,
        (Expression::NodePath(l), Expression::NodePath(r)) => l.path == r.path,
        (Expression::Attribute(l), Expression::Attribute(r)) => {
            l.property == r.property && same_expression(&l.target, &r.target)
        }
        (Expression::Index(l), Expression::Index(r)) => {
            same_expression(&l.target, &r.target) && same_expression(&l.index, &r.index)
        }
        (Expression::Prefix(l), Expression::Prefix(r)) => {
            l.operator == r.operator && same_expression(&l.operand, &r.operand)
        }
        (Expression::Infix(l), Expression::Infix(r)) => {
            l.operator == r.operator
                && same_expression(&l.left, &r.left)
                && same_expression(&l.right, &r.right)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{check, lines};

    #[test]
    fn test_expression_not_assigned() {
        let source = "\
func f(a):
\t\"docstring\"
\ta + 1
\ta
\tprint(a)
\ta = 2
\tawait a.done
\t-a
";
        let problems = check(&ExpressionNotAssigned, source);
        assert_eq!(
            lines(&problems),
            vec![
                "3:Expression is not assigned to a variable or used",
                "4:Expression is not assigned to a variable or used",
                "8:Expression is not assigned to a variable or used",
            ]
        );
    }

    #[test]
    fn test_unnecessary_pass() {
        let source = "\
class A:
\tpass
\tvar x

class B:
\tpass

func f():
\tpass
\tif true:
\t\tpass
\telse:
\t\tprint(1)
\t\tpass
";
        let problems = check(&UnnecessaryPass, source);
        assert_eq!(
            lines(&problems),
            vec![
                "2:Unnecessary pass statement",
                "9:Unnecessary pass statement",
                "14:Unnecessary pass statement",
            ]
        );
    }

    #[test]
    fn test_annotations_do_not_make_pass_unnecessary() {
        let source = "func f():\n\t@warning_ignore(\"unreachable_code\")\n\tpass\n";
        assert!(check(&UnnecessaryPass, source).is_empty());
    }

    #[test]
    fn test_pass_next_to_methods_is_unnecessary() {
        let problems = check(&UnnecessaryPass, "class A:\n\tpass\n\tfunc f():\n\t\tprint(1)\n");
        assert_eq!(lines(&problems), vec!["2:Unnecessary pass statement"]);
    }

    #[test]
    fn test_duplicated_load() {
        let source = "\
const A = preload(\"res://a.gd\")
const B = preload(\"res://b.gd\")
var c = load(\"res://a.gd\")
func f():
\tvar d = load('res://b.gd')
\tvar e = load(path())
";
        let problems = check(&DuplicatedLoad, source);
        assert_eq!(
            lines(&problems),
            vec![
                "3:Duplicated load statement for 'res://a.gd'",
                "5:Duplicated load statement for 'res://b.gd'",
            ]
        );
    }

    #[test]
    fn test_unused_argument() {
        let source = "\
func f(used, unused, _ignored, in_default = 1):
\treturn used.call(in_default)

func g(x):
\tpass
";
        let problems = check(&UnusedArgument, source);
        assert_eq!(
            lines(&problems),
            vec!["1:Unused argument 'unused'", "4:Unused argument 'x'"]
        );
    }

    #[test]
    fn test_comparison_with_itself() {
        let source = "\
func f(a, b):
\tif a == a:
\t\tpass
\tif a.x + 1 >= a.x + 1:
\t\tpass
\tif a == b or randi() == randi():
\t\tpass
";
        let problems = check(&ComparisonWithItself, source);
        assert_eq!(
            lines(&problems),
            vec![
                "2:Comparison of identical expressions",
                "4:Comparison of identical expressions",
            ]
        );
    }
}
