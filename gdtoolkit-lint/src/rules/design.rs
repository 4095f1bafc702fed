//! Size limits on classes and functions

use crate::linter::{LintContext, Rule};
use crate::problem::Problem;
use gdtoolkit_parser::ast::Statement;
use gdtoolkit_parser::AstNode;

pub struct MaxPublicMethods;

impl Rule for MaxPublicMethods {
    fn name(&self) -> &str {
        "max-public-methods"
    }

    fn description(&self) -> &str {
        "Checks for classes with too many public methods"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let threshold = context.settings.max_public_methods;
        let root = &context.tree.root;
        context
            .tree
            .classes()
            .into_iter()
            .filter(|class| class.functions.iter().filter(|f| !f.is_private()).count() > threshold)
            .map(|class| {
                let subject = if std::ptr::eq(class, root) {
                    "Global scope class".to_string()
                } else {
                    format!("Class {}", class.name)
                };
                Problem::warning(
                    class.position,
                    format!("{subject} has more than {threshold} public methods (functions)"),
                    self.name(),
                )
            })
            .collect()
    }
}

/// Counts every `return` in a function, nested blocks included, and reports
/// at the last one.
pub struct MaxReturns;

impl Rule for MaxReturns {
    fn name(&self) -> &str {
        "max-returns"
    }

    fn description(&self) -> &str {
        "Checks for functions with too many return statements"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let threshold = context.settings.max_returns;
        let mut problems = Vec::new();
        for function in context.tree.functions() {
            let returns: Vec<&Statement> = function
                .flat_statements()
                .into_iter()
                .filter(|s| s.is_return())
                .collect();
            if returns.len() <= threshold {
                continue;
            }
            if let Some(last) = returns.last() {
                problems.push(Problem::warning(
                    last.position(),
                    format!(
                        "Function \"{}\" has more than {threshold} return statements",
                        function.name
                    ),
                    self.name(),
                ));
            }
        }
        problems
    }
}

pub struct FunctionArgumentsNumber;

impl Rule for FunctionArgumentsNumber {
    fn name(&self) -> &str {
        "function-arguments-number"
    }

    fn description(&self) -> &str {
        "Checks for functions with too many arguments"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let threshold = context.settings.function_arguments_number;
        context
            .tree
            .functions()
            .into_iter()
            .filter(|function| function.parameters.len() > threshold)
            .map(|function| {
                Problem::warning(
                    function.position,
                    format!(
                        "Function \"{}\" has more than {threshold} arguments",
                        function.name
                    ),
                    self.name(),
                )
            })
            .collect()
    }
}
