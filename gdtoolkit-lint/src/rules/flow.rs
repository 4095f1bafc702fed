//! `elif` / `else` after a branch that always returns

use crate::linter::{LintContext, Rule};
use crate::problem::Problem;
use gdtoolkit_parser::ast::{IfStatement, Statement};
use gdtoolkit_parser::{inspect, NodeRef};

/// A block returns if it contains a `return`, or an `if` whose every branch
/// (including an `else`) returns.
fn always_returns(block: &[Statement]) -> bool {
    block.iter().any(|statement| match statement {
        Statement::Return(_) => true,
        Statement::If(stmt) => if_always_returns(stmt),
        _ => false,
    })
}

fn if_always_returns(stmt: &IfStatement) -> bool {
    let Some(else_branch) = &stmt.else_branch else {
        return false;
    };
    always_returns(&stmt.consequence)
        && stmt.elif_branches.iter().all(|b| always_returns(&b.body))
        && always_returns(&else_branch.body)
}

fn for_each_if<'a>(context: &LintContext<'a>, mut f: impl FnMut(&'a IfStatement)) {
    inspect(context.tree, |node| {
        if let NodeRef::Statement(Statement::If(stmt)) = node {
            f(stmt);
        }
        true
    });
}

pub struct NoElifReturn;

impl Rule for NoElifReturn {
    fn name(&self) -> &str {
        "no-elif-return"
    }

    fn description(&self) -> &str {
        "Checks for \"elif\" after a branch that returns"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        for_each_if(context, |stmt| {
            let Some(first) = stmt.elif_branches.first() else {
                return;
            };
            if always_returns(&stmt.consequence) {
                problems.push(Problem::warning(
                    first.position,
                    "Unnecessary \"elif\" after \"return\"",
                    self.name(),
                ));
            }
        });
        problems
    }
}

pub struct NoElseReturn;

impl Rule for NoElseReturn {
    fn name(&self) -> &str {
        "no-else-return"
    }

    fn description(&self) -> &str {
        "Checks for \"else\" after branches that all return"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        for_each_if(context, |stmt| {
            let Some(else_branch) = &stmt.else_branch else {
                return;
            };
            if always_returns(&stmt.consequence)
                && stmt.elif_branches.iter().all(|b| always_returns(&b.body))
            {
                problems.push(Problem::warning(
                    else_branch.position,
                    "Unnecessary \"else\" after \"return\"",
                    self.name(),
                ));
            }
        });
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{check, lines};

    const SOURCE: &str = "\
func f(x):
\tif x > 0:
\t\treturn 1
\telif x < 0:
\t\treturn -1
\telse:
\t\treturn 0

func g(x):
\tif x:
\t\tprint(x)
\telif not x:
\t\treturn 1
\telse:
\t\treturn 2

func h(x):
\tif x:
\t\tif x > 1:
\t\t\treturn 1
\t\telse:
\t\t\treturn 2
\telse:
\t\tpass
";

    #[test]
    fn test_no_elif_return() {
        let problems = check(&NoElifReturn, SOURCE);
        assert_eq!(lines(&problems), vec!["4:Unnecessary \"elif\" after \"return\""]);
    }

    #[test]
    fn test_no_else_return() {
        let problems = check(&NoElseReturn, SOURCE);
        assert_eq!(
            lines(&problems),
            vec![
                "6:Unnecessary \"else\" after \"return\"",
                "21:Unnecessary \"else\" after \"return\"",
                "23:Unnecessary \"else\" after \"return\"",
            ]
        );
    }
}
