//! Rules about class layout

use crate::linter::{LintContext, Rule};
use crate::problem::Problem;
use gdtoolkit_parser::ast::{Expression, Statement, VarDeclaration};
use gdtoolkit_parser::{AstNode, Class, Position};
use std::collections::HashMap;

/// Class members in the conventional order: docstring, signals, enums,
/// constants, static variables, exported, public, private, `@onready` public,
/// `@onready` private, then everything else (functions and inner classes).
pub struct ClassDefinitionsOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MemberRank {
    Docstring,
    Signal,
    Enum,
    Const,
    StaticVar,
    ExportVar,
    PublicVar,
    PrivateVar,
    OnreadyPublicVar,
    OnreadyPrivateVar,
    Other,
}

fn rank_of(statement: &Statement) -> Option<MemberRank> {
    let rank = match statement {
        Statement::Pass(_) => return None,
        Statement::Expression(stmt) if matches!(stmt.expression, Expression::String(_)) => {
            MemberRank::Docstring
        }
        Statement::Signal(_) => MemberRank::Signal,
        Statement::Enum(_) => MemberRank::Enum,
        Statement::Var(decl) => rank_of_var(decl),
        _ => MemberRank::Other,
    };
    Some(rank)
}

fn rank_of_var(decl: &VarDeclaration) -> MemberRank {
    let private = decl.name.starts_with('_');
    if decl.is_const {
        MemberRank::Const
    } else if decl.is_static {
        MemberRank::StaticVar
    } else if decl.annotations.iter().any(|a| a.name.starts_with("export")) {
        MemberRank::ExportVar
    } else if decl.has_annotation("onready") {
        if private {
            MemberRank::OnreadyPrivateVar
        } else {
            MemberRank::OnreadyPublicVar
        }
    } else if private {
        MemberRank::PrivateVar
    } else {
        MemberRank::PublicVar
    }
}

impl Rule for ClassDefinitionsOrder {
    fn name(&self) -> &str {
        "class-definitions-order"
    }

    fn description(&self) -> &str {
        "Checks that class members follow the conventional order"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let mut problems = Vec::new();
        for class in context.tree.classes() {
            let mut highest = MemberRank::Docstring;
            for (rank, position) in members_in_source_order(class) {
                if rank < highest {
                    problems.push(Problem::warning(
                        position,
                        "Class member is not in the correct order",
                        self.name(),
                    ));
                } else {
                    highest = rank;
                }
            }
        }
        problems
    }
}

/// Statements, functions and inner classes are kept in separate lists; put
/// them back in source order.
fn members_in_source_order(class: &Class) -> Vec<(MemberRank, Position)> {
    let mut members: Vec<_> = class
        .statements
        .iter()
        .filter_map(|s| rank_of(s).map(|rank| (rank, s.position())))
        .chain(class.functions.iter().map(|f| (MemberRank::Other, f.position)))
        .chain(class.sub_classes.iter().map(|c| (MemberRank::Other, c.position)))
        .collect();
    members.sort_by_key(|(_, position)| position.offset);
    members
}

/// An inner class extending a sibling that is only defined further down.
pub struct SubClassBeforeParentClass;

impl Rule for SubClassBeforeParentClass {
    fn name(&self) -> &str {
        "sub-class-before-parent-class"
    }

    fn description(&self) -> &str {
        "Checks for inner classes defined before the class they extend"
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        let classes: Vec<&Class> = context.tree.classes().into_iter().skip(1).collect();
        let mut defined_at = HashMap::new();
        for (index, class) in classes.iter().enumerate() {
            defined_at.entry(class.name.as_str()).or_insert(index);
        }

        let mut problems = Vec::new();
        for (index, class) in classes.iter().enumerate() {
            let Some(parent) = class.extends.as_deref() else {
                continue;
            };
            if defined_at.get(parent).is_some_and(|&at| at > index) {
                problems.push(Problem::error(
                    class.position,
                    format!(
                        "Subclass '{}' is defined before its parent class '{}'",
                        class.name, parent
                    ),
                    self.name(),
                ));
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{check, lines};

    #[test]
    fn test_well_ordered_class() {
        let source = "\
extends Node
\"\"\"Docstring\"\"\"
signal hit
enum State { IDLE }
const SPEED = 1
static var count = 0
@export var size = 1
var public = 1
var _private = 1
@onready var label = $Label
@onready var _sprite = $Sprite

func f():
\tpass

class Inner:
\tpass
";
        assert!(check(&ClassDefinitionsOrder, source).is_empty());
    }

    #[test]
    fn test_out_of_order_members() {
        let source = "\
var a = 1
signal s
const C = 1
func f():
\tpass
var late = 1
";
        let problems = check(&ClassDefinitionsOrder, source);
        assert_eq!(
            lines(&problems),
            vec![
                "2:Class member is not in the correct order",
                "3:Class member is not in the correct order",
                "6:Class member is not in the correct order",
            ]
        );
    }

    #[test]
    fn test_inner_class_checked_on_its_own() {
        let source = "var a\nclass Inner:\n\tvar _p\n\tvar q\n";
        let problems = check(&ClassDefinitionsOrder, source);
        assert_eq!(lines(&problems), vec!["4:Class member is not in the correct order"]);
    }

    #[test]
    fn test_sub_class_before_parent() {
        let source = "\
class Child extends Parent:
\tpass

class Parent:
\tpass

class Other extends Parent:
\tpass
";
        let problems = check(&SubClassBeforeParentClass, source);
        assert_eq!(
            lines(&problems),
            vec!["1:Subclass 'Child' is defined before its parent class 'Parent'"]
        );
        assert_eq!(problems[0].severity, crate::Severity::Error);
    }
}
