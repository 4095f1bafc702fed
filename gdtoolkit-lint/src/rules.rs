//! Built-in rules
//!
//! | group  | rules                                                                    |
//! |--------|--------------------------------------------------------------------------|
//! | basic  | expression-not-assigned, unnecessary-pass, duplicated-load, unused-argument, comparison-with-itself |
//! | class  | class-definitions-order, sub-class-before-parent-class                   |
//! | names  | one rule per naming convention, patterns from `rule_settings`            |
//! | design | max-public-methods, max-returns, function-arguments-number               |
//! | format | max-line-length, max-file-lines, trailing-whitespace, mixed-tabs-and-spaces |
//! | flow   | no-elif-return, no-else-return                                           |

pub mod basic;
pub mod class;
pub mod design;
pub mod flow;
pub mod format;
pub mod names;

use crate::linter::{LintError, Rule};
use gdtoolkit_config::RuleSettings;

/// Every built-in rule, name rules compiled from `settings`.
pub fn default_rules(settings: &RuleSettings) -> Result<Vec<Box<dyn Rule>>, LintError> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(basic::ExpressionNotAssigned),
        Box::new(basic::UnnecessaryPass),
        Box::new(basic::DuplicatedLoad),
        Box::new(basic::UnusedArgument),
        Box::new(basic::ComparisonWithItself),
        Box::new(class::ClassDefinitionsOrder),
        Box::new(class::SubClassBeforeParentClass),
        Box::new(design::MaxPublicMethods),
        Box::new(design::MaxReturns),
        Box::new(design::FunctionArgumentsNumber),
        Box::new(format::MaxLineLength),
        Box::new(format::MaxFileLines),
        Box::new(format::TrailingWhitespace),
        Box::new(format::MixedTabsAndSpaces),
        Box::new(flow::NoElifReturn),
        Box::new(flow::NoElseReturn),
    ];
    for target in names::NameTarget::ALL {
        rules.push(Box::new(names::NameRule::from_settings(target, settings)?));
    }
    Ok(rules)
}
