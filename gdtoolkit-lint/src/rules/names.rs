//! Naming conventions
//!
//! Every named declaration is classified into exactly one [`NameTarget`]; each
//! target has its own rule and pattern, so `# gdlint:ignore=constant-name`
//! silences constants without touching load constants.

use crate::linter::{LintContext, LintError, Rule};
use crate::problem::Problem;
use gdtoolkit_config::RuleSettings;
use gdtoolkit_parser::ast::{Expression, Statement, VarDeclaration};
use gdtoolkit_parser::{walk, Class, Flow, NodeRef, Position, Visitor};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTarget {
    Function,
    SubClass,
    ClassName,
    Signal,
    Enum,
    EnumElement,
    LoopVariable,
    FunctionArgument,
    FunctionVariable,
    FunctionPreloadVariable,
    Constant,
    LoadConstant,
    ClassVariable,
    ClassLoadVariable,
}

impl NameTarget {
    pub const ALL: [NameTarget; 14] = [
        NameTarget::Function,
        NameTarget::SubClass,
        NameTarget::ClassName,
        NameTarget::Signal,
        NameTarget::Enum,
        NameTarget::EnumElement,
        NameTarget::LoopVariable,
        NameTarget::FunctionArgument,
        NameTarget::FunctionVariable,
        NameTarget::FunctionPreloadVariable,
        NameTarget::Constant,
        NameTarget::LoadConstant,
        NameTarget::ClassVariable,
        NameTarget::ClassLoadVariable,
    ];

    pub fn rule_name(self) -> &'static str {
        match self {
            NameTarget::Function => "function-name",
            NameTarget::SubClass => "sub-class-name",
            NameTarget::ClassName => "class-name",
            NameTarget::Signal => "signal-name",
            NameTarget::Enum => "enum-name",
            NameTarget::EnumElement => "enum-element-name",
            NameTarget::LoopVariable => "loop-variable-name",
            NameTarget::FunctionArgument => "function-argument-name",
            NameTarget::FunctionVariable => "function-variable-name",
            NameTarget::FunctionPreloadVariable => "function-preload-variable-name",
            NameTarget::Constant => "constant-name",
            NameTarget::LoadConstant => "load-constant-name",
            NameTarget::ClassVariable => "class-variable-name",
            NameTarget::ClassLoadVariable => "class-load-variable-name",
        }
    }

    /// Leading words of the problem message.
    fn label(self) -> &'static str {
        match self {
            NameTarget::Function => "Function",
            NameTarget::SubClass | NameTarget::ClassName => "Class",
            NameTarget::Signal => "Signal",
            NameTarget::Enum => "Enum",
            NameTarget::EnumElement => "Enum element",
            NameTarget::LoopVariable => "Loop variable",
            NameTarget::FunctionArgument => "Function argument",
            NameTarget::FunctionVariable => "Function variable",
            NameTarget::FunctionPreloadVariable => "Function preload variable",
            NameTarget::Constant => "Constant",
            NameTarget::LoadConstant => "Load constant",
            NameTarget::ClassVariable => "Class variable",
            NameTarget::ClassLoadVariable => "Class load variable",
        }
    }
}

/// A name, where it was declared, and which convention applies.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedItem<'a> {
    pub target: NameTarget,
    pub name: &'a str,
    pub position: Position,
}

/// Checks one [`NameTarget`] against a whole-name pattern.
pub struct NameRule {
    target: NameTarget,
    pattern: Regex,
    description: String,
}

impl NameRule {
    pub fn new(target: NameTarget, pattern: &str) -> Result<Self, LintError> {
        let pattern = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            LintError::InvalidPattern {
                rule: target.rule_name().to_string(),
                source,
            }
        })?;
        Ok(Self {
            target,
            pattern,
            description: format!("{} names should follow the naming convention", target.label()),
        })
    }

    pub fn from_settings(target: NameTarget, settings: &RuleSettings) -> Result<Self, LintError> {
        let pattern = settings.name_pattern(target.rule_name()).unwrap_or(".*");
        Self::new(target, pattern)
    }
}

impl Rule for NameRule {
    fn name(&self) -> &str {
        self.target.rule_name()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem> {
        named_items(context.tree)
            .into_iter()
            .filter(|item| item.target == self.target && !self.pattern.is_match(item.name))
            .map(|item| {
                Problem::warning(
                    item.position,
                    format!("{} name \"{}\" is not valid", self.target.label(), item.name),
                    self.name(),
                )
            })
            .collect()
    }
}

/// Every named declaration in the tree, classified.
pub fn named_items(tree: &gdtoolkit_parser::Tree) -> Vec<NamedItem<'_>> {
    let mut collector = NameCollector {
        root: &tree.root,
        function_depth: 0,
        items: Vec::new(),
    };
    walk(&mut collector, NodeRef::Tree(tree));
    collector.items
}

struct NameCollector<'a> {
    root: &'a Class,
    function_depth: usize,
    items: Vec<NamedItem<'a>>,
}

impl<'a> NameCollector<'a> {
    fn push(&mut self, target: NameTarget, name: &'a str, position: Position) {
        self.items.push(NamedItem {
            target,
            name,
            position,
        });
    }

    fn classify_var(&self, decl: &VarDeclaration) -> Option<NameTarget> {
        let value = decl.value.as_ref();
        let loads = value.is_some_and(Expression::is_load_call);
        let preloads = value.is_some_and(is_preload_call);
        let target = match (decl.is_const, self.function_depth > 0) {
            (true, _) if loads => NameTarget::LoadConstant,
            (true, _) => NameTarget::Constant,
            (false, true) if preloads => NameTarget::FunctionPreloadVariable,
            // `load` results inside functions follow no convention
            (false, true) if loads => return None,
            (false, true) => NameTarget::FunctionVariable,
            (false, false) if loads => NameTarget::ClassLoadVariable,
            (false, false) => NameTarget::ClassVariable,
        };
        Some(target)
    }
}

fn is_preload_call(expression: &Expression) -> bool {
    matches!(expression, Expression::Call(call) if call.function_name() == Some("preload"))
}

impl<'a> Visitor<'a> for NameCollector<'a> {
    fn visit(&mut self, node: NodeRef<'a>) -> Flow {
        match node {
            NodeRef::Class(class) => {
                if std::ptr::eq(class, self.root) {
                    if let Some(name) = &class.class_name {
                        let position = class.class_name_position.unwrap_or(class.position);
                        self.push(NameTarget::ClassName, name, position);
                    }
                } else {
                    self.push(NameTarget::SubClass, &class.name, class.position);
                }
            }
            NodeRef::Function(function) => {
                self.push(NameTarget::Function, &function.name, function.position);
                for parameter in &function.parameters {
                    self.push(NameTarget::FunctionArgument, &parameter.name, parameter.position);
                }
                self.function_depth += 1;
            }
            NodeRef::Statement(statement) => match statement {
                Statement::Var(decl) => {
                    if let Some(target) = self.classify_var(decl) {
                        self.push(target, &decl.name, decl.position);
                    }
                }
                Statement::For(stmt) => {
                    self.push(NameTarget::LoopVariable, &stmt.iterator, stmt.position);
                }
                Statement::Signal(signal) => {
                    self.push(NameTarget::Signal, &signal.name, signal.position);
                }
                Statement::Enum(decl) => {
                    if let Some(name) = &decl.name {
                        self.push(NameTarget::Enum, name, decl.position);
                    }
                    for variant in &decl.variants {
                        self.push(NameTarget::EnumElement, &variant.name, variant.position);
                    }
                }
                _ => {}
            },
            _ => {}
        }
        Flow::Continue
    }

    fn leave(&mut self, node: NodeRef<'a>) {
        if let NodeRef::Function(_) = node {
            self.function_depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{check, check_with, lines, settings};
    use rstest::rstest;

    fn rule(target: NameTarget) -> NameRule {
        NameRule::from_settings(target, &settings()).unwrap()
    }

    const SAMPLE: &str = "\
class_name player_controller
signal HitWall
enum state { idle, RUNNING }
const max_speed = 10
const scene = preload(\"res://s.tscn\")
const Scene = preload(\"res://s.tscn\")
var Health = 3
var texture_Loader = load(\"res://t.png\")

func DoThing(Arg, _ok):
\tvar Local = 1
\tvar ok_local = 2
\tvar icon = preload(\"res://i.png\")
\tvar Anything = load(\"res://a.png\")
\tfor I in range(3):
\t\tpass

class inner_class:
\tvar good_name = 1
";

    #[rstest]
    #[case(NameTarget::ClassName, vec!["1:Class name \"player_controller\" is not valid"])]
    #[case(NameTarget::Signal, vec!["2:Signal name \"HitWall\" is not valid"])]
    #[case(NameTarget::Enum, vec!["3:Enum name \"state\" is not valid"])]
    #[case(NameTarget::EnumElement, vec!["3:Enum element name \"idle\" is not valid"])]
    #[case(NameTarget::Constant, vec!["4:Constant name \"max_speed\" is not valid"])]
    #[case(NameTarget::LoadConstant, vec!["5:Load constant name \"scene\" is not valid"])]
    #[case(NameTarget::ClassVariable, vec!["7:Class variable name \"Health\" is not valid"])]
    #[case(
        NameTarget::ClassLoadVariable,
        vec!["8:Class load variable name \"texture_Loader\" is not valid"]
    )]
    #[case(NameTarget::Function, vec!["10:Function name \"DoThing\" is not valid"])]
    #[case(NameTarget::FunctionArgument, vec!["10:Function argument name \"Arg\" is not valid"])]
    #[case(NameTarget::FunctionVariable, vec!["11:Function variable name \"Local\" is not valid"])]
    #[case(
        NameTarget::FunctionPreloadVariable,
        vec!["13:Function preload variable name \"icon\" is not valid"]
    )]
    #[case(NameTarget::LoopVariable, vec!["15:Loop variable name \"I\" is not valid"])]
    #[case(NameTarget::SubClass, vec!["18:Class name \"inner_class\" is not valid"])]
    fn test_name_rules(#[case] target: NameTarget, #[case] expected: Vec<&str>) {
        let problems = check(&rule(target), SAMPLE);
        assert_eq!(lines(&problems), expected);
        assert!(problems.iter().all(|p| p.rule == target.rule_name()));
    }

    #[test]
    fn test_conventional_names_pass() {
        let source = "\
class_name Player
signal health_changed(old, new)
enum State { IDLE, RUNNING }
const MAX_SPEED = 10
const Bullet = preload(\"res://bullet.tscn\")
var health = 3
var _cache = {}

func _ready():
\tvar count = 0
\tfor i in range(3):
\t\tcount += i

class Inner:
\tvar value = 1
";
        for target in NameTarget::ALL {
            assert!(check(&rule(target), source).is_empty(), "{:?}", target);
        }
    }

    #[test]
    fn test_custom_pattern() {
        let mut settings = settings();
        settings.function_name = "[a-z]+".to_string();
        let rule = NameRule::from_settings(NameTarget::Function, &settings).unwrap();
        let problems = check_with(&rule, "func ok():\n\tpass\nfunc not_ok():\n\tpass\n", &settings);
        assert_eq!(lines(&problems), vec!["3:Function name \"not_ok\" is not valid"]);
    }

    #[test]
    fn test_pattern_must_match_whole_name() {
        let rule = NameRule::new(NameTarget::Signal, "[a-z]+").unwrap();
        let problems = check(&rule, "signal abc\nsignal abc1\n");
        assert_eq!(lines(&problems), vec!["2:Signal name \"abc1\" is not valid"]);
    }
}
