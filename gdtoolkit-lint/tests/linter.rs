//! Linting whole files with the default rule set

use gdtoolkit_config::{LintConfig, Loader};
use gdtoolkit_lint::{Linter, Severity, SYNTAX_ERROR_RULE};

fn default_config() -> LintConfig {
    gdtoolkit_config::load_defaults().unwrap().lint
}

fn render(linter: &Linter, source: &str) -> String {
    linter
        .lint(source)
        .iter()
        .map(|problem| problem.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_reports_sorted_problems() {
    let linter = Linter::new(default_config()).unwrap();
    let source = "extends Node\n\nfunc BadName(unused):\n\tvar x = 1  \n\tx == x\n\treturn x\n";
    insta::assert_snapshot!(render(&linter, source), @r###"
    warning: Function name "BadName" is not valid (function-name) at line 3, column 1
    warning: Unused argument 'unused' (unused-argument) at line 3, column 14
    warning: Trailing whitespace(s) (trailing-whitespace) at line 4, column 11
    warning: Comparison of identical expressions (comparison-with-itself) at line 5, column 2
    warning: Expression is not assigned to a variable or used (expression-not-assigned) at line 5, column 2
    "###);
}

#[test]
fn test_clean_file_has_no_problems() {
    let linter = Linter::new(default_config()).unwrap();
    let source = "\
class_name Player
extends CharacterBody2D

signal died

const MAX_HEALTH = 100

@export var speed: float = 300.0
var health := MAX_HEALTH


func take_damage(amount: int) -> void:
\thealth -= amount
\tif health <= 0:
\t\tdied.emit()
";
    assert_eq!(linter.lint(source), vec![]);
}

#[test]
fn test_directives_silence_rules_by_line() {
    let linter = Linter::new(default_config()).unwrap();
    let source = "\
# gdlint:ignore=function-name
func A():
\tpass

# gdlint:disable=function-name
func B():
\tpass

# gdlint:enable=function-name
func C():
\tpass
";
    let problems = linter.lint(source);
    let lines: Vec<_> = problems.iter().map(|p| (p.rule.as_str(), p.position.line)).collect();
    assert_eq!(lines, vec![("function-name", 10)]);
}

#[test]
fn test_disabled_rules_from_lintrc() {
    let dir = tempfile::tempdir().unwrap();
    let lintrc = dir.path().join(".gdlintrc");
    std::fs::write(&lintrc, "disabled_rules:\n  - function-name\n").unwrap();
    let config = Loader::new().with_lintrc(&lintrc).unwrap().build().unwrap();

    let linter = Linter::new(config.lint).unwrap();
    assert!(linter.lint("func A():\n\tpass\n").is_empty());
}

#[test]
fn test_syntax_errors_are_reported_alongside_rule_problems() {
    let linter = Linter::new(default_config()).unwrap();
    // gdlint directives never hide syntax errors
    let source = "# gdlint:ignore=syntax-error\nvar a = )\nfunc Bad():\n\tpass\n";
    let problems = linter.lint(source);
    assert_eq!(problems.len(), 2, "{:?}", problems);
    assert_eq!(problems[0].rule, SYNTAX_ERROR_RULE);
    assert_eq!(problems[0].severity, Severity::Error);
    assert_eq!(problems[1].rule, "function-name");
}

#[test]
fn test_lint_file_names_root_class() {
    let mut config = default_config();
    config.rule_settings.max_public_methods = 0;
    let linter = Linter::new(config).unwrap();
    let problems = linter.lint_file("scripts/player.gd", "func a():\n\tpass\n");
    let messages: Vec<_> = problems.iter().map(|p| p.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Global scope class has more than 0 public methods (functions)"]
    );
}
