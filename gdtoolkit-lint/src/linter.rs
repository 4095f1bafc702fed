//! Lint driver and the [`Rule`] trait

use crate::directives::Directives;
use crate::problem::Problem;
use crate::rules;
use gdtoolkit_config::{LintConfig, RuleSettings};
use gdtoolkit_parser::{parse_file, Diagnostic, Tree};
use std::path::Path;
use thiserror::Error;

/// Rule name carried by problems that come from parse diagnostics.
pub const SYNTAX_ERROR_RULE: &str = "syntax-error";

#[derive(Debug, Error)]
pub enum LintError {
    #[error("invalid naming pattern for {rule}: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// What a rule gets to look at.
pub struct LintContext<'a> {
    pub tree: &'a Tree,
    pub source: &'a str,
    pub settings: &'a RuleSettings,
}

/// A single check.
///
/// Rules return every problem they see; the [`Linter`] applies configuration
/// and directives afterwards.
pub trait Rule: Send + Sync {
    /// Kebab-case name used in configuration and directives
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn check(&self, context: &LintContext<'_>) -> Vec<Problem>;
}

pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
    config: LintConfig,
}

impl Linter {
    /// A linter running the default rule set under `config`.
    pub fn new(config: LintConfig) -> Result<Self, LintError> {
        let rules = rules::default_rules(&config.rule_settings)?;
        Ok(Self { rules, config })
    }

    /// A linter with no rules registered.
    pub fn empty(config: LintConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Register a rule; it runs after the ones already registered.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Parse and lint a source file.
    pub fn lint(&self, source: &str) -> Vec<Problem> {
        let (tree, diagnostics) = gdtoolkit_parser::parse(source);
        self.lint_tree(&tree, &diagnostics, source)
    }

    /// Like [`Linter::lint`], naming the root class after `path`.
    pub fn lint_file(&self, path: impl AsRef<Path>, source: &str) -> Vec<Problem> {
        let (tree, diagnostics) = parse_file(path, source);
        self.lint_tree(&tree, &diagnostics, source)
    }

    /// Lint an already parsed tree. `diagnostics` are reported as syntax errors.
    pub fn lint_tree(&self, tree: &Tree, diagnostics: &[Diagnostic], source: &str) -> Vec<Problem> {
        let context = LintContext {
            tree,
            source,
            settings: &self.config.rule_settings,
        };
        let directives = Directives::parse(source);

        let mut problems: Vec<Problem> = diagnostics
            .iter()
            .map(|diagnostic| {
                Problem::error(diagnostic.position, diagnostic.to_string(), SYNTAX_ERROR_RULE)
            })
            .collect();

        let mut suppressed = 0;
        for rule in self.rules() {
            if !self.config.is_rule_enabled(rule.name()) {
                tracing::trace!(rule = rule.name(), "rule disabled by configuration");
                continue;
            }
            let found = rule.check(&context);
            tracing::trace!(rule = rule.name(), problems = found.len(), "rule checked");
            for problem in found {
                if directives.allows(&problem.rule, problem.position.line) {
                    problems.push(problem);
                } else {
                    suppressed += 1;
                }
            }
        }
        if suppressed > 0 {
            tracing::debug!(suppressed, "problems silenced by directives");
        }

        problems.sort_by(|a, b| {
            a.position
                .line
                .cmp(&b.position.line)
                .then(a.position.column.cmp(&b.position.column))
                .then_with(|| a.rule.cmp(&b.rule))
        });
        problems
    }
}
