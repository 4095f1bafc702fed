//! GDScript linter
//!
//! A [`Linter`] parses a file in panic mode, runs every enabled [`Rule`] over
//! the tree (and, for formatting rules, over the raw text), drops the problems
//! silenced by `# gdlint:` comment [`directives`] and returns the rest sorted by
//! position. Syntax diagnostics are reported as `syntax-error` problems and are
//! never silenced.
//!
//! ```text
//! let config = gdtoolkit_config::load_defaults()?;
//! let linter = Linter::new(config.lint)?;
//! for problem in linter.lint("func BadName():\n\tpass\n") {
//!     println!("{problem}");
//! }
//! ```

pub mod directives;
pub mod linter;
pub mod problem;
pub mod rules;

pub use directives::Directives;
pub use linter::{LintContext, LintError, Linter, Rule, SYNTAX_ERROR_RULE};
pub use problem::{Problem, Severity};
