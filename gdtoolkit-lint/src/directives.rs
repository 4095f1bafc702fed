//! `# gdlint:` comment directives
//!
//! - `# gdlint:ignore=rule-a,rule-b` silences the listed rules on the next line
//!   when the comment stands alone, or on its own line when it trails code;
//! - `# gdlint:disable=rule` silences a rule from that line onward;
//! - `# gdlint:enable=rule` lifts an earlier `disable` from that line onward.
//!
//! Directives are read from comment tokens, so `#` inside strings never counts.

use gdtoolkit_parser::{tokenize, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*gdlint\s*:\s*(ignore|disable|enable)\s*=\s*([^#\n]+)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Ignore,
    Disable,
    Enable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub rules: Vec<String>,
    /// Line of the comment.
    pub line: usize,
    /// The comment has nothing but whitespace before it.
    pub standalone: bool,
}

/// Every directive in `source`, in order.
pub fn find_directives(source: &str) -> Vec<Directive> {
    tokenize(source)
        .into_iter()
        .filter(|token| token.kind == TokenKind::Comment)
        .filter_map(|token| {
            let captures = DIRECTIVE_REGEX.captures(&token.literal)?;
            let kind = match &captures[1] {
                "ignore" => DirectiveKind::Ignore,
                "disable" => DirectiveKind::Disable,
                _ => DirectiveKind::Enable,
            };
            let line_start = source[..token.offset].rfind('\n').map_or(0, |i| i + 1);
            Some(Directive {
                kind,
                rules: parse_rule_list(&captures[2]),
                line: token.line,
                standalone: source[line_start..token.offset].trim().is_empty(),
            })
        })
        .collect()
}

fn parse_rule_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(str::to_string)
        .collect()
}

/// Which rules are silenced on which lines.
#[derive(Debug, Clone, Default)]
pub struct Directives {
    ignored: HashMap<usize, HashSet<String>>,
    /// Per rule, `(line, enabled)` switches in source order.
    switches: HashMap<String, Vec<(usize, bool)>>,
}

impl Directives {
    pub fn parse(source: &str) -> Self {
        let mut directives = Self::default();
        for directive in find_directives(source) {
            match directive.kind {
                DirectiveKind::Ignore => {
                    let line = if directive.standalone {
                        directive.line + 1
                    } else {
                        directive.line
                    };
                    directives
                        .ignored
                        .entry(line)
                        .or_default()
                        .extend(directive.rules);
                }
                DirectiveKind::Disable | DirectiveKind::Enable => {
                    let enabled = directive.kind == DirectiveKind::Enable;
                    for rule in directive.rules {
                        directives
                            .switches
                            .entry(rule)
                            .or_default()
                            .push((directive.line, enabled));
                    }
                }
            }
        }
        directives
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty() && self.switches.is_empty()
    }

    /// Whether `rule` may report on `line`.
    pub fn allows(&self, rule: &str, line: usize) -> bool {
        if self
            .ignored
            .get(&line)
            .is_some_and(|rules| rules.contains(rule))
        {
            return false;
        }
        self.switches.get(rule).map_or(true, |switches| {
            switches
                .iter()
                .take_while(|(switch_line, _)| *switch_line <= line)
                .last()
                .map_or(true, |(_, enabled)| *enabled)
        })
    }
}
