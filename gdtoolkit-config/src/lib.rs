//! Shared configuration loader for the GDScript toolkit.
//!
//! `defaults/gdtoolkit.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user files on top of
//! those defaults via [`Loader`] before deserializing into [`ToolkitConfig`].
//!
//! Two kinds of user file are understood:
//!
//! - toolkit files (`gdtoolkit.toml`, or `.json` / `.yaml`) with the same
//!   layout as the defaults;
//! - lint rc files (`gdlintrc`, `.gdlintrc`, `gdlintrc.json`, `.gdlintrc.json`)
//!   holding just the `[lint]` table, written in JSON or YAML. [`find_lintrc`]
//!   looks for one in a directory and its ancestors.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/gdtoolkit.default.toml");

/// File names probed by [`find_lintrc`], in order.
pub const LINTRC_NAMES: &[&str] = &["gdlintrc.json", ".gdlintrc.json", "gdlintrc", ".gdlintrc"];

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Lintrc {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Top-level configuration consumed by the toolkit.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolkitConfig {
    pub format: FormatConfig,
    pub lint: LintConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    Tabs,
    Spaces,
}

/// Mirrors the knobs exposed by the formatter.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    pub indent: IndentStyle,
    pub indent_width: usize,
    pub max_line_length: usize,
}

impl FormatConfig {
    /// The text of one indentation level.
    pub fn indent_string(&self) -> String {
        match self.indent {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces => " ".repeat(self.indent_width),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    pub rule_settings: RuleSettings,
}

impl LintConfig {
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        !self.disabled_rules.iter().any(|disabled| disabled == rule)
    }
}

/// Thresholds and naming patterns, keyed by the rule that reads them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleSettings {
    pub max_line_length: usize,
    pub tab_characters: usize,
    pub max_file_lines: usize,
    pub max_public_methods: usize,
    pub max_returns: usize,
    pub function_arguments_number: usize,

    pub function_name: String,
    pub sub_class_name: String,
    pub class_name: String,
    pub signal_name: String,
    pub enum_name: String,
    pub enum_element_name: String,
    pub loop_variable_name: String,
    pub function_argument_name: String,
    pub function_variable_name: String,
    pub function_preload_variable_name: String,
    pub constant_name: String,
    pub load_constant_name: String,
    pub class_variable_name: String,
    pub class_load_variable_name: String,
}

impl RuleSettings {
    /// The naming pattern configured for a name rule.
    pub fn name_pattern(&self, rule: &str) -> Option<&str> {
        let pattern = match rule {
            "function-name" => &self.function_name,
            "sub-class-name" => &self.sub_class_name,
            "class-name" => &self.class_name,
            "signal-name" => &self.signal_name,
            "enum-name" => &self.enum_name,
            "enum-element-name" => &self.enum_element_name,
            "loop-variable-name" => &self.loop_variable_name,
            "function-argument-name" => &self.function_argument_name,
            "function-variable-name" => &self.function_variable_name,
            "function-preload-variable-name" => &self.function_preload_variable_name,
            "constant-name" => &self.constant_name,
            "load-constant-name" => &self.load_constant_name,
            "class-variable-name" => &self.class_variable_name,
            "class-load-variable-name" => &self.class_load_variable_name,
            _ => return None,
        };
        Some(pattern.as_str())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a toolkit configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = File::from(path).format(format_for(path)).required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional toolkit configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = File::from(path).format(format_for(path)).required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a lint rc file: JSON or YAML holding `disabled_rules` and
    /// `rule_settings`, applied under the `lint` table.
    pub fn with_lintrc(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let lintrc_error = |source| ConfigLoadError::Lintrc {
            path: path.to_path_buf(),
            source,
        };
        let value: serde_yaml::Value = serde_yaml::from_str(&text).map_err(lintrc_error)?;
        if value.is_null() {
            tracing::debug!(path = %path.display(), "empty lint rc file");
            return Ok(self);
        }
        let mut wrapped = serde_yaml::Mapping::new();
        wrapped.insert(serde_yaml::Value::from("lint"), value);
        let yaml = serde_yaml::to_string(&wrapped).map_err(lintrc_error)?;
        tracing::debug!(path = %path.display(), "layering lint rc file");
        self.builder = self.builder.add_source(File::from_str(&yaml, FileFormat::Yaml));
        Ok(self)
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigLoadError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ToolkitConfig, ConfigLoadError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn format_for(path: &Path) -> FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => FileFormat::Json,
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        _ => FileFormat::Toml,
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ToolkitConfig, ConfigLoadError> {
    Loader::new().build()
}

/// Find the nearest lint rc file in `start` or any of its ancestors.
pub fn find_lintrc(start: impl AsRef<Path>) -> Option<PathBuf> {
    start.as_ref().ancestors().find_map(|dir| {
        LINTRC_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
