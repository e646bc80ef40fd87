//! Core configuration types
//!
//! This module defines the declarative description of a command tree: the
//! positional arguments and options of every command, its help text, and the
//! handler that runs once a command line has been routed to it.

use crate::dispatch::Invocation;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Code executed when a leaf command is invoked
pub type Handler = Arc<dyn Fn(&Invocation) -> anyhow::Result<()> + Send + Sync>;

/// Predicate deciding whether a positional value is acceptable
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Rewrites an accepted positional value before it reaches the handler
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Help text that is either a single line or several lines
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Text {
    Line(String),
    Lines(Vec<String>),
}

impl Text {
    pub fn is_empty(&self) -> bool {
        match self {
            Text::Line(line) => line.is_empty(),
            Text::Lines(lines) => lines.is_empty(),
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Text::Line(String::new())
    }
}

impl From<&str> for Text {
    fn from(line: &str) -> Self {
        Text::Line(line.to_string())
    }
}

impl From<String> for Text {
    fn from(line: String) -> Self {
        Text::Line(line)
    }
}

impl From<Vec<String>> for Text {
    fn from(lines: Vec<String>) -> Self {
        Text::Lines(lines)
    }
}

impl From<Vec<&str>> for Text {
    fn from(lines: Vec<&str>) -> Self {
        Text::Lines(lines.into_iter().map(String::from).collect())
    }
}

/// A line of example text; nested lists are indented one level deeper
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Example {
    Line(String),
    Nested(Vec<Example>),
}

impl From<&str> for Example {
    fn from(line: &str) -> Self {
        Example::Line(line.to_string())
    }
}

impl From<Vec<&str>> for Example {
    fn from(lines: Vec<&str>) -> Self {
        Example::Nested(lines.into_iter().map(Example::from).collect())
    }
}

/// Type hint for option values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    #[serde(alias = "int")]
    Integer,
    #[serde(alias = "number")]
    Float,
    #[serde(alias = "bool")]
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A positional argument definition
#[derive(Clone, Deserialize)]
pub struct ArgumentSpec {
    /// Name shown in usage lines
    pub name: String,

    /// Description for help text
    #[serde(default)]
    pub description: Text,

    /// Required argument
    #[serde(default)]
    pub required: bool,

    #[serde(skip)]
    pub validator: Option<Validator>,

    #[serde(skip)]
    pub formatter: Option<Formatter>,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        ArgumentSpec {
            name: name.into(),
            description: Text::default(),
            required: false,
            validator: None,
            formatter: None,
        }
    }

    pub fn description(mut self, description: impl Into<Text>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn validate(mut self, validator: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn format(mut self, formatter: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Usage token: `<name>` when required, `[name]` otherwise
    pub fn token(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// An option (flag) definition
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OptionSpec {
    /// Long name, used as `--flag` and as the key of the resolved options
    pub flag: String,

    /// Single character used as `-c`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<char>,

    /// Description for help text
    #[serde(default)]
    pub description: String,

    /// Whether a value must follow the flag
    #[serde(rename = "value-required", alias = "valueRequired", default)]
    pub value_required: bool,

    /// Placeholder shown for the value; options without one are switches
    #[serde(rename = "value", alias = "valuePlaceholder", default, skip_serializing_if = "Option::is_none")]
    pub value_placeholder: Option<String>,

    /// Value type hint
    #[serde(rename = "type", default)]
    pub value_type: ValueType,

    /// Default value
    #[serde(
        alias = "defaultValue",
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
}

impl OptionSpec {
    pub fn new(flag: impl Into<String>) -> Self {
        OptionSpec {
            flag: flag.into(),
            shortcut: None,
            description: String::new(),
            value_required: false,
            value_placeholder: None,
            value_type: ValueType::String,
            default: None,
        }
    }

    pub fn short(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make the option take a value shown as `placeholder`
    pub fn value(mut self, placeholder: impl Into<String>) -> Self {
        self.value_placeholder = Some(placeholder.into());
        self
    }

    pub fn value_required(mut self, required: bool) -> Self {
        self.value_required = required;
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn takes_value(&self) -> bool {
        self.value_placeholder.is_some()
    }

    /// CLI syntax, e.g. `-r, --region <name>`
    pub fn syntax(&self) -> String {
        let mut syntax = match self.shortcut {
            Some(shortcut) => format!("-{}, --{}", shortcut, self.flag),
            None => format!("--{}", self.flag),
        };

        if let Some(placeholder) = &self.value_placeholder {
            if self.value_required {
                syntax.push_str(&format!(" <{}>", placeholder));
            } else {
                syntax.push_str(&format!(" [{}]", placeholder));
            }
        }

        syntax
    }
}

/// Declarative description of one command and, recursively, its subcommands
#[derive(Clone, Default, Deserialize)]
pub struct CommandConfig {
    /// Description for help text
    #[serde(default)]
    pub description: Text,

    /// Positional arguments (leaf commands only)
    #[serde(default, alias = "_arguments")]
    pub arguments: Vec<ArgumentSpec>,

    /// Options, inherited by every subcommand
    #[serde(default, alias = "_options")]
    pub options: Vec<OptionSpec>,

    /// Example lines for help text
    #[serde(default, alias = "_examples")]
    pub examples: Vec<Example>,

    /// Subcommands in declaration order
    #[serde(default, deserialize_with = "deserialize_subcommands")]
    pub subcommands: Vec<(String, CommandConfig)>,

    #[serde(skip)]
    pub exec: Option<Handler>,
}

impl CommandConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<Text>) -> Self {
        self.description = description.into();
        self
    }

    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn example(mut self, example: impl Into<Example>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn subcommand(mut self, keyword: impl Into<String>, config: CommandConfig) -> Self {
        self.subcommands.push((keyword.into(), config));
        self
    }

    pub fn exec(
        mut self,
        handler: impl Fn(&Invocation) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.exec = Some(Arc::new(handler));
        self
    }

    /// Find a command by its space-separated keyword path; the empty path is
    /// this command
    pub fn find(&self, path: &str) -> Option<&CommandConfig> {
        path.split_whitespace().try_fold(self, |config, keyword| {
            config
                .subcommands
                .iter()
                .find(|(name, _)| name == keyword)
                .map(|(_, sub)| sub)
        })
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut CommandConfig> {
        path.split_whitespace().try_fold(self, |config, keyword| {
            config
                .subcommands
                .iter_mut()
                .find(|(name, _)| name == keyword)
                .map(|(_, sub)| sub)
        })
    }

    pub fn argument_mut(&mut self, name: &str) -> Option<&mut ArgumentSpec> {
        self.arguments.iter_mut().find(|arg| arg.name == name)
    }

    /// Attach a handler to the command at `path`
    pub fn bind(
        &mut self,
        path: &str,
        handler: impl Fn(&Invocation) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> ConfigResult<()> {
        let config = self
            .find_mut(path)
            .ok_or_else(|| ConfigError::CommandNotFound(path.to_string()))?;
        config.exec = Some(Arc::new(handler));
        Ok(())
    }

    /// Attach a validator to the argument `name` of the command at `path`
    pub fn bind_validator(
        &mut self,
        path: &str,
        name: &str,
        validator: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> ConfigResult<()> {
        self.argument_at(path, name)?.validator = Some(Arc::new(validator));
        Ok(())
    }

    /// Attach a formatter to the argument `name` of the command at `path`
    pub fn bind_formatter(
        &mut self,
        path: &str,
        name: &str,
        formatter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> ConfigResult<()> {
        self.argument_at(path, name)?.formatter = Some(Arc::new(formatter));
        Ok(())
    }

    fn argument_at(&mut self, path: &str, name: &str) -> ConfigResult<&mut ArgumentSpec> {
        self.find_mut(path)
            .ok_or_else(|| ConfigError::CommandNotFound(path.to_string()))?
            .argument_mut(name)
            .ok_or_else(|| ConfigError::ArgumentNotFound {
                command: path.to_string(),
                name: name.to_string(),
            })
    }
}

impl fmt::Debug for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandConfig")
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .field("examples", &self.examples)
            .field("subcommands", &self.subcommands)
            .field("exec", &self.exec.is_some())
            .finish()
    }
}

/// Custom deserializer for subcommands that keeps the mapping's order
fn deserialize_subcommands<'de, D>(deserializer: D) -> Result<Vec<(String, CommandConfig)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Mapping(map) => {
            let mut subcommands = Vec::with_capacity(map.len());
            for (key, value) in map {
                let keyword = match key {
                    Value::String(s) => s,
                    _ => return Err(D::Error::custom("subcommand keywords must be strings")),
                };
                let config = if value.is_null() {
                    CommandConfig::default()
                } else {
                    CommandConfig::deserialize(value).map_err(D::Error::custom)?
                };
                subcommands.push((keyword, config));
            }
            Ok(subcommands)
        }
        // Null or not present
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("subcommands must be a mapping")),
    }
}

/// Custom deserializer for default values written as any YAML scalar
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Null => Ok(None),
        _ => Err(D::Error::custom("default must be a string, number, or boolean")),
    }
}
