//! Token parsing for one level of the command tree
//!
//! Leaves declare their options to clap and get typed values back together
//! with the leftover positional tokens. Routers own no options, so they scan
//! tolerantly: anything that looks like an option is skipped and the rest is
//! kept as positional keywords.

use crate::config::{OptionSpec, ValueType};
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::collections::HashMap;
use std::fmt;

/// Id of the clap argument collecting positional tokens
pub(crate) const POSITIONALS: &str = "__positionals";

/// Resolved value of one option
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Float(f) => Some(*f),
            OptionValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Float(x) => write!(f, "{}", x),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

/// Resolved options keyed by flag
pub type OptionMap = HashMap<String, OptionValue>;

/// Result of parsing an argument vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTokens {
    positionals: Vec<String>,
    values: OptionMap,
}

impl ParsedTokens {
    /// Unconsumed positional tokens in their original order
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn value(&self, flag: &str) -> Option<&OptionValue> {
        self.values.get(flag)
    }

    pub fn into_parts(self) -> (Vec<String>, OptionMap) {
        (self.positionals, self.values)
    }
}

/// Parser for the tokens seen at one node
#[derive(Debug, Clone)]
pub struct TokenParser {
    name: String,
    options: Vec<OptionSpec>,
    /// Options known only for their arity in tolerant mode
    recognized: Vec<OptionSpec>,
    allow_unknown: bool,
}

impl TokenParser {
    pub fn new(name: impl Into<String>) -> Self {
        TokenParser {
            name: name.into(),
            options: Vec::new(),
            recognized: Vec::new(),
            allow_unknown: false,
        }
    }

    /// Declare an option whose value ends up in the parsed result
    pub fn register_option(&mut self, option: &OptionSpec) {
        self.options.push(option.clone());
    }

    /// Teach the tolerant scan whether `option` swallows the next token,
    /// without declaring it
    pub fn recognize_option(&mut self, option: &OptionSpec) {
        self.recognized.push(option.clone());
    }

    /// Skip unrecognized options instead of rejecting them
    pub fn allow_unknown_options(&mut self, allow: bool) {
        self.allow_unknown = allow;
    }

    pub fn parse(&self, argv: &[String]) -> Result<ParsedTokens, clap::Error> {
        if self.allow_unknown {
            return Ok(self.scan(argv));
        }

        let matches = self.command().try_get_matches_from(argv)?;

        let positionals = matches
            .get_many::<String>(POSITIONALS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let values = self
            .options
            .iter()
            .filter_map(|option| {
                resolve(option, &matches).map(|value| (option.flag.clone(), value))
            })
            .collect();

        Ok(ParsedTokens { positionals, values })
    }

    fn command(&self) -> Command {
        let positionals = Arg::new(POSITIONALS)
            .action(ArgAction::Append)
            .value_parser(value_parser!(String))
            .allow_negative_numbers(true);

        let mut cmd = Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(positionals);

        for option in &self.options {
            cmd = cmd.arg(option_arg(option));
        }

        cmd
    }

    /// Tolerant mode: keep positional tokens, skip everything option-like
    fn scan(&self, argv: &[String]) -> ParsedTokens {
        let mut positionals = Vec::new();
        let mut tokens = argv.iter();

        while let Some(token) = tokens.next() {
            if token == "--" {
                positionals.extend(tokens.cloned());
                break;
            }

            if is_option_like(token) {
                if self.swallows_value(token, tokens.as_slice().first()) {
                    tokens.next();
                }
                continue;
            }

            positionals.push(token.clone());
        }

        ParsedTokens {
            positionals,
            values: OptionMap::new(),
        }
    }

    /// Whether the option-like `token` takes `next` as its value, the way
    /// clap reads it at the leaf
    fn swallows_value(&self, token: &str, next: Option<&String>) -> bool {
        match (self.value_option(token), next) {
            (Some(option), Some(next)) => option.value_required || !is_option_like(next),
            _ => false,
        }
    }

    /// The known value option of `token` whose value would be the next token
    fn value_option(&self, token: &str) -> Option<&OptionSpec> {
        let known = || self.recognized.iter().chain(self.options.iter());

        if let Some(long) = token.strip_prefix("--") {
            if long.contains('=') {
                return None;
            }
            return known()
                .find(|option| option.flag == long)
                .filter(|option| option.takes_value());
        }

        // In a bundle such as `-fr`, the first value option owns the rest of
        // the token; its value only moves to the next token when it ends the
        // bundle
        let shorts = token.strip_prefix('-')?;
        for (index, shortcut) in shorts.char_indices() {
            let value_option = known()
                .find(|option| option.shortcut == Some(shortcut) && option.takes_value());
            if let Some(option) = value_option {
                return (index + shortcut.len_utf8() == shorts.len()).then_some(option);
            }
        }
        None
    }
}

fn is_option_like(token: &str) -> bool {
    match token.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// The clap argument for an option
fn option_arg(option: &OptionSpec) -> Arg {
    let mut arg = Arg::new(option.flag.clone())
        .long(option.flag.clone())
        .help(option.description.clone());

    if let Some(shortcut) = option.shortcut {
        arg = arg.short(shortcut);
    }

    let Some(placeholder) = &option.value_placeholder else {
        return arg.action(ArgAction::SetTrue);
    };

    arg = arg
        .value_name(placeholder.clone())
        .action(ArgAction::Set)
        .num_args(if option.value_required { 1..=1 } else { 0..=1 });

    arg = match option.value_type {
        ValueType::String => arg.value_parser(value_parser!(String)),
        ValueType::Integer => arg.value_parser(value_parser!(i64)).allow_negative_numbers(true),
        ValueType::Float => arg.value_parser(value_parser!(f64)).allow_negative_numbers(true),
        ValueType::Boolean => arg.value_parser(value_parser!(bool)),
    };

    if let Some(default) = &option.default {
        arg = arg.default_value(default.clone());
    }

    arg
}

/// Typed value of `option`, if it was given or has a default
fn resolve(option: &OptionSpec, matches: &ArgMatches) -> Option<OptionValue> {
    let id = option.flag.as_str();

    if !option.takes_value() {
        return matches.get_flag(id).then_some(OptionValue::Bool(true));
    }

    let value = match option.value_type {
        ValueType::String => matches.get_one::<String>(id).cloned().map(OptionValue::Text),
        ValueType::Integer => matches.get_one::<i64>(id).copied().map(OptionValue::Integer),
        ValueType::Float => matches.get_one::<f64>(id).copied().map(OptionValue::Float),
        ValueType::Boolean => matches.get_one::<bool>(id).copied().map(OptionValue::Bool),
    };

    // Optional-value options given bare carry no value
    value.or_else(|| {
        (matches.value_source(id) == Some(ValueSource::CommandLine)).then_some(OptionValue::Bool(true))
    })
}
