//! Configuration validation
//!
//! This module provides structural validation of a command tree before it is
//! built into nodes.

use crate::config::types::{CommandConfig, OptionSpec, ValueType};
use crate::dispatch::tokens::POSITIONALS;
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Flags consumed by the dispatcher's help handling or the token parser
pub const RESERVED_FLAGS: &[&str] = &["help", POSITIONALS];

/// Shortcuts consumed by the dispatcher's help handling
pub const RESERVED_SHORTCUTS: &[char] = &['h'];

/// Validate a complete command tree rooted at `executable`
pub fn validate_config(executable: &str, config: &CommandConfig) -> ConfigResult<()> {
    validate_command(executable, config)
}

/// Validate a single command and, recursively, its subcommands
fn validate_command(path: &str, config: &CommandConfig) -> ConfigResult<()> {
    if !config.arguments.is_empty() && !config.subcommands.is_empty() {
        return Err(ConfigError::ArgumentsWithSubcommands(path.to_string()));
    }

    validate_arguments(path, config)?;
    validate_options(path, &config.options)?;

    let mut keywords = HashSet::new();
    for (keyword, sub) in &config.subcommands {
        let invalid = |reason: &str| ConfigError::InvalidKeyword {
            command: path.to_string(),
            keyword: keyword.clone(),
            reason: reason.to_string(),
        };

        if keyword.is_empty() || keyword.chars().any(char::is_whitespace) {
            return Err(invalid("keywords must be non-empty and contain no whitespace"));
        }
        if keyword.starts_with('-') {
            return Err(invalid("keywords cannot start with '-'"));
        }
        if !keywords.insert(keyword.as_str()) {
            return Err(invalid("keyword is declared twice"));
        }

        validate_command(&format!("{} {}", path, keyword), sub)?;
    }

    Ok(())
}

fn validate_arguments(path: &str, config: &CommandConfig) -> ConfigResult<()> {
    let mut names = HashSet::new();

    for arg in &config.arguments {
        let invalid = |reason: &str| ConfigError::InvalidArgument {
            command: path.to_string(),
            name: arg.name.clone(),
            reason: reason.to_string(),
        };

        if arg.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !names.insert(arg.name.as_str()) {
            return Err(invalid("name is declared twice"));
        }
    }

    Ok(())
}

fn validate_options(path: &str, options: &[OptionSpec]) -> ConfigResult<()> {
    let mut flags = HashSet::new();
    let mut shortcuts = HashSet::new();

    for option in options {
        let invalid = |reason: String| ConfigError::InvalidOption {
            command: path.to_string(),
            flag: option.flag.clone(),
            reason,
        };

        if option.flag.is_empty() || option.flag.starts_with('-') {
            return Err(invalid("flags must be non-empty and written without dashes".to_string()));
        }
        if option.flag.chars().any(|c| c.is_whitespace() || c == '=') {
            return Err(invalid("flags cannot contain whitespace or '='".to_string()));
        }
        if RESERVED_FLAGS.contains(&option.flag.as_str()) {
            return Err(invalid(format!("--{} is reserved", option.flag)));
        }
        if !flags.insert(option.flag.as_str()) {
            return Err(invalid("flag is declared twice".to_string()));
        }

        if let Some(shortcut) = option.shortcut {
            // `-1` and friends are read as negative numbers
            if !shortcut.is_ascii_alphabetic() {
                return Err(invalid(format!("shortcut '{}' must be a letter", shortcut)));
            }
            if RESERVED_SHORTCUTS.contains(&shortcut) {
                return Err(invalid(format!("-{} is reserved for help", shortcut)));
            }
            if !shortcuts.insert(shortcut) {
                return Err(invalid(format!("shortcut '{}' is declared twice", shortcut)));
            }
        }

        if let Some(default) = &option.default {
            if !option.takes_value() {
                return Err(invalid("switches cannot declare a default value".to_string()));
            }
            validate_default(option.value_type, default).map_err(invalid)?;
        }
    }

    Ok(())
}

/// Check that a default value parses according to its type hint
fn validate_default(value_type: ValueType, default: &str) -> Result<(), String> {
    let parses = match value_type {
        ValueType::String => true,
        ValueType::Integer => default.parse::<i64>().is_ok(),
        ValueType::Float => default.parse::<f64>().is_ok(),
        ValueType::Boolean => default.parse::<bool>().is_ok(),
    };

    if parses {
        Ok(())
    } else {
        Err(format!("default '{}' is not a valid {}", default, value_type))
    }
}
