//! Positional argument validation and formatting

use crate::config::ArgumentSpec;
use std::fmt;

/// Why the positional tokens at a leaf were refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentRejection {
    /// The token count did not match `level + required`
    Count { expected: usize, actual: usize },

    /// A validator rejected a value
    Invalid { argument: String, value: String },
}

impl fmt::Display for ArgumentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentRejection::Count { expected, actual } => write!(
                f,
                "invalid number of arguments, expected {} but got {}",
                expected, actual
            ),
            ArgumentRejection::Invalid { argument, .. } => {
                write!(f, "invalid argument: {}", argument)
            }
        }
    }
}

/// Validate and format the positional tokens seen at a leaf
///
/// The first `level` tokens are the keywords that routed here. Exactly one
/// token per required argument must follow them. Values are checked in
/// declaration order and the first rejected value stops the pass, so later
/// arguments are neither validated nor formatted.
pub fn parse_args(
    tokens: &[String],
    arguments: &[ArgumentSpec],
    level: usize,
) -> Result<Vec<String>, ArgumentRejection> {
    let required = arguments.iter().filter(|arg| arg.required).count();

    if tokens.len() != level + required {
        return Err(ArgumentRejection::Count {
            expected: required,
            actual: tokens.len().saturating_sub(level),
        });
    }

    let mut values = tokens[level..].to_vec();

    for (spec, value) in arguments.iter().zip(values.iter_mut()) {
        if let Some(validate) = &spec.validator {
            if !validate(value.as_str()) {
                return Err(ArgumentRejection::Invalid {
                    argument: spec.name.clone(),
                    value: value.clone(),
                });
            }
        }

        if let Some(format) = &spec.formatter {
            *value = format(value.as_str());
        }
    }

    Ok(values)
}
