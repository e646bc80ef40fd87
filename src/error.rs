//! Error types for Roast

use std::io;
use thiserror::Error;

/// Result type alias for Roast operations
pub type Result<T> = std::result::Result<T, RoastError>;

/// Main error type for Roast
#[derive(Error, Debug)]
pub enum RoastError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while routing an argument vector
    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Construction-time errors in a command tree
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Command '{0}': arguments and subcommands are mutually exclusive")]
    ArgumentsWithSubcommands(String),

    #[error("Command '{command}': invalid option '{flag}': {reason}")]
    InvalidOption {
        command: String,
        flag: String,
        reason: String,
    },

    #[error("Command '{command}': invalid argument '{name}': {reason}")]
    InvalidArgument {
        command: String,
        name: String,
        reason: String,
    },

    #[error("Command '{command}': invalid subcommand keyword '{keyword}': {reason}")]
    InvalidKeyword {
        command: String,
        keyword: String,
        reason: String,
    },

    #[error("Command '{0}' is not defined")]
    CommandNotFound(String),

    #[error("Command '{command}' has no argument named '{name}'")]
    ArgumentNotFound { command: String, name: String },
}

/// Dispatch-time errors
///
/// Every variant except [`DispatchError::Handler`] and [`DispatchError::Io`]
/// is reported after the help of the failing command was written out.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown command '{keyword}' for '{command}'")]
    UnknownCommand { command: String, keyword: String },

    #[error("Missing subcommand for '{0}'")]
    MissingCommand(String),

    #[error("Invalid number of arguments for '{command}': expected {expected}, got {actual}")]
    ArgumentCount {
        command: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument '{argument}' for '{command}': {value:?}")]
    InvalidArgument {
        command: String,
        argument: String,
        value: String,
    },

    #[error("Invalid options for '{command}': {message}")]
    Options { command: String, message: String },

    #[error(transparent)]
    Handler(anyhow::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Whether this error stems from a malformed command line, as opposed to
    /// a failing handler or output sink.
    pub fn is_usage_error(&self) -> bool {
        !matches!(self, DispatchError::Handler(_) | DispatchError::Io(_))
    }
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for dispatch operations
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
