//! Roast - nested command-line interfaces from a declarative command tree
//!
//! A tree of commands is described once, either with the builder API or in
//! YAML, and built into an [`App`]. Each argument vector is then routed
//! keyword by keyword to exactly one leaf command, whose options and
//! positional arguments are resolved and validated before its handler runs.
//! Every failure along the way shows the help of the command that failed.
//!
//! ```
//! use roast::{App, ArgumentSpec, CommandConfig, Outcome};
//!
//! let config = CommandConfig::new().subcommand(
//!     "deploy",
//!     CommandConfig::new()
//!         .argument(ArgumentSpec::new("target").required(true))
//!         .exec(|invocation| {
//!             assert_eq!(invocation.args, vec!["prod"]);
//!             Ok(())
//!         }),
//! );
//!
//! let app = App::new("roast", config).unwrap();
//! let mut out = Vec::new();
//! assert_eq!(app.run(["deploy", "prod"], &mut out).unwrap(), Outcome::Executed);
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod tree;

// Re-export commonly used types
pub use cli::App;
pub use config::{parse_config, ArgumentSpec, CommandConfig, Example, OptionSpec, Text, ValueType};
pub use dispatch::{Invocation, OptionMap, OptionValue, Outcome};
pub use error::{ConfigError, DispatchError, Result, RoastError};

/// Current version of Roast
pub const VERSION: &str = clap::crate_version!();
