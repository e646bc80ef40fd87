//! Routing an argument vector through the command tree
//!
//! Every level parses the vector again: routers only look at positional
//! keywords, while the leaf finally resolves options, validates its own
//! positional arguments and runs its handler. Help and error output go to a
//! line-oriented writer.

use crate::dispatch::args::{parse_args, ArgumentRejection};
use crate::dispatch::scope::Scope;
use crate::dispatch::tokens::{OptionMap, OptionValue, TokenParser};
use crate::error::{DispatchError, DispatchResult};
use crate::help::generate_help;
use crate::tree::{CommandNode, NodeKind};
use colored::Colorize;
use log::{debug, warn};
use std::io::Write;

/// Flags requesting help, in lookup order
pub const HELP_FLAGS: &[&str] = &["--help", "-h"];

/// What a leaf handler receives
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Keywords from the root down to the invoked command
    pub path: Vec<String>,

    /// Validated and formatted positional arguments
    pub args: Vec<String>,

    /// Resolved options keyed by flag
    pub options: OptionMap,
}

impl Invocation {
    pub fn option(&self, flag: &str) -> Option<&OptionValue> {
        self.options.get(flag)
    }

    /// Whether a switch was given
    pub fn flag(&self, flag: &str) -> bool {
        self.option(flag).and_then(|value| value.as_bool()).unwrap_or(false)
    }
}

/// How a dispatch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A leaf handler ran to completion
    Executed,
    /// Help was requested and shown
    HelpShown,
}

/// Route `argv` from `node`, which lives in `scope`
///
/// A help flag is honored at the first level where it is the target: at a
/// router once no keyword follows it, and at a leaf always, even when more
/// positional tokens were given. A leaf reached with a help flag never runs
/// its handler.
pub fn dispatch<W: Write + ?Sized>(
    node: &CommandNode,
    scope: &Scope,
    mut argv: Vec<String>,
    out: &mut W,
) -> DispatchResult<Outcome> {
    // The token parser knows nothing about nesting, so the help flag is held
    // back until the level it belongs to is reached
    let help_flag = take_help_flag(&mut argv);

    // A leaf is as deep as help can go
    if help_flag.is_some() && node.is_leaf() {
        debug!("showing help for '{}'", scope.display(node));
        write_help(out, node, scope)?;
        return Ok(Outcome::HelpShown);
    }

    let mut parser = TokenParser::new(scope.display(node));
    if node.is_leaf() {
        for option in scope.options() {
            parser.register_option(option);
        }
    } else {
        parser.allow_unknown_options(true);
        for option in scope.options() {
            parser.recognize_option(option);
        }
    }

    let parsed = match parser.parse(&argv) {
        Ok(parsed) => parsed,
        Err(err) => {
            let message = clap_message(&err);
            report(out, &message)?;
            write_help(out, node, scope)?;
            return Err(DispatchError::Options {
                command: scope.display(node),
                message,
            });
        }
    };

    if let Some(flag) = help_flag {
        if parsed.positionals().len() == scope.level() {
            debug!("showing help for '{}'", scope.display(node));
            write_help(out, node, scope)?;
            return Ok(Outcome::HelpShown);
        }
        argv.push(flag);
    }

    match node.kind() {
        NodeKind::Leaf { arguments, exec } => {
            let (positionals, options) = parsed.into_parts();

            let args = match parse_args(&positionals, arguments, scope.level()) {
                Ok(args) => args,
                Err(rejection) => {
                    warn!("rejected arguments for '{}': {}", scope.display(node), rejection);
                    report(out, &rejection.to_string())?;
                    write_help(out, node, scope)?;
                    return Err(rejection_error(rejection, scope.display(node)));
                }
            };

            let invocation = Invocation {
                path: scope.command_path(node),
                args,
                options,
            };
            debug!("invoking '{}' with {:?}", scope.display(node), invocation.args);

            match exec {
                Some(handler) => handler(&invocation).map_err(DispatchError::Handler)?,
                None => writeln!(out, "Command not yet implemented")?,
            }

            Ok(Outcome::Executed)
        }
        NodeKind::Router(_) => {
            let Some(keyword) = parsed.positionals().get(scope.level()) else {
                warn!("no subcommand given for '{}'", scope.display(node));
                write_help(out, node, scope)?;
                return Err(DispatchError::MissingCommand(scope.display(node)));
            };

            let Some(child) = node.child(keyword) else {
                warn!("unknown subcommand '{}' for '{}'", keyword, scope.display(node));
                write_help(out, node, scope)?;
                return Err(DispatchError::UnknownCommand {
                    command: scope.display(node),
                    keyword: keyword.clone(),
                });
            };

            let child_scope = scope.enter(node, child);
            dispatch(child, &child_scope, argv, out)
        }
    }
}

/// Remove the first help flag from `argv`; `--help` is looked for before `-h`
fn take_help_flag(argv: &mut Vec<String>) -> Option<String> {
    let index = HELP_FLAGS
        .iter()
        .find_map(|flag| argv.iter().position(|token| token.as_str() == *flag))?;
    Some(argv.remove(index))
}

pub fn write_help<W: Write + ?Sized>(
    out: &mut W,
    node: &CommandNode,
    scope: &Scope,
) -> std::io::Result<()> {
    writeln!(out, "{}", generate_help(node, scope).render())
}

/// Write an error line ahead of the help
fn report<W: Write + ?Sized>(out: &mut W, message: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format!(" ERROR: {}", message).red())
}

fn rejection_error(rejection: ArgumentRejection, command: String) -> DispatchError {
    match rejection {
        ArgumentRejection::Count { expected, actual } => DispatchError::ArgumentCount {
            command,
            expected,
            actual,
        },
        ArgumentRejection::Invalid { argument, value } => DispatchError::InvalidArgument {
            command,
            argument,
            value,
        },
    }
}

/// First line of a clap error without its `error: ` prefix
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
