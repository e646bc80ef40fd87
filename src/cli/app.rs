//! Main CLI application

use crate::config::{validate_config, CommandConfig};
use crate::dispatch::{dispatch, Outcome, Scope};
use crate::error::{ConfigResult, DispatchResult};
use crate::help::generate_help;
use crate::tree::CommandNode;
use std::io::{self, Write};

/// A validated command tree bound to an executable name
#[derive(Debug, Clone)]
pub struct App {
    /// Name shown in usage lines
    executable: String,
    /// Root of the command tree
    root: CommandNode,
}

impl App {
    /// Validate `config` and build its command tree
    pub fn new(executable: impl Into<String>, config: CommandConfig) -> ConfigResult<Self> {
        let executable = executable.into();
        validate_config(&executable, &config)?;
        let root = CommandNode::build_root(&executable, config)?;

        Ok(App { executable, root })
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Dispatch `argv` (without the program name), writing help and errors
    /// to `out`
    pub fn run<I, S, W>(&self, argv: I, out: &mut W) -> DispatchResult<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: Write + ?Sized,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let scope = Scope::root(self.executable.as_str(), &self.root);
        let outcome = dispatch(&self.root, &scope, argv, out);
        out.flush()?;
        outcome
    }

    /// Dispatch the process arguments, writing to stdout
    pub fn run_from_env(&self) -> DispatchResult<Outcome> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run(std::env::args().skip(1), &mut out)
    }

    /// Rendered help of the command at `path`, if it exists
    pub fn help(&self, path: &[&str]) -> Option<String> {
        let mut node = &self.root;
        let mut scope = Scope::root(self.executable.as_str(), node);

        for keyword in path {
            let child = node.child(keyword)?;
            scope = scope.enter(node, child);
            node = child;
        }

        Some(generate_help(node, &scope).render())
    }
}
