//! Command node construction
//!
//! This differs from config::CommandConfig in that the router/leaf split is
//! part of the type: a node either routes to children or owns positional
//! arguments and a handler, never both.

use crate::config::{ArgumentSpec, CommandConfig, Example, Handler, OptionSpec, Text};
use crate::error::{ConfigError, ConfigResult};
use std::fmt;

/// One keyword of the command hierarchy
#[derive(Clone)]
pub struct CommandNode {
    /// Keyword used to invoke this command; empty for the root
    command: String,

    description: Text,

    /// Options declared on this node; descendants inherit them
    options: Vec<OptionSpec>,

    examples: Vec<Example>,

    kind: NodeKind,
}

/// What a node does once the dispatcher reaches it
#[derive(Clone)]
pub enum NodeKind {
    /// Delegates to the child matching the next positional keyword
    Router(Vec<CommandNode>),

    /// Validates its positional arguments and runs its handler
    Leaf {
        arguments: Vec<ArgumentSpec>,
        exec: Option<Handler>,
    },
}

impl CommandNode {
    /// Build the root node of a tree for `executable`
    pub fn build_root(executable: &str, config: CommandConfig) -> ConfigResult<Self> {
        Self::build_at("", config, executable)
    }

    /// Build a node for `keyword` and, recursively, all of its subcommands
    pub fn build(keyword: &str, config: CommandConfig) -> ConfigResult<Self> {
        Self::build_at(keyword, config, keyword)
    }

    /// `path` names the node in error messages
    fn build_at(keyword: &str, config: CommandConfig, path: &str) -> ConfigResult<Self> {
        let CommandConfig {
            description,
            arguments,
            options,
            examples,
            subcommands,
            exec,
        } = config;

        let children = subcommands
            .into_iter()
            .map(|(name, sub)| Self::build_at(&name, sub, &format!("{} {}", path, name)))
            .collect::<ConfigResult<Vec<_>>>()?;

        if !arguments.is_empty() && !children.is_empty() {
            return Err(ConfigError::ArgumentsWithSubcommands(path.trim().to_string()));
        }

        let kind = if children.is_empty() {
            NodeKind::Leaf { arguments, exec }
        } else {
            NodeKind::Router(children)
        };

        Ok(CommandNode {
            command: keyword.to_string(),
            description,
            options,
            examples,
            kind,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn description(&self) -> &Text {
        &self.description
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Positional arguments; always empty for routers
    pub fn arguments(&self) -> &[ArgumentSpec] {
        match &self.kind {
            NodeKind::Leaf { arguments, .. } => arguments,
            NodeKind::Router(_) => &[],
        }
    }

    /// Subcommands in declaration order; always empty for leaves
    pub fn children(&self) -> &[CommandNode] {
        match &self.kind {
            NodeKind::Router(children) => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// First child whose keyword equals `keyword`
    pub fn child(&self, keyword: &str) -> Option<&CommandNode> {
        self.children().iter().find(|child| child.command == keyword)
    }

    /// Walk down the tree along a keyword path
    pub fn find(&self, path: &[&str]) -> Option<&CommandNode> {
        path.iter().try_fold(self, |node, keyword| node.child(keyword))
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("CommandNode");
        debug
            .field("command", &self.command)
            .field("description", &self.description)
            .field("options", &self.options);

        match &self.kind {
            NodeKind::Router(children) => debug.field("children", children),
            NodeKind::Leaf { arguments, exec } => debug
                .field("arguments", arguments)
                .field("exec", &exec.is_some()),
        };

        debug.finish()
    }
}
