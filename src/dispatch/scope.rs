//! Dispatch scope
//!
//! The values a node needs during one dispatch (executable name, ancestor
//! keywords, level and merged options) depend only on the node's position in
//! the tree. They are derived top-down while routing and passed along with
//! the node instead of being stored on it.

use crate::config::OptionSpec;
use crate::tree::CommandNode;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    executable: String,

    /// Keywords of the ancestors, root first; the root contributes none
    ancestors: Vec<String>,

    /// Depth from the root, which is also the number of positional tokens
    /// consumed by routing
    level: usize,

    /// Inherited options followed by the node's own
    options: Vec<OptionSpec>,
}

impl Scope {
    /// Scope of the root node
    pub fn root(executable: impl Into<String>, root: &CommandNode) -> Self {
        Scope {
            executable: executable.into(),
            ancestors: Vec::new(),
            level: 0,
            options: root.options().to_vec(),
        }
    }

    /// Scope of `child`, reached from `parent` which lives in this scope
    pub fn enter(&self, parent: &CommandNode, child: &CommandNode) -> Self {
        let mut ancestors = self.ancestors.clone();
        if !parent.command().is_empty() {
            ancestors.push(parent.command().to_string());
        }

        let scope = Scope {
            executable: self.executable.clone(),
            ancestors,
            level: self.level + 1,
            options: merge_options(&self.options, child.options()),
        };
        debug!(
            "entering '{}' at level {} with {} option(s)",
            scope.display(child),
            scope.level,
            scope.options.len()
        );
        scope
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Keywords from the root down to and including `node`
    pub fn command_path(&self, node: &CommandNode) -> Vec<String> {
        let mut path = self.ancestors.clone();
        if !node.command().is_empty() {
            path.push(node.command().to_string());
        }
        path
    }

    /// The command line prefix naming `node`, e.g. `roast vpc create`
    pub fn display(&self, node: &CommandNode) -> String {
        std::iter::once(self.executable.clone())
            .chain(self.command_path(node))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Prepend `inherited` options to `own`
///
/// An own option replaces an inherited one with the same flag. When distinct
/// flags share a shortcut, the inherited option loses its shortcut and stays
/// reachable through its long flag.
pub fn merge_options(inherited: &[OptionSpec], own: &[OptionSpec]) -> Vec<OptionSpec> {
    let mut merged: Vec<OptionSpec> = inherited
        .iter()
        .filter(|parent| !own.iter().any(|option| option.flag == parent.flag))
        .cloned()
        .map(|mut parent| {
            if parent.shortcut.is_some() && own.iter().any(|option| option.shortcut == parent.shortcut) {
                parent.shortcut = None;
            }
            parent
        })
        .collect();

    merged.extend(own.iter().cloned());
    merged
}
